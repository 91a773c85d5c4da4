use anyhow::Result;

use crate::locale::{LocaleState, TranslationConfig, COOKIE_NAME};

pub fn run(
    cookie: Option<&str>,
    switch_to: Option<&str>,
    config: &TranslationConfig,
) -> Result<()> {
    for line in describe(cookie, switch_to, config)? {
        println!("{line}");
    }
    Ok(())
}

/// Current language, toggle buttons and, when switching, the cookie to set.
pub fn describe(
    cookie: Option<&str>,
    switch_to: Option<&str>,
    config: &TranslationConfig,
) -> Result<Vec<String>> {
    let mut state = LocaleState::resolve(cookie, config);
    let mut lines = Vec::new();

    if let Some(language) = switch_to {
        let value = state.switch(language, config)?;
        lines.push(format!("{COOKIE_NAME}={value}"));
    }

    lines.push(format!("language: {}", state.current()));
    let toggles: Vec<String> = config
        .languages
        .iter()
        .map(|lang| {
            if lang.name == state.current() {
                format!("[{}]", lang.toggle_label())
            } else {
                lang.toggle_label().to_string()
            }
        })
        .collect();
    lines.push(format!("toggle: {}", toggles.join(" ")));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_from_cookie() {
        let lines = describe(Some("/auto/or"), None, &TranslationConfig::default()).unwrap();
        assert_eq!(lines, vec!["language: or", "toggle: ENG [Odia]"]);
    }

    #[test]
    fn test_describe_switch() {
        let lines = describe(None, Some("or"), &TranslationConfig::default()).unwrap();
        assert_eq!(
            lines,
            vec!["googtrans=/auto/or", "language: or", "toggle: ENG [Odia]"]
        );
    }

    #[test]
    fn test_describe_unknown_language() {
        assert!(describe(None, Some("xx"), &TranslationConfig::default()).is_err());
    }
}
