//! Display language state and the translation cookie.
//!
//! The language is explicit state owned by the host ([`LocaleState`]); it
//! is resolved once from the `googtrans` cookie (falling back to the
//! configured default) and passed to whatever needs it. Aggregation never
//! looks at it.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnapshotError};

pub const COOKIE_NAME: &str = "googtrans";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    pub name: String,
    pub title: String,
}

impl LanguageDescriptor {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
        }
    }

    /// Text shown on the language toggle button.
    pub fn toggle_label(&self) -> &str {
        if self.name == "en" {
            "ENG"
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageDescriptor>,
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_languages() -> Vec<LanguageDescriptor> {
    vec![
        LanguageDescriptor::new("en", "English"),
        LanguageDescriptor::new("or", "Odia"),
    ]
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            default_language: default_language(),
        }
    }
}

impl TranslationConfig {
    pub fn find(&self, name: &str) -> Option<&LanguageDescriptor> {
        self.languages.iter().find(|lang| lang.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.languages.iter().map(|lang| lang.name.clone()).collect()
    }
}

/// Target language from a cookie value of the form `/<source>/<target>`.
pub fn language_from_cookie(value: &str) -> Option<&str> {
    value.split('/').nth(2).filter(|lang| !lang.is_empty())
}

/// Cookie value selecting `language` with automatic source detection.
pub fn cookie_value(language: &str) -> String {
    format!("/auto/{language}")
}

/// Current display language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleState {
    current: String,
}

impl LocaleState {
    /// Language from the cookie if it names one, otherwise the configured default.
    pub fn resolve(cookie: Option<&str>, config: &TranslationConfig) -> Self {
        let current = cookie
            .and_then(language_from_cookie)
            .unwrap_or(config.default_language.as_str());
        Self {
            current: current.to_string(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Switch to `language` and return the cookie value to persist.
    pub fn switch(&mut self, language: &str, config: &TranslationConfig) -> Result<String> {
        if config.find(language).is_none() {
            return Err(SnapshotError::Locale {
                language: language.to_string(),
                available: config.names(),
            });
        }
        self.current = language.to_string();
        Ok(cookie_value(language))
    }
}
