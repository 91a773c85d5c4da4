//! Colour decisions for terminal output.
//!
//! Precedence, highest first: `--plain`, `--color`, writing to a file, then
//! the `NO_COLOR` / `CLICOLOR` / `CLICOLOR_FORCE` environment.

use std::env;
use std::io::IsTerminal;

/// Value of `--color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour only when stdout is a capable terminal.
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Case-insensitive `auto`, `always` or `never`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // https://no-color.org
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// No colours at all.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }

    /// Resolve the mode once and make `colored` follow it.
    pub fn apply(&self) -> bool {
        let use_color = self.color.should_use_color();
        colored::control::set_override(use_color);
        use_color
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
