use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// `#RRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const CLEAN: Rgb = Rgb(0x4C, 0xAF, 0x50);
    pub const POLLUTED: Rgb = Rgb(0xFF, 0xA7, 0x26);
    pub const HEAVILY_POLLUTED: Rgb = Rgb(0xEF, 0x53, 0x50);
    pub const UNKNOWN: Rgb = Rgb(0x9E, 0x9E, 0x9E);
    pub const FALLBACK: Rgb = Rgb(0x80, 0x80, 0x80);
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| format!("expected a colour like #4CAF50, got '{s}'"))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| format!("expected a colour like #4CAF50, got '{s}'"))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Colour lookup keyed by condition label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionPalette {
    colors: HashMap<String, Rgb>,
    fallback: Rgb,
}

impl Default for ConditionPalette {
    fn default() -> Self {
        let colors = [
            ("Clean", Rgb::CLEAN),
            ("Polluted", Rgb::POLLUTED),
            ("Heavily polluted", Rgb::HEAVILY_POLLUTED),
            ("Unknown", Rgb::UNKNOWN),
        ]
        .into_iter()
        .map(|(label, color)| (label.to_string(), color))
        .collect();

        Self {
            colors,
            fallback: Rgb::FALLBACK,
        }
    }
}

impl ConditionPalette {
    /// Default palette with `overrides` applied on top.
    pub fn with_overrides(overrides: &HashMap<String, Rgb>, fallback: Option<Rgb>) -> Self {
        let mut palette = Self::default();
        palette
            .colors
            .extend(overrides.iter().map(|(label, color)| (label.clone(), *color)));
        if let Some(fallback) = fallback {
            palette.fallback = fallback;
        }
        palette
    }

    /// Colour for `label`; exact match, otherwise the fallback colour.
    pub fn color_for(&self, label: &str) -> Rgb {
        self.colors.get(label).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Rgb {
        self.fallback
    }
}
