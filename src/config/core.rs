use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::io::output::OutputFormat;
use crate::locale::TranslationConfig;
use crate::presentation::{ConditionPalette, Rgb, DEFAULT_NO_DATA_MESSAGE, DEFAULT_TITLE};

/// Root configuration loaded from `.gpsnapshot.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub snapshot: SourceConfig,

    #[serde(default)]
    pub locale: TranslationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_no_data_message")]
    pub no_data_message: String,

    /// Colour for labels without an entry in the palette.
    #[serde(default)]
    pub fallback_color: Option<String>,

    /// Label to `#RRGGBB` overrides applied over the default palette.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_no_data_message() -> String {
    DEFAULT_NO_DATA_MESSAGE.to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            no_data_message: default_no_data_message(),
            fallback_color: None,
            colors: BTreeMap::new(),
        }
    }
}

impl ChartConfig {
    /// Build the palette, dropping colours that do not parse.
    pub fn palette(&self) -> ConditionPalette {
        let overrides: HashMap<String, Rgb> = self
            .colors
            .iter()
            .filter_map(|(label, raw)| match raw.parse::<Rgb>() {
                Ok(color) => Some((label.clone(), color)),
                Err(e) => {
                    warn!(label = %label, "ignoring colour override: {e}");
                    None
                }
            })
            .collect();

        let fallback = self
            .fallback_color
            .as_deref()
            .and_then(|raw| match raw.parse::<Rgb>() {
                Ok(color) => Some(color),
                Err(e) => {
                    warn!("ignoring fallback colour: {e}");
                    None
                }
            });

        ConditionPalette::with_overrides(&overrides, fallback)
    }
}

/// Where records live inside a submission's `formData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_records_field")]
    pub records_field: String,

    #[serde(default = "default_demographics_field")]
    pub demographics_field: String,
}

fn default_records_field() -> String {
    "waterBodies".to_string()
}

fn default_demographics_field() -> String {
    "Demographics".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            records_field: default_records_field(),
            demographics_field: default_demographics_field(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}
