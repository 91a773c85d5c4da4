use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::SnapshotConfig;
use crate::errors::{Result, SnapshotError};
use crate::locale::TranslationConfig;

pub const CONFIG_FILE_NAME: &str = ".gpsnapshot.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string and repair inconsistent sections.
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<SnapshotConfig, String> {
    let mut config = toml::from_str::<SnapshotConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    if let Err(e) = validate_locale(&config.locale) {
        log::warn!("Invalid locale settings: {}. Using defaults.", e);
        config.locale = TranslationConfig::default();
    }

    Ok(config)
}

fn validate_locale(locale: &TranslationConfig) -> std::result::Result<(), String> {
    if locale.languages.is_empty() {
        return Err("no languages configured".to_string());
    }
    if locale.find(&locale.default_language).is_none() {
        return Err(format!(
            "default language '{}' is not one of [{}]",
            locale.default_language,
            locale.names().join(", ")
        ));
    }
    Ok(())
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<SnapshotConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // A missing file just means "keep looking"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its ancestors, at most `max_depth` directories.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the current directory and its ancestors for a config file.
pub fn load_config() -> SnapshotConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return SnapshotConfig::default();
        }
    };
    load_config_from_ancestors(current)
}

pub fn load_config_from_ancestors(start: PathBuf) -> SnapshotConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SnapshotConfig::default()
        })
}

/// Load an explicitly requested config file; unlike discovery, failures are errors.
pub fn load_config_file(path: &Path) -> Result<SnapshotConfig> {
    let contents = read_config_file(path)
        .map_err(|e| SnapshotError::io("failed to read config file", path, e))?;
    parse_and_validate_config(&contents)
        .map_err(|message| SnapshotError::config(message, Some(path.to_path_buf())))
}

/// Commented default configuration written by `gp-snapshot init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# GP Snapshot configuration

[chart]
title = "Water Bodies by Condition"
no_data_message = "No data available for the selected village"
# fallback_color = "#808080"

[chart.colors]
# "Clean" = "#4CAF50"
# "Polluted" = "#FFA726"
# "Heavily polluted" = "#EF5350"
# "Unknown" = "#9E9E9E"

[snapshot]
records_field = "waterBodies"
demographics_field = "Demographics"

[locale]
default_language = "en"
languages = [
    { name = "en", title = "English" },
    { name = "or", title = "Odia" },
]

[output]
default_format = "terminal"
"##;
