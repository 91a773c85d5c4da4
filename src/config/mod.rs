//! Configuration for chart rendering, record sources, locale and output.
//!
//! Settings come from `.gpsnapshot.toml`, discovered by walking up from the
//! current directory, or from a file passed with `--config`. Every field has
//! a default, so an absent or partial file is fine.

pub mod core;
pub mod loader;

pub use self::core::{ChartConfig, OutputConfig, SnapshotConfig, SourceConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from_ancestors,
    parse_and_validate_config, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE,
};
