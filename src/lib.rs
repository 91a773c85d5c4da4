// Export modules for library usage
pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod locale;
pub mod observability;
pub mod presentation;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{
    ChartDatum, ConditionGroup, EntityRecord, LocationFilter, ALL_LOCATIONS, UNKNOWN_CONDITION,
};

pub use crate::aggregation::{
    aggregate_conditions, aggregate_value, filter_records, group_by_condition, percentage_of,
};

pub use crate::validation::{validate_records, Diagnostic, ValidatedRecords};

pub use crate::presentation::{ChartView, ConditionPalette, LegendEntry, Rgb, Tooltip};

pub use crate::errors::{Result, SnapshotError};
