//! Core data model shared by validation, aggregation and presentation.

pub mod types;

pub use types::{
    ChartDatum, ConditionGroup, EntityRecord, LocationFilter, ALL_LOCATIONS, UNKNOWN_CONDITION,
};
