use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for records whose condition is absent or empty.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Location filter value that disables filtering.
pub const ALL_LOCATIONS: &str = "All";

/// One observed item from a survey, e.g. a single water body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Classification label, stored as `type` in survey documents.
    #[serde(rename = "type", alias = "category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl EntityRecord {
    pub fn new(category: impl Into<String>, condition: Option<&str>, locations: &[&str]) -> Self {
        Self {
            category: category.into(),
            condition: condition.map(str::to_string),
            locations: locations.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Grouping key: the condition, or [`UNKNOWN_CONDITION`] when absent or empty.
    pub fn condition_key(&self) -> &str {
        match self.condition.as_deref() {
            Some(condition) if !condition.is_empty() => condition,
            _ => UNKNOWN_CONDITION,
        }
    }

    /// Case-insensitive membership test against `locations`.
    pub fn is_located_in(&self, location: &str) -> bool {
        let wanted = location.to_lowercase();
        self.locations.iter().any(|l| l.to_lowercase() == wanted)
    }
}

/// Which records take part in an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LocationFilter {
    #[default]
    All,
    /// Keep records associated with this place, compared case-insensitively.
    Location(String),
}

impl LocationFilter {
    /// Interpret a selector value. Only the exact sentinel `"All"` disables filtering.
    pub fn parse(value: &str) -> Self {
        if value == ALL_LOCATIONS {
            Self::All
        } else {
            Self::Location(value.to_string())
        }
    }

    pub fn matches(&self, record: &EntityRecord) -> bool {
        match self {
            Self::All => true,
            Self::Location(location) => record.is_located_in(location),
        }
    }
}

impl From<&str> for LocationFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_LOCATIONS),
            Self::Location(location) => f.write_str(location),
        }
    }
}

/// Aggregation bucket for one condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionGroup {
    pub count: usize,
    pub categories: IndexSet<String>,
}

impl ConditionGroup {
    pub fn add(&mut self, category: &str) {
        self.count += 1;
        if !self.categories.contains(category) {
            self.categories.insert(category.to_string());
        }
    }
}

/// One display-ready slice of a proportional chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDatum {
    pub label: String,
    pub count: usize,
    pub total_count: usize,
    pub categories: Vec<String>,
    pub percentage: u8,
}
