//! Condition aggregation for proportional charts.
//!
//! Turns per-village survey records into one [`ChartDatum`] per distinct
//! condition, in order of first appearance, annotated with counts and
//! rounded percentages.
//!
//! # Rounding
//!
//! Percentages are rounded half up on the exact ratio, using integer
//! arithmetic so that boundary values are not disturbed by floating point:
//! 0.5 % becomes 1, 12.5 % becomes 13, 62.5 % becomes 63. The rounded
//! values of one chart are not adjusted to sum to 100.
//!
//! # Examples
//!
//! ```rust
//! use gp_snapshot::aggregation::aggregate_conditions;
//! use gp_snapshot::core::{EntityRecord, LocationFilter};
//!
//! let records = vec![
//!     EntityRecord::new("Pond", Some("Clean"), &["Alpha"]),
//!     EntityRecord::new("Well", Some("Clean"), &["Beta"]),
//!     EntityRecord::new("Tank", None, &["Alpha"]),
//! ];
//!
//! let data = aggregate_conditions(&records, &LocationFilter::All);
//! assert_eq!(data[0].label, "Clean");
//! assert_eq!(data[0].percentage, 67);
//! assert_eq!(data[1].label, "Unknown");
//! assert_eq!(data[1].percentage, 33);
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::core::{ChartDatum, ConditionGroup, EntityRecord, LocationFilter};
use crate::validation::validate_records;

/// Aggregate a raw, untrusted records value.
///
/// Runs the validation boundary first; anything that is not an array of
/// records degrades to an empty result.
pub fn aggregate_value(records: &Value, filter: &LocationFilter) -> Vec<ChartDatum> {
    let validated = validate_records(records);
    aggregate_conditions(&validated.records, filter)
}

/// Aggregate typed records into chart data.
pub fn aggregate_conditions(records: &[EntityRecord], filter: &LocationFilter) -> Vec<ChartDatum> {
    let groups = group_by_condition(filter_records(records, filter));
    let data = project(&groups);
    debug!(
        filter = %filter,
        input = records.len(),
        groups = data.len(),
        "aggregated condition chart data"
    );
    data
}

/// Records matching the location filter, in input order.
pub fn filter_records<'a>(
    records: &'a [EntityRecord],
    filter: &'a LocationFilter,
) -> impl Iterator<Item = &'a EntityRecord> + 'a {
    records.iter().filter(move |record| filter.matches(record))
}

/// Group records by condition key, keeping first-seen order.
pub fn group_by_condition<'a>(
    records: impl IntoIterator<Item = &'a EntityRecord>,
) -> IndexMap<String, ConditionGroup> {
    records
        .into_iter()
        .fold(IndexMap::new(), |mut groups, record| {
            groups
                .entry(record.condition_key().to_string())
                .or_default()
                .add(&record.category);
            groups
        })
}

fn project(groups: &IndexMap<String, ConditionGroup>) -> Vec<ChartDatum> {
    let total: usize = groups.values().map(|group| group.count).sum();
    if total == 0 {
        return Vec::new();
    }

    groups
        .iter()
        .map(|(label, group)| ChartDatum {
            label: label.clone(),
            count: group.count,
            total_count: total,
            categories: group.categories.iter().cloned().collect(),
            percentage: percentage_of(group.count, total),
        })
        .collect()
}

/// `count / total * 100`, rounded half up. Returns 0 when `total` is 0.
pub fn percentage_of(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let count = count.min(total) as u128;
    let total = total as u128;
    // round(100c/t) = floor((200c + t) / 2t)
    ((200 * count + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(category: &str, condition: Option<&str>, locations: &[&str]) -> EntityRecord {
        EntityRecord::new(category, condition, locations)
    }

    #[test]
    fn test_percentage_rounding_boundaries() {
        assert_eq!(percentage_of(1, 200), 1); // 0.5%
        assert_eq!(percentage_of(1, 201), 0); // 0.497%
        assert_eq!(percentage_of(1, 8), 13); // 12.5%
        assert_eq!(percentage_of(5, 8), 63); // 62.5%
        assert_eq!(percentage_of(1, 3), 33);
        assert_eq!(percentage_of(2, 3), 67);
        assert_eq!(percentage_of(7, 7), 100);
        assert_eq!(percentage_of(0, 7), 0);
        assert_eq!(percentage_of(0, 0), 0);
    }

    #[test]
    fn test_percentage_rounds_exact_half_not_float_product() {
        // 23 / 40 * 100 is 57.49999999999999 in f64, but the ratio is 57.5
        assert_eq!(percentage_of(23, 40), 58);
        assert_eq!(percentage_of(29, 200), 15);
    }

    #[test]
    fn test_output_keeps_first_seen_order() {
        let records = vec![
            record("Pond", Some("Polluted"), &[]),
            record("Well", Some("Clean"), &[]),
            record("Tank", Some("Clean"), &[]),
            record("Pond", Some("Heavily polluted"), &[]),
            record("Well", Some("Polluted"), &[]),
        ];
        let labels: Vec<_> = aggregate_conditions(&records, &LocationFilter::All)
            .into_iter()
            .map(|datum| datum.label)
            .collect();
        assert_eq!(labels, vec!["Polluted", "Clean", "Heavily polluted"]);
    }

    #[test]
    fn test_categories_are_distinct_per_condition() {
        let records = vec![
            record("Pond", Some("Clean"), &[]),
            record("Well", Some("Clean"), &[]),
            record("Pond", Some("Clean"), &[]),
        ];
        let data = aggregate_conditions(&records, &LocationFilter::All);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].categories, vec!["Pond", "Well"]);
        assert_eq!(data[0].count, 3);
        assert_eq!(data[0].total_count, 3);
    }

    #[test]
    fn test_empty_condition_groups_with_absent() {
        let records = vec![record("Pond", Some(""), &[]), record("Well", None, &[])];
        let data = aggregate_conditions(&records, &LocationFilter::All);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].label, "Unknown");
        assert_eq!(data[0].count, 2);
    }

    #[test]
    fn test_filter_without_matches_is_empty() {
        let records = vec![record("Pond", Some("Clean"), &["Alpha"])];
        let data = aggregate_conditions(&records, &LocationFilter::parse("Gamma"));
        assert!(data.is_empty());
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let records = vec![record("Pond", None, &["Alpha"])];
        let before = records.clone();
        let _ = aggregate_conditions(&records, &LocationFilter::parse("alpha"));
        assert_eq!(records, before);
    }

    #[test]
    fn test_aggregate_value_degrades_for_non_array() {
        assert!(aggregate_value(&Value::Null, &LocationFilter::All).is_empty());
        assert!(aggregate_value(&serde_json::json!({"a": 1}), &LocationFilter::All).is_empty());
    }
}
