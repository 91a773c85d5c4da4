use serde::Serialize;

use super::palette::{ConditionPalette, Rgb};
use crate::aggregation::percentage_of;
use crate::core::ChartDatum;

pub const DEFAULT_TITLE: &str = "Water Bodies by Condition";
pub const DEFAULT_NO_DATA_MESSAGE: &str = "No data available for the selected village";

/// Legend row: swatch colour plus `label (percentage%)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub text: String,
}

impl LegendEntry {
    pub fn new(datum: &ChartDatum, palette: &ConditionPalette) -> Self {
        Self {
            label: datum.label.clone(),
            color: palette.color_for(&datum.label),
            text: format!("{} ({}%)", datum.label, datum.percentage),
        }
    }
}

/// Hover details for one slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub label: String,
    pub count: usize,
    pub percentage: u8,
    pub categories: Vec<String>,
}

impl Tooltip {
    pub fn new(datum: &ChartDatum) -> Self {
        Self {
            label: datum.label.clone(),
            count: datum.count,
            percentage: datum.percentage,
            categories: datum.categories.clone(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.label.clone(),
            format!("Count: {}", self.count),
            format!("Percentage: {}%", self.percentage),
            "Types:".to_string(),
        ];
        lines.extend(self.categories.iter().map(|category| format!("• {category}")));
        lines
    }
}

/// On-slice label: rounded share of `total`, or nothing for an empty slice.
pub fn slice_label(value: usize, total: usize) -> Option<String> {
    if value == 0 {
        return None;
    }
    Some(format!("{}%", percentage_of(value, total)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub datum: ChartDatum,
    pub color: Rgb,
    pub label: Option<String>,
    pub legend: LegendEntry,
    pub tooltip: Tooltip,
}

/// What the host renders for one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartView {
    Chart { title: String, slices: Vec<Slice> },
    NoData { title: String, message: String },
}

impl ChartView {
    /// Empty data produces the explicit no-data view rather than an empty chart.
    pub fn build(
        title: &str,
        data: &[ChartDatum],
        palette: &ConditionPalette,
        no_data_message: &str,
    ) -> Self {
        if data.is_empty() {
            return Self::NoData {
                title: title.to_string(),
                message: no_data_message.to_string(),
            };
        }

        let slices = data
            .iter()
            .map(|datum| Slice {
                datum: datum.clone(),
                color: palette.color_for(&datum.label),
                label: slice_label(datum.count, datum.total_count),
                legend: LegendEntry::new(datum, palette),
                tooltip: Tooltip::new(datum),
            })
            .collect();

        Self::Chart {
            title: title.to_string(),
            slices,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Chart { title, .. } | Self::NoData { title, .. } => title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn datum(label: &str, count: usize, total: usize, categories: &[&str]) -> ChartDatum {
        ChartDatum {
            label: label.to_string(),
            count,
            total_count: total,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            percentage: percentage_of(count, total),
        }
    }

    #[test]
    fn test_legend_text() {
        let entry = LegendEntry::new(
            &datum("Clean", 2, 3, &["Pond"]),
            &ConditionPalette::default(),
        );
        assert_eq!(entry.text, "Clean (67%)");
        assert_eq!(entry.color, Rgb::CLEAN);
    }

    #[test]
    fn test_tooltip_lists_every_category() {
        let tooltip = Tooltip::new(&datum("Polluted", 3, 4, &["Pond", "Well", "Tank"]));
        assert_eq!(
            tooltip.lines(),
            vec![
                "Polluted",
                "Count: 3",
                "Percentage: 75%",
                "Types:",
                "• Pond",
                "• Well",
                "• Tank",
            ]
        );
    }

    #[test]
    fn test_slice_label_suppressed_for_zero() {
        assert_eq!(slice_label(0, 10), None);
        assert_eq!(slice_label(1, 8), Some("13%".to_string()));
        assert_eq!(slice_label(4, 4), Some("100%".to_string()));
    }

    #[test]
    fn test_empty_data_builds_no_data_view() {
        let view = ChartView::build(
            DEFAULT_TITLE,
            &[],
            &ConditionPalette::default(),
            DEFAULT_NO_DATA_MESSAGE,
        );
        assert_eq!(
            view,
            ChartView::NoData {
                title: DEFAULT_TITLE.to_string(),
                message: DEFAULT_NO_DATA_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn test_unrecognized_label_gets_fallback_colour() {
        let view = ChartView::build(
            DEFAULT_TITLE,
            &[datum("Silted", 1, 1, &["Pond"])],
            &ConditionPalette::default(),
            DEFAULT_NO_DATA_MESSAGE,
        );
        let ChartView::Chart { slices, .. } = view else {
            panic!("expected a chart");
        };
        assert_eq!(slices[0].color, Rgb::FALLBACK);
        assert_eq!(slices[0].label.as_deref(), Some("100%"));
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let view = ChartView::build("Title", &[], &ConditionPalette::default(), "none");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "no_data");
        assert_eq!(json["message"], "none");
    }
}
