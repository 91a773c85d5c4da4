//! Presentation contract for proportional charts.
//!
//! Everything a renderer needs beyond the raw [`ChartDatum`](crate::core::ChartDatum)s:
//! slice colours, legend rows, tooltips, on-slice labels and the explicit
//! "no data" view. Renderers in [`crate::io::output`] consume [`ChartView`].

pub mod chart;
pub mod palette;

pub use chart::{
    slice_label, ChartView, LegendEntry, Slice, Tooltip, DEFAULT_NO_DATA_MESSAGE, DEFAULT_TITLE,
};
pub use palette::{ConditionPalette, Rgb};
