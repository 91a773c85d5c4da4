use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::aggregation::aggregate_value;
use crate::config::SnapshotConfig;
use crate::core::LocationFilter;
use crate::formatting::{ColorMode, FormattingConfig};
use crate::io::{self, ChartReport, OutputFormat};
use crate::locale::LocaleState;
use crate::presentation::ChartView;
use crate::snapshot::{load_documents, require_latest};

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub input: PathBuf,
    pub user: Option<String>,
    pub village: String,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub cookie: Option<String>,
    pub plain: bool,
    pub color: Option<ColorMode>,
}

pub fn run(options: ChartOptions, config: &SnapshotConfig) -> Result<()> {
    let documents = load_documents(&options.input)?;
    let submission = require_latest(&documents, options.user.as_deref())?;
    info!(
        user = %submission.user_id,
        submitted_at = %submission.submitted_at,
        "using submission"
    );

    let report = build_report(
        submission.records_value(&config.snapshot.records_field),
        &options,
        config,
    );

    let format = options
        .format
        .or(config.output.default_format)
        .unwrap_or(OutputFormat::Terminal);
    let use_color = formatting_for(&options).apply();

    let destination = io::open_destination(options.output.as_deref())?;
    io::create_writer(format, destination, use_color)
        .write_report(&report)
        .context("failed to write chart")?;
    Ok(())
}

fn formatting_for(options: &ChartOptions) -> FormattingConfig {
    match (options.plain, options.color) {
        (true, _) => FormattingConfig::plain(),
        (false, Some(mode)) => FormattingConfig::new(mode),
        (false, None) if options.output.is_some() => FormattingConfig::plain(),
        (false, None) => FormattingConfig::from_env(),
    }
}

/// Aggregate `records` for the selected village and wrap the view for output.
pub fn build_report(
    records: &serde_json::Value,
    options: &ChartOptions,
    config: &SnapshotConfig,
) -> ChartReport {
    let filter = LocationFilter::parse(&options.village);
    let data = aggregate_value(records, &filter);
    let locale = LocaleState::resolve(options.cookie.as_deref(), &config.locale);

    ChartReport {
        village: filter.to_string(),
        language: locale.current().to_string(),
        view: ChartView::build(
            &config.chart.title,
            &data,
            &config.chart.palette(),
            &config.chart.no_data_message,
        ),
    }
}
