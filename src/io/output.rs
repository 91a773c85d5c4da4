use clap::ValueEnum;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::presentation::{ChartView, Rgb, Slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Everything written for one `chart` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartReport {
    pub village: String,
    pub language: String,
    pub view: ChartView,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ChartReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ChartReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_slices(&mut self, slices: &[Slice]) -> anyhow::Result<()> {
        writeln!(self.writer, "| Condition | Count | Percentage | Colour | Types |")?;
        writeln!(self.writer, "|-----------|-------|------------|--------|-------|")?;
        for slice in slices {
            writeln!(
                self.writer,
                "| {} | {} | {}% | `{}` | {} |",
                escape_cell(&slice.datum.label),
                slice.datum.count,
                slice.datum.percentage,
                slice.color,
                escape_cell(&slice.datum.categories.join(", ")),
            )?;
        }
        writeln!(self.writer)?;

        let legend: Vec<_> = slices.iter().map(|s| s.legend.text.as_str()).collect();
        writeln!(self.writer, "**Legend:** {}", legend.join(" · "))?;
        if let Some(first) = slices.first() {
            writeln!(self.writer)?;
            writeln!(self.writer, "Total records: {}", first.datum.total_count)?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ChartReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", report.view.title())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Village: {}", report.village)?;
        writeln!(self.writer)?;
        match &report.view {
            ChartView::Chart { slices, .. } => self.write_slices(slices)?,
            ChartView::NoData { message, .. } => writeln!(self.writer, "_{message}_")?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    use_color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, use_color: bool) -> Self {
        Self { writer, use_color }
    }

    fn slice_table(&self, slices: &[Slice]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["", "Condition", "Count", "Share", "Types"]);
        if self.use_color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }

        for slice in slices {
            table.add_row(vec![
                Cell::new("●").fg(to_table_color(slice.color)),
                Cell::new(&slice.datum.label),
                Cell::new(slice.datum.count).set_alignment(CellAlignment::Right),
                Cell::new(slice.label.as_deref().unwrap_or("")).set_alignment(CellAlignment::Right),
                Cell::new(slice.datum.categories.join("\n")),
            ]);
        }
        table
    }

    fn swatch(&self, color: Rgb) -> String {
        if self.use_color {
            "●".truecolor(color.0, color.1, color.2).to_string()
        } else {
            "●".to_string()
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ChartReport) -> anyhow::Result<()> {
        let title = report.view.title();
        if self.use_color {
            writeln!(self.writer, "{}", title.bold())?;
        } else {
            writeln!(self.writer, "{title}")?;
        }
        writeln!(self.writer, "Village: {}", report.village)?;
        writeln!(self.writer)?;

        match &report.view {
            ChartView::Chart { slices, .. } => {
                writeln!(self.writer, "{}", self.slice_table(slices))?;
                let legend: Vec<_> = slices
                    .iter()
                    .map(|s| format!("{} {}", self.swatch(s.legend.color), s.legend.text))
                    .collect();
                writeln!(self.writer, "{}", legend.join("   "))?;
            }
            ChartView::NoData { message, .. } => {
                if self.use_color {
                    writeln!(self.writer, "{}", message.dimmed())?;
                } else {
                    writeln!(self.writer, "{message}")?;
                }
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn to_table_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
    use_color: bool,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, use_color)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChartDatum;
    use crate::presentation::{ConditionPalette, DEFAULT_NO_DATA_MESSAGE, DEFAULT_TITLE};

    fn report(data: &[ChartDatum]) -> ChartReport {
        ChartReport {
            village: "Alpha".to_string(),
            language: "en".to_string(),
            view: ChartView::build(
                DEFAULT_TITLE,
                data,
                &ConditionPalette::default(),
                DEFAULT_NO_DATA_MESSAGE,
            ),
        }
    }

    fn sample() -> Vec<ChartDatum> {
        vec![
            ChartDatum {
                label: "Clean".into(),
                count: 2,
                total_count: 3,
                categories: vec!["Pond".into(), "Well".into()],
                percentage: 67,
            },
            ChartDatum {
                label: "Unknown".into(),
                count: 1,
                total_count: 3,
                categories: vec!["Tank".into()],
                percentage: 33,
            },
        ]
    }

    fn render(format: OutputFormat, report: &ChartReport) -> String {
        let mut buffer = Vec::new();
        create_writer(format, Box::new(&mut buffer), false)
            .write_report(report)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_markdown_chart() {
        let output = render(OutputFormat::Markdown, &report(&sample()));
        assert!(output.starts_with("# Water Bodies by Condition\n"));
        assert!(output.contains("| Clean | 2 | 67% | `#4CAF50` | Pond, Well |"));
        assert!(output.contains("**Legend:** Clean (67%) · Unknown (33%)"));
        assert!(output.contains("Total records: 3"));
    }

    #[test]
    fn test_markdown_no_data() {
        let output = render(OutputFormat::Markdown, &report(&[]));
        assert!(output.contains("_No data available for the selected village_"));
        assert!(!output.contains("| Condition |"));
    }

    #[test]
    fn test_json_round_trips_view_kind() {
        let output = render(OutputFormat::Json, &report(&sample()));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["village"], "Alpha");
        assert_eq!(value["view"]["kind"], "chart");
        assert_eq!(value["view"]["slices"][0]["datum"]["percentage"], 67);
        assert_eq!(value["view"]["slices"][1]["color"], "#9E9E9E");
    }

    #[test]
    fn test_terminal_plain_has_no_escape_codes() {
        let output = render(OutputFormat::Terminal, &report(&sample()));
        assert!(output.contains("Clean (67%)"));
        assert!(output.contains("Unknown (33%)"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_terminal_no_data() {
        let output = render(OutputFormat::Terminal, &report(&[]));
        assert!(output.contains("No data available for the selected village"));
    }

    #[test]
    fn test_escape_pipe_in_markdown_cells() {
        assert_eq!(escape_cell("Pond|Tank"), "Pond\\|Tank");
    }
}
