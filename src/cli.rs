use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::formatting::ColorMode;
use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "gp-snapshot")]
#[command(about = "Condition charts and village summaries from GP survey submissions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .gpsnapshot.toml)
    #[arg(long, global = true, env = "GP_SNAPSHOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate records of the latest submission by condition and render the chart
    Chart {
        /// Exported submission document(s) in JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Only consider submissions of this user
        #[arg(short, long)]
        user: Option<String>,

        /// Village to chart, or "All"
        #[arg(long, default_value = "All")]
        village: String,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Value of the translation cookie, e.g. "/auto/or"
        #[arg(long)]
        cookie: Option<String>,

        /// Disable colours
        #[arg(long)]
        plain: bool,

        /// Colour output: auto, always or never
        #[arg(long, value_name = "WHEN", value_parser = parse_color_mode)]
        color: Option<ColorMode>,
    },

    /// List the village selector options of the latest submission
    Villages {
        /// Exported submission document(s) in JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Only consider submissions of this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show the display language and the cookie value for switching
    Locale {
        /// Current value of the translation cookie
        #[arg(long)]
        cookie: Option<String>,

        /// Language to switch to
        #[arg(long = "switch")]
        switch_to: Option<String>,
    },

    /// Write a default .gpsnapshot.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

fn parse_color_mode(value: &str) -> Result<ColorMode, String> {
    ColorMode::parse(value).ok_or_else(|| format!("expected auto, always or never, got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chart_defaults() {
        let cli = Cli::try_parse_from(["gp-snapshot", "chart", "--input", "export.json"]).unwrap();
        match cli.command {
            Commands::Chart {
                village,
                format,
                plain,
                color,
                ..
            } => {
                assert_eq!(village, "All");
                assert_eq!(format, None);
                assert!(!plain);
                assert_eq!(color, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_chart_color_flag() {
        let args = ["gp-snapshot", "chart", "-i", "export.json", "--color", "ALWAYS"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Commands::Chart { color, .. } = cli.command else {
            panic!("expected chart");
        };
        assert_eq!(color, Some(ColorMode::Always));

        let args = ["gp-snapshot", "chart", "-i", "export.json", "--color", "sometimes"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_global_verbosity() {
        let cli = Cli::try_parse_from(["gp-snapshot", "locale", "-vv"]).unwrap();
        assert_eq!(cli.verbosity, 2);
    }
}
