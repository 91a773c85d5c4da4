use anyhow::Result;
use gp_snapshot::cli::{parse_args, Cli, Commands};
use gp_snapshot::commands::{self, ChartOptions};
use gp_snapshot::config::{self, SnapshotConfig};
use gp_snapshot::observability::init_logging;
use gp_snapshot::SnapshotError;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_args();
    init_logging(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    }
}

// 2 for mistakes in input, flags or config; 1 for everything else
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let user_fixable = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<SnapshotError>())
        .any(SnapshotError::is_user_fixable);
    if user_fixable {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => commands::init::init_config(force),
        Commands::Chart {
            input,
            user,
            village,
            format,
            output,
            cookie,
            plain,
            color,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            let options = ChartOptions {
                input,
                user,
                village,
                format,
                output,
                cookie,
                plain,
                color,
            };
            commands::chart::run(options, &config)
        }
        Commands::Villages { input, user } => {
            let config = resolve_config(cli.config.as_deref())?;
            commands::villages::run(&input, user.as_deref(), &config)
        }
        Commands::Locale { cookie, switch_to } => {
            let config = resolve_config(cli.config.as_deref())?;
            commands::locale::run(cookie.as_deref(), switch_to.as_deref(), &config.locale)
        }
    }
}

// An explicit --config must load; discovery falls back to defaults
fn resolve_config(explicit: Option<&Path>) -> Result<SnapshotConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_file(path)?),
        None => Ok(config::load_config()),
    }
}
