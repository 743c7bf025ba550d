//! Loghound command-line entry point
//!
//! Parses arguments, loads configuration, initialises tracing and
//! dispatches to the subcommand handlers. Errors are printed to stderr
//! and mapped to exit codes via [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod output;

use std::path::Path;

use clap::Parser;

use loghound_core::config::LoghoundConfig;
use loghound_core::error::{ConfigError, LoghoundError};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli.config).await?;
    init_tracing(&config, cli.log_level.as_deref());
    tracing::debug!(config = %cli.config.display(), "loghound starting");

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::InitDb => commands::init_db::execute(&config, &writer).await,
        Commands::Ingest(args) => commands::ingest::execute(args, &config, &writer).await,
        Commands::Last(args) => commands::last::execute(args, &config, &writer).await,
        Commands::Stats => commands::stats::execute(&config, &writer).await,
        Commands::Filter(args) => commands::filter::execute(args, &config, &writer).await,
        Commands::Top(args) => commands::top::execute(args, &config, &writer).await,
    }
}

/// Load configuration from the given path.
///
/// A missing file is not an error for a local tool: defaults plus
/// `LOGHOUND_*` env overrides apply instead. Any other failure
/// (parse error, invalid value) is fatal.
async fn load_config(path: &Path) -> Result<LoghoundConfig, CliError> {
    match LoghoundConfig::load(path).await {
        Ok(config) => Ok(config),
        Err(LoghoundError::Config(ConfigError::FileNotFound { .. })) => {
            let mut config = LoghoundConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}

/// Initialise the tracing subscriber.
///
/// Logs go to stderr so that stdout stays clean for command output.
/// The CLI `--log-level` flag wins over the configured level.
fn init_tracing(config: &LoghoundConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(&config.general.log_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
