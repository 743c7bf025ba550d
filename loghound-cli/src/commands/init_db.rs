//! `loghound init-db` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use loghound_core::config::LoghoundConfig;
use loghound_store::LogStore;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `init-db` command.
///
/// Opens the configured database, creating the file, parent directories
/// and schema if they do not exist. Safe to run repeatedly.
pub async fn execute(config: &LoghoundConfig, writer: &OutputWriter) -> Result<(), CliError> {
    info!(db_path = %config.storage.db_path, "initialising database");

    let store = LogStore::open(&config.storage.db_path)?;
    drop(store);

    let report = InitDbReport {
        db_path: config.storage.db_path.clone(),
    };
    writer.render(&report)?;

    Ok(())
}

/// Database initialisation report.
#[derive(Serialize)]
pub struct InitDbReport {
    /// Path to the SQLite database file.
    pub db_path: String,
}

impl Render for InitDbReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Database ready: {}", self.db_path.bold())?;
        Ok(())
    }
}
