//! `loghound last` command handler

use std::io::Write;

use serde::Serialize;

use loghound_core::config::LoghoundConfig;
use loghound_store::{LogRow, LogStore};

use crate::cli::LastArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `last` command.
///
/// Shows the most recent records, newest first.
pub async fn execute(
    args: LastArgs,
    config: &LoghoundConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let store = LogStore::open(&config.storage.db_path)?;
    let rows = store.latest(args.count)?;

    let report = LastReport {
        matched: rows.len(),
        rows,
    };
    writer.render(&report)?;

    Ok(())
}

/// Recent records report.
#[derive(Serialize)]
pub struct LastReport {
    /// Number of rows returned.
    pub matched: usize,
    /// Records, newest first.
    pub rows: Vec<LogRow>,
}

impl Render for LastReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.rows.is_empty() {
            writeln!(w, "No records.")?;
            return Ok(());
        }

        for row in &self.rows {
            writeln!(w, "{}", format_row(row))?;
        }
        writeln!(w, "({} records)", self.matched)?;
        Ok(())
    }
}

/// Format one record as a fixed-width text line with a colorised level.
pub fn format_row(row: &LogRow) -> String {
    use colored::Colorize;

    let level = match row.level.as_str() {
        "CRITICAL" | "ERROR" => row.level.red().bold().to_string(),
        "WARN" | "WARNING" => row.level.yellow().to_string(),
        _ => row.level.clone(),
    };
    format!(
        "{}  {:<8}  {:<16}  {:<14}  {}",
        row.timestamp, level, row.host, row.source, row.message
    )
}
