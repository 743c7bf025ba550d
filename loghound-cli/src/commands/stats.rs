//! `loghound stats` command handler

use std::io::Write;

use serde::Serialize;

use loghound_core::config::LoghoundConfig;
use loghound_store::LogStore;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `stats` command.
///
/// Shows global counts, the time range covered by the store and the
/// per-level distribution.
pub async fn execute(config: &LoghoundConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let store = LogStore::open(&config.storage.db_path)?;
    let summary = store.summary()?;
    let by_level = store
        .count_by_level()?
        .into_iter()
        .map(|(level, count)| LevelCount { level, count })
        .collect();

    let report = StatsReport {
        total: summary.total,
        errors: summary.errors,
        warnings: summary.warnings,
        first_ts: summary.first_ts,
        last_ts: summary.last_ts,
        by_level,
    };
    writer.render(&report)?;

    Ok(())
}

/// Per-level record count.
#[derive(Serialize)]
pub struct LevelCount {
    pub level: String,
    pub count: i64,
}

/// Global statistics report.
#[derive(Serialize)]
pub struct StatsReport {
    pub total: i64,
    pub errors: i64,
    pub warnings: i64,
    pub first_ts: Option<String>,
    pub last_ts: Option<String>,
    /// Per-level counts, most frequent first.
    pub by_level: Vec<LevelCount>,
}

impl Render for StatsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "{}", "Log store statistics".bold())?;
        writeln!(w, "  Total records: {}", self.total)?;
        writeln!(w, "  Errors:        {}", self.errors.to_string().red())?;
        writeln!(w, "  Warnings:      {}", self.warnings.to_string().yellow())?;
        match (&self.first_ts, &self.last_ts) {
            (Some(first), Some(last)) => {
                writeln!(w, "  Range:         {first} .. {last}")?;
            }
            _ => writeln!(w, "  Range:         (empty)")?,
        }

        if !self.by_level.is_empty() {
            writeln!(w)?;
            writeln!(w, "  By level:")?;
            for entry in &self.by_level {
                writeln!(w, "    {:<10} {}", entry.level, entry.count)?;
            }
        }
        Ok(())
    }
}
