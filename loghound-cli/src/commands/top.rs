//! `loghound top` command handler

use std::io::Write;

use serde::Serialize;

use loghound_core::config::LoghoundConfig;
use loghound_store::LogStore;

use crate::cli::TopArgs;
use crate::commands::filter::build_filter;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `top` command.
///
/// Ranks the most frequent messages under the given filter. When no level
/// is set, the query engine defaults it to ERROR.
pub async fn execute(
    args: TopArgs,
    config: &LoghoundConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let filter = build_filter(&args.opts)?;
    let store = LogStore::open(&config.storage.db_path)?;

    let entries = store
        .top_messages(&filter, args.count)?
        .into_iter()
        .map(|(count, message)| TopEntry { count, message })
        .collect();

    writer.render(&TopReport { entries })?;

    Ok(())
}

/// One ranked message.
#[derive(Serialize)]
pub struct TopEntry {
    pub count: i64,
    pub message: String,
}

/// Frequent-messages report.
#[derive(Serialize)]
pub struct TopReport {
    /// Messages, most frequent first.
    pub entries: Vec<TopEntry>,
}

impl Render for TopReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.entries.is_empty() {
            writeln!(w, "No matching records.")?;
            return Ok(());
        }

        for entry in &self.entries {
            writeln!(w, "{:>8}  {}", entry.count, entry.message)?;
        }
        Ok(())
    }
}
