//! `loghound filter` command handler

use std::io::Write;

use serde::Serialize;

use loghound_core::config::LoghoundConfig;
use loghound_core::types::Level;
use loghound_store::{LogFilter, LogRow, LogStore, apply_preset, preset_names};

use crate::cli::{FilterArgs, FilterOpts};
use crate::commands::last::format_row;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `filter` command.
pub async fn execute(
    args: FilterArgs,
    config: &LoghoundConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let filter = build_filter(&args.opts)?;
    let store = LogStore::open(&config.storage.db_path)?;

    if args.distinct_hosts {
        let hosts = store
            .distinct_hosts(&filter, args.count)?
            .into_iter()
            .map(|(host, count)| HostCount { host, count })
            .collect();
        writer.render(&HostsReport { hosts })?;
        return Ok(());
    }

    let rows = store.filter_logs(&filter, args.asc, args.count)?;
    let report = FilterReport {
        matched: rows.len(),
        rows,
    };
    writer.render(&report)?;

    Ok(())
}

/// Build a [`LogFilter`] from CLI options, merging a preset if named.
///
/// An explicit `--level` is validated and normalized to its stored token
/// (`error` becomes `ERROR`). Explicit options always win; the preset
/// fills only unset fields. An unknown level or preset name is a
/// command error.
pub fn build_filter(opts: &FilterOpts) -> Result<LogFilter, CliError> {
    let level = opts
        .level
        .as_deref()
        .map(|token| match Level::from_str_loose(token) {
            Some(level) => Ok(level.as_str().to_owned()),
            None => Err(CliError::Command(format!(
                "unknown level: {token} (expected: DEBUG, INFO, NOTICE, WARN, WARNING, ERROR, CRITICAL)"
            ))),
        })
        .transpose()?;

    let mut filter = LogFilter {
        level,
        contains: opts.contains.clone(),
        host: opts.host.clone(),
        source: opts.source.clone(),
        since: opts.since.clone(),
        until: opts.until.clone(),
    };

    if let Some(name) = opts.preset.as_deref() {
        if !apply_preset(name, &mut filter) {
            return Err(CliError::Command(format!(
                "unknown preset: {} (expected: {})",
                name,
                preset_names().join(", ")
            )));
        }
    }

    Ok(filter)
}

/// Filtered records report.
#[derive(Serialize)]
pub struct FilterReport {
    /// Number of rows returned.
    pub matched: usize,
    /// Matching records.
    pub rows: Vec<LogRow>,
}

impl Render for FilterReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.rows.is_empty() {
            writeln!(w, "No matching records.")?;
            return Ok(());
        }

        for row in &self.rows {
            writeln!(w, "{}", format_row(row))?;
        }
        writeln!(w, "({} records)", self.matched)?;
        Ok(())
    }
}

/// Per-host record count.
#[derive(Serialize)]
pub struct HostCount {
    pub host: String,
    pub count: i64,
}

/// Per-host aggregation report.
#[derive(Serialize)]
pub struct HostsReport {
    /// Hosts with matching records, most frequent first.
    pub hosts: Vec<HostCount>,
}

impl Render for HostsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.hosts.is_empty() {
            writeln!(w, "No matching records.")?;
            return Ok(());
        }

        for entry in &self.hosts {
            writeln!(w, "{:>8}  {}", entry.count, entry.host)?;
        }
        Ok(())
    }
}
