//! `loghound ingest` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use loghound_core::config::LoghoundConfig;
use loghound_core::pipeline::ParseOptions;
use loghound_pipeline::{Ingestor, ZabbixKind};
use loghound_store::LogStore;

use crate::cli::{IngestArgs, IngestSource};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `ingest` command.
///
/// Opens the configured store and runs one sequential ingestion pass over
/// the input file. The `--host` alias, when given, overrides the configured
/// default host (and the per-daemon default for Zabbix sources).
pub async fn execute(
    args: IngestArgs,
    config: &LoghoundConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut store = LogStore::open(&config.storage.db_path)?;

    // Zabbix daemon logs carry no host field, so the daemon name is the
    // default alias unless --host says otherwise.
    let (kind, path, host) = match args.source {
        IngestSource::Syslog { path, host } => ("syslog", path, host),
        IngestSource::ZabbixServer { path, host } => (
            "zabbix-server",
            path,
            host.or_else(|| Some(ZabbixKind::Server.default_host().to_owned())),
        ),
        IngestSource::ZabbixProxy { path, host } => (
            "zabbix-proxy",
            path,
            host.or_else(|| Some(ZabbixKind::Proxy.default_host().to_owned())),
        ),
        IngestSource::Upload { path, host } => ("upload", path, host),
    };

    let opts = ParseOptions {
        default_host: host.unwrap_or_else(|| config.ingest.default_host.clone()),
        year_hint: config.ingest.year_hint,
    };

    info!(kind, path = %path.display(), "starting ingestion");

    let mut ingestor = Ingestor::new(&mut store, opts, config.ingest.sniff_max_bytes);
    let records = match kind {
        "syslog" => ingestor.ingest_syslog(&path)?,
        "zabbix-server" => ingestor.ingest_zabbix_server(&path)?,
        "zabbix-proxy" => ingestor.ingest_zabbix_proxy(&path)?,
        _ => ingestor.ingest_upload(&path)?,
    };

    let report = IngestReport {
        kind: kind.to_owned(),
        path: path.display().to_string(),
        records,
    };
    writer.render(&report)?;

    Ok(())
}

/// Ingestion result report.
#[derive(Serialize)]
pub struct IngestReport {
    /// Input kind (syslog, zabbix-server, zabbix-proxy, upload).
    pub kind: String,
    /// Input file path.
    pub path: String,
    /// Number of records written to the store.
    pub records: u64,
}

impl Render for IngestReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Ingested {} records from {} ({})",
            self.records.to_string().bold(),
            self.path,
            self.kind
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_report_render_text() {
        let report = IngestReport {
            kind: "syslog".to_owned(),
            path: "/var/log/messages".to_owned(),
            records: 120,
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("120"));
        assert!(output.contains("/var/log/messages"));
        assert!(output.contains("syslog"));
    }

    #[test]
    fn test_ingest_report_json() {
        let report = IngestReport {
            kind: "upload".to_owned(),
            path: "./php_errors.log".to_owned(),
            records: 3,
        };

        let json = serde_json::to_string(&report).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");
        assert_eq!(parsed["kind"].as_str(), Some("upload"));
        assert_eq!(parsed["records"].as_u64(), Some(3));
    }

    #[test]
    fn test_ingest_report_zero_records() {
        let report = IngestReport {
            kind: "zabbix-proxy".to_owned(),
            path: "empty.log".to_owned(),
            records: 0,
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Ingested 0 records"));
    }
}
