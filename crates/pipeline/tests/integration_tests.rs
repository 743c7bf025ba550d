//! 파이프라인 통합 테스트 — 공개 API만으로 수집 경로 전체를 검증

use std::fs::File;
use std::io::Write;

use loghound_core::error::LoghoundError;
use loghound_core::pipeline::{ParseOptions, RecordSink};
use loghound_core::types::{Level, LogRecord};
use loghound_pipeline::{Ingestor, PipelineError};

struct VecSink {
    records: Vec<LogRecord>,
}

impl RecordSink for VecSink {
    fn insert(&mut self, record: &LogRecord) -> Result<(), LoghoundError> {
        self.records.push(record.clone());
        Ok(())
    }
}

fn write_temp(content: &[u8], name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(content).unwrap();
    (dir, path)
}

fn opts() -> ParseOptions {
    ParseOptions {
        default_host: "it-host".to_owned(),
        year_hint: Some(2024),
    }
}

#[test]
fn mixed_upload_file_end_to_end() {
    let content = b"[02-Oct-2025 15:59:40 Europe/Berlin] PHP Notice: cURL error: Failed to connect to 192.168.0.204 port 8443: Connection refused in /x.php\n\
[02-Oct-2025 16:00:00 Europe/Berlin] PHP Fatal error: Uncaught Exception in /y.php\n\
2024-11-27 15:30:45 WARNING disk usage above threshold\n\
an entirely free-form line with no structure\n\
\n";
    let (_dir, path) = write_temp(content, "mixed.log");

    let mut sink = VecSink { records: Vec::new() };
    let mut ingestor = Ingestor::new(&mut sink, opts(), 8192);
    let count = ingestor.ingest_upload(&path).unwrap();
    assert_eq!(count, 4);

    // PHP 라인: WARNING + network 원인
    let first = &sink.records[0];
    assert_eq!(first.source, "upload:mixed.log");
    assert_eq!(first.level, Level::Warning);
    let cause = first.cause.as_ref().unwrap();
    assert_eq!(cause.group, "network");
    assert!(cause.reason.contains("192.168.0.204:8443"));

    // PHP fatal: ERROR + aplicacao 원인
    let second = &sink.records[1];
    assert_eq!(second.level, Level::Error);
    assert_eq!(second.cause.as_ref().unwrap().group, "aplicacao");

    // ISO 라인: 범용 구조화, 원인 없음
    let third = &sink.records[2];
    assert_eq!(third.timestamp_str(), "2024-11-27 15:30:45");
    assert_eq!(third.level, Level::Warning);
    assert!(third.cause.is_none());

    // 자유 형식 라인: 범용 raw
    let fourth = &sink.records[3];
    assert_eq!(fourth.message, "an entirely free-form line with no structure");
    assert_eq!(fourth.level, Level::Info);
    assert_eq!(fourth.host, "it-host");
}

#[test]
fn zabbix_server_and_proxy_use_distinct_tags() {
    let content = b"1234:20241127:153045.100 Starting Zabbix Server\n";
    let (_dir, server_path) = write_temp(content, "zabbix_server.log");
    let (_dir2, proxy_path) = write_temp(content, "zabbix_proxy.log");

    let mut sink = VecSink { records: Vec::new() };
    let mut ingestor = Ingestor::new(&mut sink, opts(), 8192);
    ingestor.ingest_zabbix_server(&server_path).unwrap();
    ingestor.ingest_zabbix_proxy(&proxy_path).unwrap();

    assert_eq!(sink.records[0].source, "zabbix_server");
    assert_eq!(sink.records[1].source, "zabbix_proxy");
}

#[test]
fn upload_gate_rejects_prose_document() {
    let content = b"Dear colleague,\n\
this message has nothing to do with machine logs.\n\
It is simply a short note.\n\
Kind regards\n";
    let (_dir, path) = write_temp(content, "letter.doc");

    let mut sink = VecSink { records: Vec::new() };
    let mut ingestor = Ingestor::new(&mut sink, opts(), 8192);
    let err = ingestor.ingest_upload(&path).unwrap_err();
    assert!(matches!(err, PipelineError::NotALogFile { .. }));
    assert!(sink.records.is_empty());
}
