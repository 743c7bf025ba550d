//! SQLite 레코드 스토어 — 열기, 스키마, append-only 삽입
//!
//! 레코드는 한 번 쓰이면 수정/삭제되지 않습니다. 각 삽입은 독립적으로
//! 즉시 커밋되는 한 문장입니다.

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::debug;

use loghound_core::error::LoghoundError;
use loghound_core::pipeline::RecordSink;
use loghound_core::types::LogRecord;

use crate::error::StoreError;

/// SQLite 기반 로그 스토어
pub struct LogStore {
    pub(crate) conn: Connection,
}

impl LogStore {
    /// 데이터베이스를 열고 스키마를 준비합니다.
    ///
    /// 부모 디렉토리가 없으면 만들고, WAL 저널 모드와 NORMAL 동기화
    /// 수준을 설정합니다.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).map_err(|e| StoreError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// logs 테이블과 보조 인덱스를 멱등하게 생성합니다.
    ///
    /// 조회 엔진은 `(level, timestamp)`와 `(host, timestamp)` 조회가
    /// 저렴하다고 가정합니다.
    pub fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT,
                source TEXT,
                level TEXT,
                host TEXT,
                message TEXT,
                cause_group TEXT,
                cause_reason TEXT,
                cause_action TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_logs_level_ts
             ON logs(level, timestamp)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_logs_host_ts
             ON logs(host, timestamp)",
            [],
        )?;

        Ok(())
    }

    /// 레코드 하나를 삽입합니다.
    pub fn insert_record(&self, record: &LogRecord) -> Result<(), StoreError> {
        let (cause_group, cause_reason, cause_action) = match &record.cause {
            Some(c) => (
                Some(c.group.as_str()),
                Some(c.reason.as_str()),
                Some(c.action.as_str()),
            ),
            None => (None, None, None),
        };

        self.conn.execute(
            "INSERT INTO logs
             (timestamp, source, level, host, message, cause_group, cause_reason, cause_action)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.timestamp_str(),
                record.source,
                record.level.as_str(),
                record.host,
                record.message,
                cause_group,
                cause_reason,
                cause_action,
            ],
        )?;

        debug!(source = %record.source, level = %record.level, "record inserted");
        Ok(())
    }
}

impl RecordSink for LogStore {
    fn insert(&mut self, record: &LogRecord) -> Result<(), LoghoundError> {
        self.insert_record(record).map_err(LoghoundError::from)
    }
}
