//! 조회/집계 엔진 — 동적 필터, 최신 N, 레벨 통계, 호스트/메시지 집계
//!
//! 모든 선택 조건은 AND로 결합됩니다. 값이 없거나 빈 문자열인 필드는
//! "조건 없음"이지 빈 문자열 일치가 아닙니다. 일치하는 행이 없는
//! 조회는 에러가 아니라 빈 결과입니다.

use rusqlite::params_from_iter;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::LogStore;

/// 조회 필터 — 모든 필드가 선택 사항입니다.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// 정확히 일치하는 레벨 토큰 (예: "ERROR")
    pub level: Option<String>,
    /// 메시지 부분 문자열
    pub contains: Option<String>,
    /// 정확히 일치하는 호스트
    pub host: Option<String>,
    /// 정확히 일치하는 source 태그
    pub source: Option<String>,
    /// 타임스탬프 하한 (포함)
    pub since: Option<String>,
    /// 타임스탬프 상한 (포함)
    pub until: Option<String>,
}

/// 기본 조회 결과 행
#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    pub timestamp: String,
    pub source: String,
    pub level: String,
    pub host: String,
    pub message: String,
}

/// 대시보드용 상세 행 — id와 원인 컬럼을 포함합니다.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedRow {
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub level: String,
    pub host: String,
    pub message: String,
    pub cause_group: Option<String>,
    pub cause_reason: Option<String>,
    pub cause_action: Option<String>,
}

/// 전역 요약 집계
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: i64,
    pub errors: i64,
    pub warnings: i64,
    pub first_ts: Option<String>,
    pub last_ts: Option<String>,
}

/// 필터에서 WHERE 절과 파라미터 목록을 만듭니다.
///
/// 모든 파라미터는 TEXT로 바인딩됩니다.
fn build_where(filter: &LogFilter) -> (String, Vec<String>) {
    let mut clauses = vec!["1=1".to_owned()];
    let mut params: Vec<String> = Vec::new();

    if let Some(level) = filter.level.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("level = ?".to_owned());
        params.push(level.to_owned());
    }
    if let Some(contains) = filter.contains.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("message LIKE ?".to_owned());
        params.push(format!("%{contains}%"));
    }
    if let Some(host) = filter.host.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("host = ?".to_owned());
        params.push(host.to_owned());
    }
    if let Some(source) = filter.source.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("source = ?".to_owned());
        params.push(source.to_owned());
    }
    if let Some(since) = filter.since.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("timestamp >= ?".to_owned());
        params.push(since.to_owned());
    }
    if let Some(until) = filter.until.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("timestamp <= ?".to_owned());
        params.push(until.to_owned());
    }

    (clauses.join(" AND "), params)
}

impl LogStore {
    /// 타임스탬프 내림차순으로 최근 레코드를 반환합니다.
    pub fn latest(&self, limit: u32) -> Result<Vec<LogRow>, StoreError> {
        let sql = format!(
            "SELECT timestamp, source, level, host, message
             FROM logs
             ORDER BY timestamp DESC
             LIMIT {limit}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], row_to_log_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 레벨별 레코드 수를 개수 내림차순으로 반환합니다.
    pub fn count_by_level(&self) -> Result<Vec<(String, i64)>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT level, COUNT(*) AS count
             FROM logs
             GROUP BY level
             ORDER BY count DESC",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 필터 조건에 맞는 레코드를 반환합니다.
    pub fn filter_logs(
        &self,
        filter: &LogFilter,
        asc: bool,
        limit: u32,
    ) -> Result<Vec<LogRow>, StoreError> {
        let (where_clause, params) = build_where(filter);
        let order = if asc { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT timestamp, source, level, host, message
             FROM logs
             WHERE {where_clause}
             ORDER BY timestamp {order}
             LIMIT {limit}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params), row_to_log_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 필터 조건에 맞는 호스트별 레코드 수를 개수 내림차순으로
    /// 반환합니다.
    pub fn distinct_hosts(
        &self,
        filter: &LogFilter,
        limit: u32,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let (where_clause, params) = build_where(filter);
        let sql = format!(
            "SELECT host, COUNT(*) AS count
             FROM logs
             WHERE {where_clause}
             GROUP BY host
             ORDER BY count DESC
             LIMIT {limit}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 가장 빈번한 메시지를 `(개수, 메시지)`로 반환합니다.
    ///
    /// 레벨이 지정되지 않았으면 ERROR가 기본값입니다.
    pub fn top_messages(
        &self,
        filter: &LogFilter,
        limit: u32,
    ) -> Result<Vec<(i64, String)>, StoreError> {
        let mut filter = filter.clone();
        if filter.level.as_deref().filter(|s| !s.is_empty()).is_none() {
            filter.level = Some("ERROR".to_owned());
        }

        let (where_clause, params) = build_where(&filter);
        let sql = format!(
            "SELECT COUNT(*) AS count, message
             FROM logs
             WHERE {where_clause}
             GROUP BY message
             ORDER BY count DESC
             LIMIT {limit}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 전역 요약: 총/에러/경고 개수와 처음/마지막 타임스탬프.
    pub fn summary(&self) -> Result<Summary, StoreError> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?;
        let errors: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM logs WHERE level = 'ERROR'",
            [],
            |row| row.get(0),
        )?;
        let warnings: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM logs WHERE level = 'WARNING'",
            [],
            |row| row.get(0),
        )?;
        let (first_ts, last_ts) = self.conn.query_row(
            "SELECT MIN(timestamp), MAX(timestamp) FROM logs",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(Summary {
            total,
            errors,
            warnings,
            first_ts,
            last_ts,
        })
    }

    /// id 내림차순(삽입 역순)으로 상세 행을 반환합니다. 페이지네이션과
    /// 선택적 레벨 필터를 지원합니다.
    pub fn latest_detailed(
        &self,
        limit: u32,
        offset: u32,
        level: Option<&str>,
    ) -> Result<Vec<DetailedRow>, StoreError> {
        let mut params: Vec<String> = Vec::new();
        let mut sql = String::from(
            "SELECT id, timestamp, source, level, host, message,
                    cause_group, cause_reason, cause_action
             FROM logs",
        );
        if let Some(level) = level.filter(|s| !s.is_empty()) {
            sql.push_str(" WHERE level = ?");
            params.push(level.to_owned());
        }
        sql.push_str(&format!(" ORDER BY id DESC LIMIT {limit} OFFSET {offset}"));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| {
                Ok(DetailedRow {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    source: row.get(2)?,
                    level: row.get(3)?,
                    host: row.get(4)?,
                    message: row.get(5)?,
                    cause_group: row.get(6)?,
                    cause_reason: row.get(7)?,
                    cause_action: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn row_to_log_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogRow> {
    Ok(LogRow {
        timestamp: row.get(0)?,
        source: row.get(1)?,
        level: row.get(2)?,
        host: row.get(3)?,
        message: row.get(4)?,
    })
}
