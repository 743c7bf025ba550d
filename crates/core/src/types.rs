//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 모든 파서와 스토어가 공유하는 정규화된 로그 레코드를 정의합니다.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 저장되는 타임스탬프의 정규 형식 (`YYYY-MM-DD HH:MM:SS`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 정규화된 로그 레코드
///
/// 모든 소스(syslog, Zabbix 데몬 로그, PHP 에러 로그, 업로드 텍스트)의
/// 라인이 이 형태로 변환되어 저장됩니다. 한 번 저장된 레코드는
/// 수정되지 않습니다 (append-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// 타임스탬프 — 라인에 없으면 파서가 현재 시각으로 합성
    pub timestamp: NaiveDateTime,
    /// 소스 태그 (`syslog`, `zabbix_server_raw`, `upload:<파일명>` 등)
    pub source: String,
    /// 심각도
    pub level: Level,
    /// 호스트명 — 라인에 없으면 호출자가 준 별칭
    pub host: String,
    /// 구조 필드를 제거한 나머지 원문
    pub message: String,
    /// 원인 추론 결과 — PHP 파서를 거친 라인에만 존재
    ///
    /// `Option<Cause>`로 묶어 세 필드가 전부 있거나 전부 없음을
    /// 타입으로 보장합니다.
    pub cause: Option<Cause>,
}

impl LogRecord {
    /// 정규 형식의 타임스탬프 문자열을 반환합니다.
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {}: {}",
            self.level,
            self.timestamp_str(),
            self.source,
            self.host,
            self.message,
        )
    }
}

/// 원인 추론 결과
///
/// 메시지 본문에서 도출한 대략적인 장애 분류와 사람이 읽을 수 있는
/// 사유/권장 조치입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// 장애 분류 (`network`, `aplicacao` 등)
    pub group: String,
    /// 사유 설명
    pub reason: String,
    /// 권장 조치
    pub action: String,
}

/// 심각도 레벨
///
/// 파서마다 `WARN`과 `WARNING`을 다르게 내보내는 비일관성이 있으며,
/// 기존 저장 데이터와의 호환을 위해 정규화하지 않고 그대로 보존합니다.
/// `NOTICE`는 범용 폴백 파서만 내보냅니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// 디버그
    Debug,
    /// 정보성 이벤트
    #[default]
    Info,
    /// 공지 (폴백 파서 전용)
    Notice,
    /// 경고 — syslog/Zabbix 파서 표기
    Warn,
    /// 경고 — PHP/폴백 파서 표기
    Warning,
    /// 에러
    Error,
    /// 치명적 — 즉시 대응 필요
    Critical,
}

impl Level {
    /// 저장/출력에 쓰이는 리터럴 토큰을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warn => "WARN",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// 문자열에서 심각도를 파싱합니다. 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "NOTICE" => Some(Self::Notice),
            "WARN" => Some(Self::Warn),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" | "CRIT" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 27)
            .unwrap()
            .and_hms_opt(15, 30, 45)
            .unwrap()
    }

    #[test]
    fn level_display_matches_stored_tokens() {
        assert_eq!(Level::Debug.to_string(), "DEBUG");
        assert_eq!(Level::Info.to_string(), "INFO");
        assert_eq!(Level::Notice.to_string(), "NOTICE");
        assert_eq!(Level::Warn.to_string(), "WARN");
        assert_eq!(Level::Warning.to_string(), "WARNING");
        assert_eq!(Level::Error.to_string(), "ERROR");
        assert_eq!(Level::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn level_warn_and_warning_are_distinct() {
        // 파서 간 비일관성을 일부러 보존하므로 두 변형은 같지 않다.
        assert_ne!(Level::Warn, Level::Warning);
    }

    #[test]
    fn level_from_str_loose() {
        assert_eq!(Level::from_str_loose("error"), Some(Level::Error));
        assert_eq!(Level::from_str_loose("WARN"), Some(Level::Warn));
        assert_eq!(Level::from_str_loose("Warning"), Some(Level::Warning));
        assert_eq!(Level::from_str_loose("crit"), Some(Level::Critical));
        assert_eq!(Level::from_str_loose("unknown"), None);
    }

    #[test]
    fn level_default_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn timestamp_str_uses_canonical_format() {
        let record = LogRecord {
            timestamp: sample_timestamp(),
            source: "syslog".to_owned(),
            level: Level::Error,
            host: "host1".to_owned(),
            message: "something failed".to_owned(),
            cause: None,
        };
        assert_eq!(record.timestamp_str(), "2024-11-27 15:30:45");
    }

    #[test]
    fn record_display_contains_fields() {
        let record = LogRecord {
            timestamp: sample_timestamp(),
            source: "zabbix_server".to_owned(),
            level: Level::Info,
            host: "srvzbx".to_owned(),
            message: "Starting Zabbix Server".to_owned(),
            cause: None,
        };
        let display = record.to_string();
        assert!(display.contains("INFO"));
        assert!(display.contains("srvzbx"));
        assert!(display.contains("Starting Zabbix Server"));
    }

    #[test]
    fn record_serialize_roundtrip() {
        let record = LogRecord {
            timestamp: sample_timestamp(),
            source: "upload:php_errors.log".to_owned(),
            level: Level::Warning,
            host: "upload-host".to_owned(),
            message: "cURL error".to_owned(),
            cause: Some(Cause {
                group: "network".to_owned(),
                reason: "connection refused".to_owned(),
                action: "check firewall".to_owned(),
            }),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: LogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.level, Level::Warning);
        assert_eq!(parsed.cause.unwrap().group, "network");
    }
}
