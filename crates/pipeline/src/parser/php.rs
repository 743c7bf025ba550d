//! PHP 에러 로그 파서
//!
//! `[DD-Mon-YYYY HH:MM:SS TZ] PHP <레벨>: <나머지>` 형식을 구조화하고,
//! 매칭된 라인에는 무조건 원인 추론을 수행합니다.
//!
//! PHP의 Notice는 INFO가 아니라 WARNING으로 매핑합니다.

use chrono::{NaiveDateTime, Utc};
use regex::Regex;

use loghound_core::pipeline::{LineParser, ParseOptions};
use loghound_core::types::{Level, LogRecord};

use crate::cause::infer_cause;

/// PHP 에러 로그 라인 파서
///
/// source 태그는 호출자가 지정합니다(업로드 수집에서는
/// `upload:<파일명>`).
pub struct PhpErrorParser {
    source: String,
    pattern: Regex,
}

impl PhpErrorParser {
    /// 지정한 source 태그로 파서를 생성합니다.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            pattern: Regex::new(
                r"(?i)^\[(?P<ts>\d{2}-[A-Za-z]{3}-\d{4}\s+\d{2}:\d{2}:\d{2})\s+(?P<tz>[^\]]+)\]\s+PHP\s+(?P<php_level>Notice|Warning|Fatal error|Parse error|Deprecated|Error):\s+(?P<rest>.*)$",
            )
            .unwrap(),
        }
    }

    /// PHP 레벨 토큰을 내부 심각도로 매핑합니다.
    fn map_level(php_level: &str) -> Level {
        let lower = php_level.to_lowercase();
        if lower.contains("fatal") || lower.contains("error") {
            Level::Error
        } else if lower.contains("warning") {
            Level::Warning
        } else if lower.contains("notice") {
            Level::Warning
        } else {
            Level::Info
        }
    }
}

impl LineParser for PhpErrorParser {
    fn source_tag(&self) -> &str {
        &self.source
    }

    fn try_structured(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord> {
        let caps = self.pattern.captures(line)?;

        // 타임스탬프 파싱 실패는 라인 거부가 아니라 현재 UTC 시각으로 대체
        let timestamp = NaiveDateTime::parse_from_str(&caps["ts"], "%d-%b-%Y %H:%M:%S")
            .unwrap_or_else(|_| Utc::now().naive_utc());

        let rest = caps["rest"].trim().to_owned();
        let cause = infer_cause(&rest);

        Some(LogRecord {
            timestamp,
            source: self.source.clone(),
            level: Self::map_level(&caps["php_level"]),
            host: opts.default_host.clone(),
            message: rest,
            cause: Some(cause),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions {
            default_host: "upload-host".to_owned(),
            year_hint: None,
        }
    }

    #[test]
    fn parses_curl_notice_line() {
        let parser = PhpErrorParser::new("upload:php_errors.log");
        let line = "[02-Oct-2025 15:59:40 Europe/Berlin] PHP Notice: cURL error: Failed to connect to 192.168.0.204 port 8443: Connection refused in /x.php";
        let record = parser.try_structured(line, &opts()).unwrap();

        assert_eq!(record.timestamp_str(), "2025-10-02 15:59:40");
        assert_eq!(record.source, "upload:php_errors.log");
        assert_eq!(record.level, Level::Warning);
        assert_eq!(record.host, "upload-host");
        // 저장 메시지는 " in ..." 꼬리를 포함한 전체 rest
        assert!(record.message.ends_with("in /x.php"));

        let cause = record.cause.unwrap();
        assert_eq!(cause.group, "network");
        assert!(cause.reason.contains("192.168.0.204:8443"));
        assert!(cause.reason.contains("Connection refused"));
    }

    #[test]
    fn fatal_error_maps_to_error() {
        let parser = PhpErrorParser::new("upload:x.log");
        let line = "[01-Jan-2024 00:00:01 UTC] PHP Fatal error: Uncaught Exception in /a.php";
        let record = parser.try_structured(line, &opts()).unwrap();
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.cause.as_ref().unwrap().group, "aplicacao");
    }

    #[test]
    fn warning_maps_to_warning() {
        let parser = PhpErrorParser::new("upload:x.log");
        let line = "[01-Jan-2024 00:00:01 UTC] PHP Warning: Division by zero in /b.php";
        let record = parser.try_structured(line, &opts()).unwrap();
        assert_eq!(record.level, Level::Warning);
    }

    #[test]
    fn deprecated_maps_to_info() {
        let parser = PhpErrorParser::new("upload:x.log");
        let line = "[01-Jan-2024 00:00:01 UTC] PHP Deprecated: old function used in /c.php";
        let record = parser.try_structured(line, &opts()).unwrap();
        assert_eq!(record.level, Level::Info);
    }

    #[test]
    fn level_token_is_case_insensitive() {
        let parser = PhpErrorParser::new("upload:x.log");
        let line = "[01-Jan-2024 00:00:01 UTC] PHP notice: lowercase token in /d.php";
        assert!(parser.try_structured(line, &opts()).is_some());
    }

    #[test]
    fn declines_non_php_line() {
        let parser = PhpErrorParser::new("upload:x.log");
        assert!(parser
            .try_structured("2024-01-01 00:00:01 ERROR plain line", &opts())
            .is_none());
        assert!(parser
            .try_structured("Nov 27 15:30:45 host1 something failed", &opts())
            .is_none());
    }

    #[test]
    fn invalid_timestamp_substitutes_now() {
        let parser = PhpErrorParser::new("upload:x.log");
        // 달력상 불가능한 날짜지만 형식은 맞으므로 라인은 수락된다.
        let line = "[30-Feb-2024 12:00:00 UTC] PHP Warning: odd timestamp in /e.php";
        let record = parser.try_structured(line, &opts()).unwrap();
        assert_eq!(record.timestamp.format("%Y").to_string(), Utc::now().format("%Y").to_string());
    }

    #[test]
    fn cause_is_always_populated_on_match() {
        let parser = PhpErrorParser::new("upload:x.log");
        let line = "[01-Jan-2024 00:00:01 UTC] PHP Error: plain application failure";
        let record = parser.try_structured(line, &opts()).unwrap();
        assert!(record.cause.is_some());
    }
}
