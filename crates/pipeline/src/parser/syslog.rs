//! BSD syslog 스타일 파서
//!
//! `<3글자 월> <일> <HH:MM:SS> <호스트> <나머지>` 형식의 라인을
//! 구조화합니다. 형식에 연도가 없으므로
//! [`ParseOptions::year_hint`](loghound_core::pipeline::ParseOptions)
//! 또는 현재 연도를 씁니다 — 연도 경계를 넘는 파일은 잘못된 연도가
//! 붙을 수 있습니다(알려진 한계).
//!
//! # 사용 예시
//! ```ignore
//! let parser = SyslogParser::new();
//! let record = parser.try_structured("Nov 27 15:30:45 host1 something failed", &opts);
//! assert_eq!(record.unwrap().host, "host1");
//! ```

use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use regex::Regex;

use loghound_core::pipeline::{LineParser, ParseOptions};
use loghound_core::types::{Level, LogRecord};

/// BSD syslog 라인 파서
///
/// 구조화 단계만 가지며 형식이 맞지 않는 라인은 거절합니다
/// (syslog 수집에서 불일치 라인은 건너뜁니다).
pub struct SyslogParser {
    pattern: Regex,
}

impl SyslogParser {
    /// 새 파서를 생성합니다.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^(?P<month>\w{3})\s+(?P<day>\d{1,2})\s+(?P<time>\d{2}:\d{2}:\d{2})\s+(?P<host>[\w.\-]+)\s+(?P<rest>.*)$",
            )
            .unwrap(),
        }
    }

    /// 3글자 월 토큰을 월 번호로 변환합니다.
    ///
    /// 알 수 없는 토큰은 현재 월로 대체합니다.
    fn month_number(token: &str) -> u32 {
        match token {
            "Jan" => 1,
            "Feb" => 2,
            "Mar" => 3,
            "Apr" => 4,
            "May" => 5,
            "Jun" => 6,
            "Jul" => 7,
            "Aug" => 8,
            "Sep" => 9,
            "Oct" => 10,
            "Nov" => 11,
            "Dec" => 12,
            _ => Local::now().month(),
        }
    }

    /// 메시지 본문에서 심각도를 추측합니다.
    ///
    /// 우선순위: CRIT/FATAL → CRITICAL, ERROR/` ERR ` → ERROR,
    /// WARN → WARN, 그 외 INFO.
    fn guess_level(msg: &str) -> Level {
        let up = msg.to_uppercase();
        if up.contains("CRIT") || up.contains("FATAL") {
            Level::Critical
        } else if up.contains("ERROR") || up.contains(" ERR ") {
            Level::Error
        } else if up.contains("WARN") {
            Level::Warn
        } else {
            Level::Info
        }
    }
}

impl Default for SyslogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for SyslogParser {
    fn source_tag(&self) -> &str {
        "syslog"
    }

    fn try_structured(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord> {
        let caps = self.pattern.captures(line)?;

        let year = opts.year_hint.unwrap_or_else(|| Local::now().year());
        let month = Self::month_number(&caps["month"]);
        let day: u32 = caps["day"].parse().ok()?;

        // 달력상 불가능한 날짜는 거절
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::parse_from_str(&caps["time"], "%H:%M:%S").ok()?;

        let rest = caps["rest"].trim().to_owned();
        Some(LogRecord {
            timestamp: date.and_time(time),
            source: "syslog".to_owned(),
            level: Self::guess_level(&rest),
            host: caps["host"].to_owned(),
            message: rest,
            cause: None,
        })
    }
}
