//! Zabbix 데몬 로그 파서 (server/proxy 변형)
//!
//! `pid:YYYYMMDD:HHMMSS[.frac]: message` 형식을 구조화합니다.
//! 구조가 맞지 않는 라인도 버리지 않습니다: raw 단계가 현재 시각과
//! 원문 전체로 레코드를 만들고 source 태그에 `_raw`를 붙입니다.
//! 데몬 로그에서 형식을 벗어난 라인은 드물지만, 벗어났을 때일수록
//! 운영상 가치가 있기 때문입니다.

use chrono::{Local, NaiveDate};
use regex::Regex;

use loghound_core::pipeline::{LineParser, ParseOptions};
use loghound_core::types::{Level, LogRecord};

/// Zabbix 데몬 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZabbixKind {
    /// zabbix_server.log
    Server,
    /// zabbix_proxy.log
    Proxy,
}

impl ZabbixKind {
    /// 구조화 레코드의 source 태그
    pub fn source_tag(&self) -> &'static str {
        match self {
            Self::Server => "zabbix_server",
            Self::Proxy => "zabbix_proxy",
        }
    }

    /// raw 강등 레코드의 source 태그
    pub fn raw_source_tag(&self) -> &'static str {
        match self {
            Self::Server => "zabbix_server_raw",
            Self::Proxy => "zabbix_proxy_raw",
        }
    }

    /// 호출자가 호스트를 지정하지 않았을 때의 기본 별칭
    pub fn default_host(&self) -> &'static str {
        match self {
            Self::Server => "zabbix-server",
            Self::Proxy => "zabbix-proxy",
        }
    }
}

/// Zabbix 데몬 로그 파서
///
/// server와 proxy는 형식이 같고 source 태그와 기본 호스트 별칭만
/// 다릅니다.
pub struct ZabbixParser {
    kind: ZabbixKind,
    pattern: Regex,
}

impl ZabbixParser {
    /// 지정한 데몬 종류의 파서를 생성합니다.
    pub fn new(kind: ZabbixKind) -> Self {
        Self {
            kind,
            pattern: Regex::new(
                r"^\s*(?P<pid>\d+):(?P<date>\d{8}):(?P<time>\d{6})(?:\.\d+)?:?\s*(?P<msg>.*)$",
            )
            .unwrap(),
        }
    }

    /// 메시지 본문에서 심각도를 추측합니다.
    ///
    /// 우선순위: FATAL/CRITICAL → CRITICAL, ERROR/FAILED/UNABLE → ERROR,
    /// WARN → WARN, DEBUG → DEBUG, 그 외 INFO.
    fn guess_level(msg: &str) -> Level {
        let up = msg.to_uppercase();
        if up.contains("FATAL") || up.contains("CRITICAL") {
            Level::Critical
        } else if up.contains("ERROR") || up.contains("FAILED") || up.contains("UNABLE") {
            Level::Error
        } else if up.contains("WARN") {
            Level::Warn
        } else if up.contains("DEBUG") {
            Level::Debug
        } else {
            Level::Info
        }
    }
}

impl LineParser for ZabbixParser {
    fn source_tag(&self) -> &str {
        self.kind.source_tag()
    }

    fn try_structured(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord> {
        let caps = self.pattern.captures(line)?;

        let raw_date = &caps["date"];
        let raw_time = &caps["time"];

        let year: i32 = raw_date[0..4].parse().ok()?;
        let month: u32 = raw_date[4..6].parse().ok()?;
        let day: u32 = raw_date[6..8].parse().ok()?;
        let hour: u32 = raw_time[0..2].parse().ok()?;
        let minute: u32 = raw_time[2..4].parse().ok()?;
        let second: u32 = raw_time[4..6].parse().ok()?;

        // 달력상 불가능한 날짜/시각은 raw 단계로 강등
        let timestamp = NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)?;

        let msg = caps["msg"].trim().to_owned();
        Some(LogRecord {
            timestamp,
            source: self.kind.source_tag().to_owned(),
            level: Self::guess_level(&msg),
            host: opts.default_host.clone(),
            message: msg,
            cause: None,
        })
    }

    fn to_raw(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord> {
        let msg = line.trim().to_owned();
        Some(LogRecord {
            timestamp: Local::now().naive_local(),
            source: self.kind.raw_source_tag().to_owned(),
            level: Self::guess_level(&msg),
            host: opts.default_host.clone(),
            message: msg,
            cause: None,
        })
    }
}
