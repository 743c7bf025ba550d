//! 범용 폴백 파서
//!
//! 업로드 자유 텍스트 수집에서 PHP 파서가 거절한 라인을 받아냅니다.
//! 구조화 단계는 라인 선두의 ISO 타임스탬프를 떼어내고, raw 단계는
//! 어떤 라인이든 현재 UTC 시각으로 레코드를 만듭니다.

use chrono::{NaiveDateTime, Utc};
use regex::Regex;

use loghound_core::pipeline::{LineParser, ParseOptions};
use loghound_core::types::{Level, LogRecord};

/// 범용 타임스탬프/키워드 파서
///
/// 심각도는 단어 단위 매칭으로 고정 우선순위
/// ERROR > CRITICAL > WARNING > NOTICE > INFO 로 결정합니다.
/// `WARN`과 `WARNING`은 둘 다 WARNING을 냅니다. 원인 필드는 절대
/// 채우지 않습니다.
pub struct GenericParser {
    source: String,
    ts_pattern: Regex,
    level_patterns: Vec<(Level, Regex)>,
}

impl GenericParser {
    /// 지정한 source 태그로 파서를 생성합니다.
    pub fn new(source: impl Into<String>) -> Self {
        let level_patterns = vec![
            (Level::Error, Regex::new(r"(?i)\bERROR\b").unwrap()),
            (Level::Critical, Regex::new(r"(?i)\bCRITICAL\b").unwrap()),
            (Level::Warning, Regex::new(r"(?i)\bWARN(ING)?\b").unwrap()),
            (Level::Notice, Regex::new(r"(?i)\bNOTICE\b").unwrap()),
            (Level::Info, Regex::new(r"(?i)\bINFO\b").unwrap()),
        ];
        Self {
            source: source.into(),
            ts_pattern: Regex::new(r"^(\d{4}-\d{2}-\d{2})[ T](\d{2}:\d{2}:\d{2})").unwrap(),
            level_patterns,
        }
    }

    /// 라인 전체에서 심각도를 추측합니다.
    fn guess_level(&self, line: &str) -> Level {
        for (level, pattern) in &self.level_patterns {
            if pattern.is_match(line) {
                return *level;
            }
        }
        Level::Info
    }
}

impl LineParser for GenericParser {
    fn source_tag(&self) -> &str {
        &self.source
    }

    fn try_structured(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord> {
        let caps = self.ts_pattern.captures(line)?;

        let ts_text = format!("{} {}", &caps[1], &caps[2]);
        // 달력상 불가능한 날짜는 raw 단계로 강등
        let timestamp = NaiveDateTime::parse_from_str(&ts_text, "%Y-%m-%d %H:%M:%S").ok()?;

        let message = line[caps[0].len()..].trim().to_owned();
        Some(LogRecord {
            timestamp,
            source: self.source.clone(),
            level: self.guess_level(line),
            host: opts.default_host.clone(),
            message,
            cause: None,
        })
    }

    fn to_raw(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord> {
        Some(LogRecord {
            timestamp: Utc::now().naive_utc(),
            source: self.source.clone(),
            level: self.guess_level(line),
            host: opts.default_host.clone(),
            message: line.trim().to_owned(),
            cause: None,
        })
    }
}
