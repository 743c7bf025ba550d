//! 라인 파서 모듈 — 소스별 파서와 우선순위 체인
//!
//! 각 파서는 core의 [`LineParser`](loghound_core::pipeline::LineParser)
//! trait을 구현합니다. [`ParserChain`]은 고정된 우선순위로 파서를
//! 시도합니다: 먼저 모든 파서의 구조화 단계, 전부 거절하면 raw 단계.
//!
//! # 사용 예시
//! ```ignore
//! use loghound_pipeline::parser::{ParserChain, PhpErrorParser, GenericParser};
//!
//! let chain = ParserChain::new()
//!     .register(Box::new(PhpErrorParser::new("upload:php_errors.log")))
//!     .register(Box::new(GenericParser::new("upload:php_errors.log")));
//!
//! let record = chain.parse("2024-11-27 15:30:45 ERROR it broke", &opts);
//! ```

pub mod fallback;
pub mod php;
pub mod syslog;
pub mod zabbix;

pub use fallback::GenericParser;
pub use php::PhpErrorParser;
pub use syslog::SyslogParser;
pub use zabbix::{ZabbixKind, ZabbixParser};

use loghound_core::pipeline::{LineParser, ParseOptions};
use loghound_core::types::LogRecord;

/// 파서 체인 — 등록 순서가 곧 우선순위입니다.
///
/// 2단계 시도: 구조화 단계를 순서대로 전부 시도한 뒤, 모두 거절하면
/// raw 단계를 순서대로 시도합니다. 둘 다 실패하면 라인을 버립니다
/// (raw 단계를 가진 파서가 체인에 있으면 버려지는 라인은 없습니다).
pub struct ParserChain {
    parsers: Vec<Box<dyn LineParser>>,
}

impl ParserChain {
    /// 빈 체인을 생성합니다.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// 파서를 등록합니다. 등록 순서대로 시도됩니다.
    pub fn register(mut self, parser: Box<dyn LineParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// 라인 하나를 파싱합니다.
    pub fn parse(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord> {
        for parser in &self.parsers {
            if let Some(record) = parser.try_structured(line, opts) {
                return Some(record);
            }
        }
        for parser in &self.parsers {
            if let Some(record) = parser.to_raw(line, opts) {
                return Some(record);
            }
        }
        None
    }
}

impl Default for ParserChain {
    fn default() -> Self {
        Self::new()
    }
}
