//! Loghound 수집 파이프라인 — 형식 감지, 파싱, 원인 추론, 오케스트레이션
//!
//! # 모듈 구성
//!
//! - [`sniffer`]: 바이트 접두로 "로그 파일인가?"를 판별하는 휴리스틱
//! - [`parser`]: 소스별 라인 파서 (syslog, Zabbix 데몬, PHP 에러 로그)와
//!   범용 폴백 파서, 우선순위 체인
//! - [`cause`]: cURL/네트워크 장애 원인 추론
//! - [`ingest`]: 파일 → 파서 체인 → 싱크 오케스트레이터
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! 바이트 스트림 -> Sniffer(게이트) -> Ingestor -> ParserChain -> RecordSink
//!                                                   |
//!                                              Cause 추론 (PHP 파서)
//! ```

pub mod cause;
pub mod error;
pub mod ingest;
pub mod parser;
pub mod sniffer;

// --- 주요 타입 re-export ---

// 에러
pub use error::PipelineError;

// 수집
pub use ingest::Ingestor;

// 파서
pub use parser::{GenericParser, ParserChain, PhpErrorParser, SyslogParser, ZabbixKind, ZabbixParser};

// 형식 감지
pub use sniffer::is_probably_log;
