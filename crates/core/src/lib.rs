//! Loghound 공통 크레이트 — 도메인 타입, 확장 trait, 에러, 설정
//!
//! 모든 크레이트(pipeline, store, cli)가 공유하는 기반을 정의합니다.
//!
//! # 모듈 구성
//!
//! - [`types`]: 로그 레코드와 심각도 등 도메인 타입
//! - [`pipeline`]: 파서/싱크 확장 포인트 trait
//! - [`error`]: 에러 계층 ([`LoghoundError`] 및 도메인별 에러)
//! - [`config`]: `loghound.toml` 설정 로딩과 검증

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, LoghoundError, StorageError};

// 설정
pub use config::LoghoundConfig;

// 파이프라인 trait
pub use pipeline::{LineParser, ParseOptions, RecordSink};

// 도메인 타입
pub use types::{Cause, Level, LogRecord};
