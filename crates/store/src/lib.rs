//! Loghound 스토어 크레이트 — SQLite 저장과 조회/집계 엔진
//!
//! # 모듈 구성
//!
//! - [`store`]: 스토어 열기/스키마/삽입 ([`RecordSink`](loghound_core::pipeline::RecordSink) 구현)
//! - [`query`]: 동적 필터 조회와 집계 (latest, stats, filter, hosts, top, summary)
//! - [`preset`]: 이름 붙은 필터 프리셋과 병합 규칙
//! - [`error`]: 도메인 에러 타입

pub mod error;
pub mod preset;
pub mod query;
pub mod store;

// --- 주요 타입 re-export ---

// 에러
pub use error::StoreError;

// 스토어
pub use store::LogStore;

// 조회
pub use query::{DetailedRow, LogFilter, LogRow, Summary};

// 프리셋
pub use preset::{apply_preset, preset_names};
