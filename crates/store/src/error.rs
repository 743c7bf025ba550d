//! 스토어 에러 타입
//!
//! `From<StoreError> for LoghoundError` 변환이 구현되어 있어 상위
//! 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use loghound_core::error::{LoghoundError, StorageError};

/// 스토어 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 데이터베이스 열기 실패
    #[error("failed to open database at {path}: {reason}")]
    Open { path: String, reason: String },

    /// SQL 실행 실패
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O 에러 (디렉토리 생성 등)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for LoghoundError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Open { path, reason } => {
                LoghoundError::Storage(StorageError::Open { path, reason })
            }
            StoreError::Sqlite(e) => LoghoundError::Storage(StorageError::Query(e.to_string())),
            StoreError::Io(e) => LoghoundError::Io(e),
        }
    }
}
