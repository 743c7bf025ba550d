//! 수집 파이프라인 에러 타입
//!
//! [`PipelineError`]는 수집 경로에서 발생하는 에러를 표현합니다.
//! 라인 단위 파싱 실패는 에러가 아니며(파서가 거절하거나 raw로 강등),
//! 여기에는 수집 자체를 중단시키는 상황만 담깁니다.

/// 수집 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// 입력 파일이 존재하지 않음 — 어떤 레코드도 쓰기 전에 중단
    #[error("input file not found: {path}")]
    InputNotFound { path: String },

    /// 업로드 파일이 텍스트 로그로 판별되지 않음
    #[error("file does not look like a text log: {path}")]
    NotALogFile { path: String },

    /// 싱크 쓰기 실패 (스토리지 전파)
    #[error("sink write failed: {0}")]
    Sink(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_display() {
        let err = PipelineError::InputNotFound {
            path: "/var/log/missing.log".to_owned(),
        };
        assert!(err.to_string().contains("missing.log"));
    }

    #[test]
    fn not_a_log_file_display() {
        let err = PipelineError::NotALogFile {
            path: "photo.jpg".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("does not look like a text log"));
        assert!(msg.contains("photo.jpg"));
    }
}
