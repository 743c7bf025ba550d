//! 파이프라인 trait — 파서/싱크 확장 포인트 정의

use crate::error::LoghoundError;
use crate::types::LogRecord;

/// 라인 파싱에 필요한 호출 측 컨텍스트
///
/// 라인 자체에 없는 정보(기본 호스트 별칭, syslog 연도)를 파서에
/// 전달합니다.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// 호스트 필드가 없는 형식에 쓸 호스트 별칭
    pub default_host: String,
    /// 연도가 없는 타임스탬프에 적용할 연도 (없으면 현재 연도)
    pub year_hint: Option<i32>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_host: "unknown".to_owned(),
            year_hint: None,
        }
    }
}

/// 로그 라인 파서 trait
///
/// 2단계 계약: [`try_structured`](Self::try_structured)가 형식에 맞는
/// 라인을 구조화하고, 실패 시 [`to_raw`](Self::to_raw)가 원문 보존
/// 레코드를 만들 수 있습니다. 둘 다 `None`이면 체인의 다음 파서로
/// 넘어갑니다.
pub trait LineParser: Send + Sync {
    /// 이 파서가 만든 레코드의 source 태그
    fn source_tag(&self) -> &str;

    /// 형식에 맞는 라인을 구조화된 레코드로 변환합니다.
    ///
    /// 형식이 맞지 않으면 `None`을 반환하여 파싱을 거절합니다.
    fn try_structured(&self, line: &str, opts: &ParseOptions) -> Option<LogRecord>;

    /// 구조화 실패 라인을 원문 보존 레코드로 변환합니다.
    ///
    /// 기본 구현은 `None`(폴백 없음)입니다. 어떤 라인도 버리지 않아야
    /// 하는 파서만 재정의합니다.
    fn to_raw(&self, _line: &str, _opts: &ParseOptions) -> Option<LogRecord> {
        None
    }
}

/// 레코드 싱크 trait
///
/// 파서 체인이 만든 레코드를 받아 저장합니다.
pub trait RecordSink {
    /// 레코드 하나를 저장
    fn insert(&mut self, record: &LogRecord) -> Result<(), LoghoundError>;
}
