//! 비교 파이프라인의 에러 타입.
//!
//! 한 번의 비교 요청에서 발생할 수 있는 모든 실패는 이 열거형 하나로 표현됩니다.
//! 모든 변형은 해당 요청에 대해 치명적이며, 코어는 자동 재시도를 하지 않습니다.

use thiserror::Error;

/// 비교 요청 실패.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    /// 외부 시계열 조회 실패 (네트워크, HTTP 상태, API 에러 페이로드 모두 포함)
    #[error("Failed to fetch data for {symbol}: {reason}")]
    FetchFailed { symbol: String, reason: String },

    /// 조회 결과에 사용 가능한 데이터가 전혀 없음
    #[error("No usable price data returned for {symbol}")]
    EmptySeries { symbol: String },

    /// 원시 데이터는 있었지만 기간 필터링 후 남은 데이터가 없음
    #[error("No data available for {symbol}: {detail}")]
    NoDataAvailable { symbol: String, detail: String },

    /// 두 시계열의 날짜가 하나도 겹치지 않음
    #[error("{main} and {benchmark} have no trading dates in common")]
    NoOverlap { main: String, benchmark: String },

    /// 잘못된 입력 (심볼, 0 이하 가격, 퇴화된 계산 결과 등)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 요청 전체 타임아웃
    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// 비교 작업을 위한 Result 타입.
pub type CompareResult<T> = Result<T, CompareError>;

impl CompareError {
    /// 입력 오류 생성 헬퍼.
    pub fn invalid(msg: impl Into<String>) -> Self {
        CompareError::InvalidInput(msg.into())
    }

    /// JSON 출력 등에 사용하는 고정 식별자.
    pub fn code(&self) -> &'static str {
        match self {
            CompareError::FetchFailed { .. } => "fetch_failed",
            CompareError::EmptySeries { .. } => "empty_series",
            CompareError::NoDataAvailable { .. } => "no_data_available",
            CompareError::NoOverlap { .. } => "no_overlap",
            CompareError::InvalidInput(_) => "invalid_input",
            CompareError::Timeout { .. } => "timeout",
        }
    }

    /// 코어 단계에서 재시도 가능한 에러인지 확인합니다.
    ///
    /// 재시도 정책은 조회기(fetcher) 쪽에 있으므로 코어에서는 항상 `false`입니다.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// 사용자가 입력을 고쳐서 해결할 수 있는 에러인지 확인합니다.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            CompareError::InvalidInput(_)
                | CompareError::NoDataAvailable { .. }
                | CompareError::NoOverlap { .. }
        )
    }
}
