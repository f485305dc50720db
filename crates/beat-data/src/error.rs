//! 시계열 조회 에러 타입.

use beat_core::CompareError;
use thiserror::Error;

/// 외부 데이터 소스 조회 에러.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 응답 본문에 담긴 API 수준 에러
    #[error("API error {code}: {description}")]
    Api { code: String, description: String },

    /// 요청한 심볼의 결과가 없음
    #[error("No data found for {0}")]
    NotFound(String),

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    Parse(String),

    /// 개별 HTTP 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 요청 한도 초과
    #[error("Rate limit exceeded")]
    RateLimited,
}

impl FetchError {
    /// 재시도 가능한 에러인지 확인.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Timeout(_) | FetchError::RateLimited => true,
            FetchError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// 권장 재시도 대기 시간 배수.
    ///
    /// 요청 한도 초과는 일반 에러보다 오래 기다립니다.
    pub fn backoff_factor(&self) -> u32 {
        match self {
            FetchError::RateLimited => 4,
            _ => 1,
        }
    }

    /// 코어 에러 분류로 변환합니다.
    ///
    /// 네트워크, HTTP 상태, API 페이로드 에러는 모두 `FetchFailed`로 합쳐집니다.
    pub fn into_compare_error(self, symbol: &str) -> CompareError {
        CompareError::FetchFailed {
            symbol: symbol.to_string(),
            reason: self.to_string(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::Network("reset".to_string()).is_retryable());
        assert!(FetchError::RateLimited.is_retryable());
        assert!(FetchError::Http {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_retryable());
        assert!(!FetchError::Http {
            status: 404,
            message: "not found".to_string()
        }
        .is_retryable());
        assert!(!FetchError::Api {
            code: "Not Found".to_string(),
            description: "No data found, symbol may be delisted".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_into_compare_error() {
        let err = FetchError::Http {
            status: 404,
            message: "Not Found".to_string(),
        }
        .into_compare_error("ZZZZ");

        assert_eq!(
            err,
            CompareError::FetchFailed {
                symbol: "ZZZZ".to_string(),
                reason: "HTTP 404: Not Found".to_string(),
            }
        );
    }
}
