//! 일시적 조회 실패에 대한 재시도.
//!
//! 대기 시간은 선형으로 늘어납니다 (`base * attempt * backoff_factor`).
//! 재시도 가능 여부는 [`FetchError::is_retryable`]이 결정합니다.

use std::future::Future;
use std::time::Duration;

use beat_core::DataSourceConfig;
use tracing::{debug, warn};

use crate::FetchError;

/// 재시도 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// 첫 시도 이후 최대 재시도 횟수
    pub max_retries: u32,
    /// 기본 대기 시간
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryConfig {
    /// 재시도하지 않는 정책.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    pub fn from_settings(settings: &DataSourceConfig) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.retry_delay_ms),
        }
    }

    /// `attempt`번째 실패 후 대기 시간 (1부터 시작).
    pub fn delay_for(&self, attempt: u32, error: &FetchError) -> Duration {
        self.base_delay * attempt * error.backoff_factor()
    }
}

/// 재시도 가능한 에러에 한해 작업을 반복합니다.
///
/// 재시도 불가능한 에러나 마지막 시도의 에러는 그대로 반환합니다.
pub async fn with_retry<T, F, Fut>(
    config: RetryConfig,
    label: &str,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                attempt += 1;
                let delay = config.delay_for(attempt, &e);
                debug!(
                    label = label,
                    attempt = attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "조회 재시도 예정"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                if attempt > 0 {
                    warn!(label = label, attempts = attempt + 1, error = %e, "조회 최종 실패");
                }
                return Err(e);
            }
        }
    }
}
