//! # Beat Data
//!
//! 외부 가격 시계열 조회기.
//!
//! 비교 파이프라인은 [`SeriesFetcher`] trait만 의존하며, 이 크레이트가 실제 구현을
//! 제공합니다:
//! - [`YahooChartFetcher`]: Yahoo Finance v8 차트 API
//! - [`InMemoryFetcher`]: 네트워크 없는 메모리 조회기 (테스트/오프라인 실행)
//!
//! 일시적 실패(네트워크, 타임아웃, 5xx, 429)에 대한 재시도는 조회기 쪽에서 처리합니다.

pub mod error;
pub mod retry;
pub mod simulated;
pub mod traits;
pub mod yahoo;

pub use error::FetchError;
pub use retry::{with_retry, RetryConfig};
pub use simulated::InMemoryFetcher;
pub use traits::{FetchResult, SeriesFetcher};
pub use yahoo::{parse_chart_response, YahooChartFetcher};
