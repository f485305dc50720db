//! 시계열 조회기 trait 정의.

use async_trait::async_trait;
use beat_core::{Granularity, RangeSpec, RawSeries};

use crate::FetchError;

/// 조회 작업을 위한 Result 타입.
pub type FetchResult<T> = Result<T, FetchError>;

/// 외부 가격 시계열 조회기.
///
/// 네트워크와 응답 파싱은 구현체의 책임이며, 코어 파이프라인은 이 trait만 봅니다.
/// 한 비교 요청에서 두 심볼을 동시에 조회하므로 `Send + Sync`가 필요합니다.
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    /// 조회기 이름 (로그용).
    fn name(&self) -> &str;

    /// 심볼의 원시 시계열을 조회합니다.
    ///
    /// # 인자
    /// * `symbol` - 정규화된 티커 (예: "AAPL", "VOO")
    /// * `range` - 조회 범위
    /// * `granularity` - 캔들 간격
    async fn fetch(
        &self,
        symbol: &str,
        range: RangeSpec,
        granularity: Granularity,
    ) -> FetchResult<RawSeries>;
}

#[async_trait]
impl<T: SeriesFetcher + ?Sized> SeriesFetcher for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(
        &self,
        symbol: &str,
        range: RangeSpec,
        granularity: Granularity,
    ) -> FetchResult<RawSeries> {
        (**self).fetch(symbol, range, granularity).await
    }
}
