//! 메모리 기반 시계열 조회기.
//!
//! 네트워크 없이 파이프라인을 실행하기 위한 조회기입니다. 심볼별로 미리 등록한
//! 시계열을 반환하며, 응답 지연과 실패를 주입할 수 있습니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use beat_core::{Granularity, RangeSpec, RawSeries};
use tracing::debug;

use crate::traits::{FetchResult, SeriesFetcher};
use crate::FetchError;

/// 심볼별 응답 설정.
#[derive(Debug, Clone)]
enum Canned {
    Series(RawSeries),
    Failure { status: u16, message: String },
}

/// 메모리 기반 조회기.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    responses: HashMap<String, Canned>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시계열을 등록합니다. 심볼은 `series.symbol`을 사용합니다.
    pub fn with_series(mut self, series: RawSeries) -> Self {
        self.responses
            .insert(series.symbol.clone(), Canned::Series(series));
        self
    }

    /// 심볼 조회가 HTTP 에러로 실패하도록 설정합니다.
    pub fn with_failure(mut self, symbol: &str, status: u16, message: &str) -> Self {
        self.responses.insert(
            symbol.to_string(),
            Canned::Failure {
                status,
                message: message.to_string(),
            },
        );
        self
    }

    /// 심볼 응답 전 지연을 설정합니다.
    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    /// 지금까지의 조회 횟수.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeriesFetcher for InMemoryFetcher {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn fetch(
        &self,
        symbol: &str,
        range: RangeSpec,
        granularity: Granularity,
    ) -> FetchResult<RawSeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(symbol = symbol, range = %range, interval = %granularity, "메모리 조회");

        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(symbol) {
            Some(Canned::Series(series)) => Ok(series.clone()),
            Some(Canned::Failure { status, message }) => Err(FetchError::Http {
                status: *status,
                message: message.clone(),
            }),
            None => Err(FetchError::NotFound(symbol.to_string())),
        }
    }
}
