//! 두 정규화 시계열의 날짜 교집합 정렬.
//!
//! 벤치마크 쪽을 날짜 → 가격 해시맵으로 만든 뒤 종목 쪽을 한 번 순회합니다 (O(n+m)).
//! 정규화된 시계열은 날짜가 유일하고 오름차순이므로 결과도 오름차순입니다.

use std::collections::HashMap;

use beat_core::{AlignedPair, CompareError, CompareResult, NormalizedSeries};
use chrono::NaiveDate;
use tracing::debug;

/// 두 시계열을 공통 날짜로 정렬합니다.
///
/// 공통 날짜가 없으면 `NoOverlap`을 반환합니다.
pub fn align(main: &NormalizedSeries, bench: &NormalizedSeries) -> CompareResult<AlignedPair> {
    let bench_by_date: HashMap<NaiveDate, f64> =
        bench.points.iter().map(|p| (p.date, p.price)).collect();

    let capacity = main.len().min(bench.len());
    let mut dates = Vec::with_capacity(capacity);
    let mut main_prices = Vec::with_capacity(capacity);
    let mut bench_prices = Vec::with_capacity(capacity);

    for point in &main.points {
        if let Some(&bench_price) = bench_by_date.get(&point.date) {
            dates.push(point.date);
            main_prices.push(point.price);
            bench_prices.push(bench_price);
        }
    }

    debug!(
        main = %main.symbol,
        benchmark = %bench.symbol,
        main_len = main.len(),
        bench_len = bench.len(),
        common = dates.len(),
        "시계열 정렬"
    );

    if dates.is_empty() {
        return Err(CompareError::NoOverlap {
            main: main.symbol.clone(),
            benchmark: bench.symbol.clone(),
        });
    }

    AlignedPair::new(dates, main_prices, bench_prices)
}
