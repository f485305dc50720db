//! 상대 성과와 요약 지표 계산.
//!
//! 모두 정렬된 가격 벡터에 대한 순수 함수입니다. 퇴화된 입력(0 가격 등)으로 NaN이나
//! 무한대가 나오면 숫자를 그대로 돌려주지 않고 `InvalidInput`으로 실패합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use beat_analytics::performance::{relative_series, total_growth_pct};
//!
//! let relative = relative_series(&[100.0, 110.0, 121.0], &[50.0, 50.0, 50.0])?;
//! assert_eq!(relative[0], 1.0);
//! assert_eq!(total_growth_pct(&[100.0, 110.0, 121.0])?, 21.0);
//! ```

use beat_core::{AlignedPair, CompareError, CompareResult, LegSummary, SummaryMetrics};

/// CAGR 연수 계산에 사용하는 1년의 일수.
pub const DAYS_PER_YEAR: f64 = 365.0;

fn ensure_finite(value: f64, what: &str) -> CompareResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CompareError::invalid(format!(
            "{} is not a finite number (degenerate prices)",
            what
        )))
    }
}

/// 모든 가격이 유한한 양수인지 확인합니다.
///
/// 0 이하 가격은 인덱스와 함께 `InvalidInput`으로 보고합니다.
pub fn ensure_positive_prices(prices: &[f64], leg: &str) -> CompareResult<()> {
    match prices
        .iter()
        .enumerate()
        .find(|(_, p)| **p <= 0.0 || !p.is_finite())
    {
        Some((i, p)) => Err(CompareError::invalid(format!(
            "{} price at index {} is {} (must be positive)",
            leg, i, p
        ))),
        None => Ok(()),
    }
}

/// 같은 날짜의 종목/벤치마크 가격 비율 (정규화 전).
///
/// 어느 쪽이든 가격이 0 이하이거나 유한하지 않으면 `InvalidInput`입니다.
pub fn price_ratio(main: &[f64], bench: &[f64]) -> CompareResult<Vec<f64>> {
    if main.len() != bench.len() {
        return Err(CompareError::invalid(format!(
            "price vectors differ in length: main={}, bench={}",
            main.len(),
            bench.len()
        )));
    }
    ensure_positive_prices(main, "main")?;
    ensure_positive_prices(bench, "benchmark")?;

    main.iter()
        .zip(bench)
        .map(|(&m, &b)| ensure_finite(m / b, "price ratio"))
        .collect()
}

/// 첫 값을 1.0으로 맞춘 상대 성과 시계열.
///
/// `ratio[i] = main[i] / bench[i]`, `relative[i] = ratio[i] / ratio[0]`.
/// 빈 입력은 빈 결과입니다.
pub fn relative_series(main: &[f64], bench: &[f64]) -> CompareResult<Vec<f64>> {
    let ratios = price_ratio(main, bench)?;
    let Some(&base) = ratios.first() else {
        return Ok(Vec::new());
    };

    ratios
        .iter()
        .map(|&r| ensure_finite(r / base, "relative performance"))
        .collect()
}

/// 총 증가율 (%). 두 점 미만이면 0.
pub fn total_growth_pct(prices: &[f64]) -> CompareResult<f64> {
    match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) if prices.len() >= 2 => {
            ensure_finite((last - first) / first * 100.0, "total growth")
        }
        _ => Ok(0.0),
    }
}

/// 연평균 복리 성장률 (%). 두 점 미만이거나 `years <= 0`이면 0.
pub fn cagr_pct(prices: &[f64], years: f64) -> CompareResult<f64> {
    if years <= 0.0 {
        return Ok(0.0);
    }
    match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) if prices.len() >= 2 => {
            ensure_finite(((last / first).powf(1.0 / years) - 1.0) * 100.0, "CAGR")
        }
        _ => Ok(0.0),
    }
}

/// 봉당 평균 수익률 (%). 두 점 미만이면 0.
///
/// 5년/10년 기간처럼 주봉을 쓰면 주간 평균 수익률이 됩니다.
pub fn average_daily_return_pct(prices: &[f64]) -> CompareResult<f64> {
    if prices.len() < 2 {
        return Ok(0.0);
    }
    let sum: f64 = prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).sum();
    ensure_finite(sum / (prices.len() - 1) as f64 * 100.0, "average return")
}

/// 첫 값을 100으로 맞춘 성장 지수.
pub fn growth_index(prices: &[f64]) -> CompareResult<Vec<f64>> {
    ensure_positive_prices(prices, "leg")?;
    let Some(&base) = prices.first() else {
        return Ok(Vec::new());
    };
    prices
        .iter()
        .map(|&p| ensure_finite(p / base * 100.0, "growth index"))
        .collect()
}

/// 경과 달력 일수를 연수로 변환합니다.
pub fn span_years(span_days: i64) -> f64 {
    span_days.max(0) as f64 / DAYS_PER_YEAR
}

/// 한 시계열의 요약 지표. 0 이하 가격이 있으면 `InvalidInput`입니다.
pub fn summary_metrics(prices: &[f64], years: f64) -> CompareResult<SummaryMetrics> {
    ensure_positive_prices(prices, "leg")?;
    Ok(SummaryMetrics {
        total_growth_pct: total_growth_pct(prices)?,
        cagr_pct: cagr_pct(prices, years)?,
        avg_daily_return_pct: average_daily_return_pct(prices)?,
    })
}

/// 정렬된 쌍의 두 시계열 요약.
///
/// 지표는 조회한 전체 범위가 아니라 정렬된 벡터 기준으로 계산합니다.
pub fn summarize_pair(
    pair: &AlignedPair,
    main_symbol: &str,
    bench_symbol: &str,
) -> CompareResult<(LegSummary, LegSummary)> {
    let years = span_years(pair.span_days());
    let leg = |symbol: &str, prices: &[f64]| -> CompareResult<LegSummary> {
        Ok(LegSummary {
            symbol: symbol.to_string(),
            first_price: prices[0],
            last_price: prices[prices.len() - 1],
            metrics: summary_metrics(prices, years)?,
        })
    };

    Ok((
        leg(main_symbol, pair.main_prices())?,
        leg(bench_symbol, pair.bench_prices())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_relative_series_normalizes_ratio() {
        let main = [100.0, 110.0, 121.0];
        let bench = [50.0, 50.0, 50.0];

        let ratio = price_ratio(&main, &bench).unwrap();
        assert!(close(ratio[1], 2.2) && close(ratio[2], 2.42));

        let relative = relative_series(&main, &bench).unwrap();
        assert_eq!(relative[0], 1.0);
        assert!(close(relative[1], 1.1));
        assert!(close(relative[2], 1.21));
    }

    #[test]
    fn test_zero_benchmark_price_is_invalid() {
        let result = relative_series(&[100.0, 110.0], &[0.0, 50.0]);
        assert!(matches!(result, Err(CompareError::InvalidInput(_))));

        let result = relative_series(&[100.0, 110.0], &[50.0, 0.0]);
        assert!(matches!(result, Err(CompareError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_main_first_price_is_invalid() {
        let result = relative_series(&[0.0, 110.0], &[50.0, 50.0]);
        assert!(matches!(result, Err(CompareError::InvalidInput(_))));
    }

    #[test]
    fn test_non_positive_main_price_after_first_is_invalid() {
        let bench = [50.0, 50.0, 50.0];

        for main in [[100.0, -5.0, 110.0], [100.0, 110.0, 0.0], [100.0, -5.0, 0.0]] {
            let result = relative_series(&main, &bench);
            assert!(
                matches!(result, Err(CompareError::InvalidInput(ref msg)) if msg.contains("main price")),
                "{:?} -> {:?}",
                main,
                result
            );
            assert!(summary_metrics(&main, 1.0).is_err());
            assert!(growth_index(&main).is_err());
        }
    }

    #[test]
    fn test_ensure_positive_prices_reports_index() {
        assert!(ensure_positive_prices(&[1.0, 2.0], "main").is_ok());
        assert!(ensure_positive_prices(&[], "main").is_ok());

        let err = ensure_positive_prices(&[1.0, 2.0, f64::NAN], "benchmark").unwrap_err();
        assert!(err.to_string().contains("benchmark price at index 2"));
    }

    #[test]
    fn test_total_growth() {
        assert!(close(total_growth_pct(&[100.0, 110.0, 121.0]).unwrap(), 21.0));
        assert_eq!(total_growth_pct(&[100.0]).unwrap(), 0.0);
        assert_eq!(total_growth_pct(&[]).unwrap(), 0.0);
        assert!(total_growth_pct(&[0.0, 5.0]).is_err());
    }

    #[test]
    fn test_cagr() {
        // 2년간 100 → 121 = 연 10%
        assert!(close(cagr_pct(&[100.0, 121.0], 2.0).unwrap(), 10.0));
        assert_eq!(cagr_pct(&[100.0, 121.0], 0.0).unwrap(), 0.0);
        assert_eq!(cagr_pct(&[100.0], 3.0).unwrap(), 0.0);
        assert!(cagr_pct(&[0.0, 121.0], 1.0).is_err());
    }

    #[test]
    fn test_average_return() {
        // +10%, -10%
        let avg = average_daily_return_pct(&[100.0, 110.0, 99.0]).unwrap();
        assert!(close(avg, 0.0));
        assert_eq!(average_daily_return_pct(&[5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_growth_index() {
        let index = growth_index(&[50.0, 55.0, 45.0]).unwrap();
        assert_eq!(index[0], 100.0);
        assert!(close(index[1], 110.0));
        assert!(close(index[2], 90.0));
    }

    #[test]
    fn test_summarize_uses_aligned_span() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        ];
        let pair = AlignedPair::new(dates, vec![100.0, 121.0], vec![10.0, 10.0]).unwrap();

        let (main, bench) = summarize_pair(&pair, "AAPL", "VOO").unwrap();
        // 730일 / 365 = 정확히 2년
        assert!(close(main.metrics.cagr_pct, 10.0));
        assert_eq!(main.first_price, 100.0);
        assert_eq!(main.last_price, 121.0);
        assert_eq!(bench.metrics.total_growth_pct, 0.0);
    }
}
