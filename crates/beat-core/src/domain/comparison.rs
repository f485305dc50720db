//! 정렬된 가격 쌍과 비교 결과 모델.
//!
//! [`ComparisonReport`]는 동작이 없는 평면 구조체로, 차트 라이브러리, 터미널 표,
//! JSON 응답 등 어떤 출력 대상에서도 그대로 사용할 수 있습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CompareError, CompareResult};
use crate::types::{PriceField, WindowSelector};

/// 두 시계열을 공통 날짜로 줄인 결과.
///
/// `dates`, `main_prices`, `bench_prices`의 길이는 항상 같고 0보다 큽니다.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    dates: Vec<NaiveDate>,
    main_prices: Vec<f64>,
    bench_prices: Vec<f64>,
}

impl AlignedPair {
    /// 길이 불변식을 검증하며 생성합니다.
    pub fn new(
        dates: Vec<NaiveDate>,
        main_prices: Vec<f64>,
        bench_prices: Vec<f64>,
    ) -> CompareResult<Self> {
        if dates.len() != main_prices.len() || dates.len() != bench_prices.len() {
            return Err(CompareError::invalid(format!(
                "aligned vectors differ in length: dates={}, main={}, bench={}",
                dates.len(),
                main_prices.len(),
                bench_prices.len()
            )));
        }
        if dates.is_empty() {
            return Err(CompareError::invalid("aligned pair must not be empty"));
        }

        Ok(Self {
            dates,
            main_prices,
            bench_prices,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn main_prices(&self) -> &[f64] {
        &self.main_prices
    }

    pub fn bench_prices(&self) -> &[f64] {
        &self.bench_prices
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// 생성자가 빈 쌍을 거부하므로 항상 `false`입니다.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// 첫 날짜부터 마지막 날짜까지의 경과 달력 일수.
    pub fn span_days(&self) -> i64 {
        (self.last_date() - self.first_date()).num_days()
    }

    /// 벡터들을 소유권과 함께 분해합니다.
    pub fn into_parts(self) -> (Vec<NaiveDate>, Vec<f64>, Vec<f64>) {
        (self.dates, self.main_prices, self.bench_prices)
    }
}

/// 한 시계열의 요약 지표 (정렬된 가격 벡터 기준).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// 총 증가율 (%)
    pub total_growth_pct: f64,
    /// 연평균 복리 성장률 (%)
    pub cagr_pct: f64,
    /// 봉당 평균 수익률 (%)
    pub avg_daily_return_pct: f64,
}

/// 한 쪽 시계열의 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegSummary {
    pub symbol: String,
    pub first_price: f64,
    pub last_price: f64,
    pub metrics: SummaryMetrics,
}

/// 비교 결과와 함께 전달되는 관찰 가능한 경고.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonWarning {
    /// since 기간 필터 결과가 비어 가장 이른 데이터부터 사용함
    SinceFallback {
        symbol: String,
        requested_from: NaiveDate,
        used_from: NaiveDate,
    },
}

impl fmt::Display for ComparisonWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonWarning::SinceFallback {
                symbol,
                requested_from,
                used_from,
            } => write!(
                f,
                "{} has no data on or after {}; using full history from {}",
                symbol, requested_from, used_from
            ),
        }
    }
}

/// 프레젠테이션 계층으로 전달되는 비교 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub main_symbol: String,
    pub benchmark_symbol: String,
    pub window: WindowSelector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_year: Option<i32>,
    pub price_field: PriceField,
    /// 날짜 경계에 사용한 시간대 (IANA 이름)
    pub timezone: String,
    /// 정렬된 날짜 (오름차순)
    pub dates: Vec<NaiveDate>,
    /// 상대 성과 (첫 값은 1.0)
    pub relative_series: Vec<f64>,
    /// 정렬된 종목 가격
    pub main_prices: Vec<f64>,
    /// 정렬된 벤치마크 가격
    pub bench_prices: Vec<f64>,
    /// 종목 성장 지수 (첫 값 100)
    pub main_growth_index: Vec<f64>,
    /// 벤치마크 성장 지수 (첫 값 100)
    pub bench_growth_index: Vec<f64>,
    pub main_summary: LegSummary,
    pub bench_summary: LegSummary,
    /// 정렬 구간의 경과 달력 일수
    pub span_days: i64,
    /// CAGR 계산에 사용한 연수 (span_days / 365)
    pub years: f64,
    pub warnings: Vec<ComparisonWarning>,
}

impl ComparisonReport {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// 마지막 상대 성과 값 (1.0보다 크면 종목이 벤치마크를 이김).
    pub fn final_relative(&self) -> Option<f64> {
        self.relative_series.last().copied()
    }

    /// 종목이 벤치마크를 이겼는지 확인합니다.
    pub fn beats_benchmark(&self) -> bool {
        self.final_relative().is_some_and(|r| r > 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_aligned_pair_rejects_length_mismatch() {
        let result = AlignedPair::new(vec![d(2024, 1, 2)], vec![1.0, 2.0], vec![1.0]);
        assert!(matches!(result, Err(CompareError::InvalidInput(_))));
    }

    #[test]
    fn test_aligned_pair_rejects_empty() {
        assert!(AlignedPair::new(vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn test_aligned_pair_span() {
        let pair = AlignedPair::new(
            vec![d(2024, 1, 2), d(2024, 1, 3), d(2025, 1, 2)],
            vec![1.0, 2.0, 3.0],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(pair.len(), 3);
        assert_eq!(pair.span_days(), 366);
        assert_eq!(pair.first_date(), d(2024, 1, 2));
    }

    #[test]
    fn test_warning_message() {
        let warning = ComparisonWarning::SinceFallback {
            symbol: "NEWCO".to_string(),
            requested_from: d(2030, 1, 1),
            used_from: d(2021, 6, 1),
        };
        assert_eq!(
            warning.to_string(),
            "NEWCO has no data on or after 2030-01-01; using full history from 2021-06-01"
        );
    }
}
