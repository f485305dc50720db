//! 가격 시계열 모델.
//!
//! - [`RawSeries`]: 외부 조회 결과 그대로의 (epoch 초, 가격) 목록. 결측값 포함 가능.
//! - [`NormalizedSeries`]: 기준 시간대의 달력 날짜로 변환되고, 결측값이 제거되고,
//!   기간 정책이 적용된 (날짜, 가격) 목록. 날짜는 엄격히 증가하며 중복이 없습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::PriceField;

/// 원시 시계열의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Unix 타임스탬프 (초)
    pub timestamp: i64,
    /// 원 종가
    pub close: Option<f64>,
    /// 수정 종가
    pub adj_close: Option<f64>,
}

impl RawPoint {
    /// 두 필드에 같은 가격을 가진 점을 생성합니다.
    pub fn uniform(timestamp: i64, price: Option<f64>) -> Self {
        Self {
            timestamp,
            close: price,
            adj_close: price,
        }
    }

    /// 선택한 필드의 가격.
    pub fn price(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Adjusted => self.adj_close,
            PriceField::Unadjusted => self.close,
        }
    }
}

/// 외부 조회 결과 시계열. 수신 후에는 변경하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    /// 조회한 심볼
    pub symbol: String,
    /// 시간순 데이터 포인트
    pub points: Vec<RawPoint>,
}

impl RawSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<RawPoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    /// (타임스탬프, 가격) 쌍에서 두 필드가 같은 시계열을 생성합니다.
    pub fn from_prices(symbol: impl Into<String>, prices: &[(i64, Option<f64>)]) -> Self {
        Self::new(
            symbol,
            prices
                .iter()
                .map(|&(ts, price)| RawPoint::uniform(ts, price))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 선택한 필드에 값이 있는 포인트 수.
    pub fn usable_count(&self, field: PriceField) -> usize {
        self.points
            .iter()
            .filter(|p| p.price(field).is_some_and(f64::is_finite))
            .count()
    }
}

/// 날짜별 가격.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 기준 시간대의 달력 날짜 (ISO `YYYY-MM-DD`로 직렬화)
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// "since" 기간 필터 결과가 비어 전체 시계열로 대체되었음을 나타냅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinceFallback {
    /// 요청한 시작 날짜 (해당 연도 1월 1일)
    pub requested_from: NaiveDate,
    /// 실제 사용한 시작 날짜 (가장 이른 유효 데이터)
    pub used_from: NaiveDate,
}

/// 정규화된 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub symbol: String,
    /// 가격을 뽑은 필드
    pub price_field: PriceField,
    /// 날짜 오름차순, 중복 없음
    pub points: Vec<PricePoint>,
    /// since 기간 대체 여부
    pub fallback: Option<SinceFallback>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// 기간 대체가 일어났는지 확인합니다.
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
