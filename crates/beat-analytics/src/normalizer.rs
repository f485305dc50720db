//! 원시 시계열 정규화.
//!
//! 1. epoch 타임스탬프를 기준 시간대의 달력 날짜로 변환 (UTC 고정 변환 시 날짜 경계가
//!    밀리는 문제를 피하기 위해 시간대는 항상 명시적으로 전달)
//! 2. 가격 필드 선택 (수정 종가/원 종가는 서로 대체할 수 없음)
//! 3. 결측값(null, NaN, 무한대) 제거
//! 4. 같은 날짜가 여러 번 나오면 마지막 값을 사용하고 날짜 오름차순으로 정렬
//! 5. 기간 정책 적용

use std::collections::BTreeMap;

use beat_core::{
    CompareError, CompareResult, NormalizedSeries, PriceField, PricePoint, RawPoint, RawSeries,
    SinceFallback,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::window::WindowSpec;

/// 시계열 정규화기.
///
/// 한 비교 요청의 두 시계열은 같은 정규화기(같은 필드, 같은 시간대)로 처리해야
/// 비율이 의미를 가집니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesNormalizer {
    timezone: Tz,
    price_field: PriceField,
}

impl SeriesNormalizer {
    pub fn new(timezone: Tz, price_field: PriceField) -> Self {
        Self {
            timezone,
            price_field,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn price_field(&self) -> PriceField {
        self.price_field
    }

    /// epoch 초를 기준 시간대의 달력 날짜로 변환합니다.
    pub fn local_date(&self, timestamp: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(timestamp, 0)
            .map(|utc| utc.with_timezone(&self.timezone).date_naive())
    }

    /// 원시 시계열을 정규화하고 기간 정책을 적용합니다.
    ///
    /// # 에러
    ///
    /// - `EmptySeries`: 원시 포인트가 없거나, 고정 기간에서 사용 가능한 가격이 없음
    /// - `NoDataAvailable`: since 기간에서 사용 가능한 가격이 전혀 없음, 또는 고정
    ///   기간 정책이 모든 항목을 제거함
    pub fn normalize(&self, raw: &RawSeries, window: &WindowSpec) -> CompareResult<NormalizedSeries> {
        if raw.is_empty() {
            return Err(CompareError::EmptySeries {
                symbol: raw.symbol.clone(),
            });
        }

        let points = self.usable_points(raw);
        debug!(
            symbol = %raw.symbol,
            raw = raw.len(),
            usable = points.len(),
            field = %self.price_field,
            tz = %self.timezone,
            "시계열 정규화"
        );

        if points.is_empty() {
            return Err(match window {
                WindowSpec::LastEntries { .. } => CompareError::EmptySeries {
                    symbol: raw.symbol.clone(),
                },
                WindowSpec::Since { year, .. } => CompareError::NoDataAvailable {
                    symbol: raw.symbol.clone(),
                    detail: format!("no valid prices exist to fall back to for since {}", year),
                },
            });
        }

        let (points, fallback) = match *window {
            WindowSpec::LastEntries { days } => {
                let keep = (days as usize).min(points.len());
                let tail = points[points.len() - keep..].to_vec();
                if tail.is_empty() {
                    return Err(CompareError::NoDataAvailable {
                        symbol: raw.symbol.clone(),
                        detail: "the selected window contains no entries".to_string(),
                    });
                }
                (tail, None)
            }
            WindowSpec::Since { from, .. } => {
                let filtered: Vec<PricePoint> =
                    points.iter().copied().filter(|p| p.date >= from).collect();
                if filtered.is_empty() {
                    let used_from = points[0].date;
                    warn!(
                        symbol = %raw.symbol,
                        requested_from = %from,
                        used_from = %used_from,
                        "since 필터 결과 없음, 전체 시계열로 대체"
                    );
                    (
                        points,
                        Some(SinceFallback {
                            requested_from: from,
                            used_from,
                        }),
                    )
                } else {
                    (filtered, None)
                }
            }
        };

        Ok(NormalizedSeries {
            symbol: raw.symbol.clone(),
            price_field: self.price_field,
            points,
            fallback,
        })
    }

    /// 사용 가능한 가격만 날짜별로 모읍니다 (같은 날짜는 마지막 값 우선).
    fn usable_points(&self, raw: &RawSeries) -> Vec<PricePoint> {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for point in &raw.points {
            let Some(price) = point.price(self.price_field).filter(|p| p.is_finite()) else {
                continue;
            };
            let Some(date) = self.local_date(point.timestamp) else {
                continue;
            };
            by_date.insert(date, price);
        }

        by_date
            .into_iter()
            .map(|(date, price)| PricePoint::new(date, price))
            .collect()
    }

    /// 정규화된 시계열을 원시 형태로 되돌립니다.
    ///
    /// 각 날짜의 기준 시간대 정오를 타임스탬프로 사용하므로, 같은 정규화기로 다시
    /// 정규화하면 같은 날짜가 나옵니다.
    pub fn to_raw(&self, series: &NormalizedSeries) -> RawSeries {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        let points = series
            .points
            .iter()
            .filter_map(|p| {
                self.timezone
                    .from_local_datetime(&p.date.and_time(noon))
                    .earliest()
                    .map(|dt| RawPoint::uniform(dt.timestamp(), Some(p.price)))
            })
            .collect();

        RawSeries::new(series.symbol.clone(), points)
    }
}
