//! 기간 선택자 해석.
//!
//! 기호적 선택자(`90d`, `ytd`, `since` + 연도)를 기준 시점에 대해 구체적인
//! [`WindowSpec`]과 데이터 소스 조회 파라미터로 변환합니다.
//!
//! - 고정 기간: 선택자에 정해진 일수
//! - 올해 누적(ytd): `ceil((기준 시점 - 올해 1월 1일 0시) / 1일)`, 최소 1
//! - since: 일수가 아닌 절대 날짜 필터(해당 연도 1월 1일 이후)로 해석됩니다

use beat_core::{CompareError, CompareResult, Granularity, RangeSpec, WindowSelector};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// 정규화 단계에 전달되는 기간 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum WindowSpec {
    /// 시계열에 존재하는 마지막 `days`개 항목만 유지 (달력 일수가 아님)
    LastEntries { days: u32 },
    /// `from` 이후 날짜만 유지, 비면 전체 시계열로 대체
    Since { year: i32, from: NaiveDate },
}

/// 해석된 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub selector: WindowSelector,
    pub spec: WindowSpec,
    /// 데이터 소스 조회 범위
    pub range: RangeSpec,
    /// 데이터 소스 캔들 간격
    pub granularity: Granularity,
    /// 기준 시점까지의 경과 일수 (음수는 0으로 고정)
    pub elapsed_days: i64,
}

/// 선택자를 기준 시점에 대해 해석합니다.
///
/// `since_year`는 `WindowSelector::Since`에서만 사용되며 다른 선택자에서는 무시됩니다.
/// since 연도가 없거나 `earliest_year`보다 이르면 `InvalidInput`입니다.
/// 미래 연도는 허용되며, 정규화 단계의 대체 경로로 처리됩니다.
///
/// ytd 일수는 `ceil((기준 시점 - 1월 1일 0시) / 1일)`입니다. 단, 1월 1일 0시 정각의
/// 결과 0은 의도적으로 1로 올립니다 (0일 기간은 항목을 하나도 남기지 않음).
pub fn resolve(
    selector: WindowSelector,
    reference: &DateTime<Tz>,
    since_year: Option<i32>,
    earliest_year: i32,
) -> CompareResult<ResolvedWindow> {
    match selector {
        WindowSelector::Since => {
            let year = since_year.ok_or_else(|| {
                CompareError::invalid("The 'since' window requires a start year")
            })?;
            if year < earliest_year {
                return Err(CompareError::invalid(format!(
                    "Start year {} is before the earliest supported year {}",
                    year, earliest_year
                )));
            }
            let from = NaiveDate::from_ymd_opt(year, 1, 1)
                .ok_or_else(|| CompareError::invalid(format!("Invalid start year: {}", year)))?;
            let elapsed_days = (reference.date_naive() - from).num_days().max(0);

            Ok(ResolvedWindow {
                selector,
                spec: WindowSpec::Since { year, from },
                range: selector.range_spec(),
                granularity: Granularity::for_span_days(elapsed_days),
                elapsed_days,
            })
        }
        WindowSelector::Ytd => {
            let days = year_to_date_days(reference)?;
            Ok(ResolvedWindow {
                selector,
                spec: WindowSpec::LastEntries { days },
                range: selector.range_spec(),
                granularity: Granularity::Daily,
                elapsed_days: i64::from(days),
            })
        }
        fixed => {
            let days = fixed
                .fixed_days()
                .ok_or_else(|| CompareError::invalid(format!("Unsupported window: {}", fixed)))?;
            let granularity = match fixed {
                WindowSelector::Y5 | WindowSelector::Y10 => Granularity::Weekly,
                _ => Granularity::Daily,
            };
            Ok(ResolvedWindow {
                selector,
                spec: WindowSpec::LastEntries { days },
                range: fixed.range_spec(),
                granularity,
                elapsed_days: i64::from(days),
            })
        }
    }
}

/// 올해 1월 1일 0시(기준 시간대)부터 기준 시점까지의 일수 (올림, 최소 1).
fn year_to_date_days(reference: &DateTime<Tz>) -> CompareResult<u32> {
    let jan1 = NaiveDate::from_ymd_opt(reference.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|dt| reference.timezone().from_local_datetime(&dt).earliest())
        .ok_or_else(|| CompareError::invalid("Cannot determine January 1 in reference timezone"))?;

    let seconds = (reference.naive_utc() - jan1.naive_utc())
        .num_seconds()
        .max(0);
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    Ok(days.max(1) as u32)
}
