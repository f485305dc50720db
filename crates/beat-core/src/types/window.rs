//! 비교 기간 선택자와 조회 범위 정의.
//!
//! 사용자가 고르는 기호적 기간(`1y`, `ytd`, `since` 등)과, 그 기간을 외부 데이터
//! 소스에 요청할 때 사용하는 범위/간격 문자열을 함께 정의합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 기간 선택자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSelector {
    /// 최근 5일
    D5,
    /// 최근 30일
    D30,
    /// 최근 90일
    D90,
    /// 최근 6개월 (182일)
    M6,
    /// 최근 1년
    Y1,
    /// 최근 5년
    Y5,
    /// 최근 10년
    Y10,
    /// 올해 1월 1일부터
    Ytd,
    /// 지정한 연도 1월 1일부터 (연도는 별도로 전달)
    Since,
}

impl WindowSelector {
    /// 모든 선택자 (표시 순서).
    pub const ALL: [WindowSelector; 9] = [
        WindowSelector::D5,
        WindowSelector::D30,
        WindowSelector::D90,
        WindowSelector::M6,
        WindowSelector::Y1,
        WindowSelector::Y5,
        WindowSelector::Y10,
        WindowSelector::Ytd,
        WindowSelector::Since,
    ];

    /// 고정 기간 선택자의 달력 일수를 반환합니다.
    ///
    /// `Ytd`와 `Since`는 기준 날짜에 따라 달라지므로 `None`입니다.
    pub fn fixed_days(&self) -> Option<u32> {
        match self {
            WindowSelector::D5 => Some(5),
            WindowSelector::D30 => Some(30),
            WindowSelector::D90 => Some(90),
            WindowSelector::M6 => Some(182),
            WindowSelector::Y1 => Some(365),
            WindowSelector::Y5 => Some(365 * 5),
            WindowSelector::Y10 => Some(365 * 10),
            WindowSelector::Ytd | WindowSelector::Since => None,
        }
    }

    /// 데이터 소스에 요청할 조회 범위.
    pub fn range_spec(&self) -> RangeSpec {
        match self {
            WindowSelector::D5 => RangeSpec::Days5,
            WindowSelector::D30 => RangeSpec::Month1,
            WindowSelector::D90 => RangeSpec::Month3,
            WindowSelector::M6 => RangeSpec::Month6,
            WindowSelector::Y1 => RangeSpec::Year1,
            WindowSelector::Y5 => RangeSpec::Year5,
            WindowSelector::Y10 => RangeSpec::Year10,
            WindowSelector::Ytd => RangeSpec::YearToDate,
            // fallback 처리를 위해 전체 이력을 받아둔다
            WindowSelector::Since => RangeSpec::Max,
        }
    }

    /// 선택자 문자열 (`FromStr`와 왕복 가능).
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowSelector::D5 => "5d",
            WindowSelector::D30 => "30d",
            WindowSelector::D90 => "90d",
            WindowSelector::M6 => "6mo",
            WindowSelector::Y1 => "1y",
            WindowSelector::Y5 => "5y",
            WindowSelector::Y10 => "10y",
            WindowSelector::Ytd => "ytd",
            WindowSelector::Since => "since",
        }
    }

    /// 사람이 읽기 위한 설명.
    pub fn description(&self) -> &'static str {
        match self {
            WindowSelector::D5 => "Last 5 days",
            WindowSelector::D30 => "Last 30 days",
            WindowSelector::D90 => "Last 90 days",
            WindowSelector::M6 => "Last 6 months",
            WindowSelector::Y1 => "Last year",
            WindowSelector::Y5 => "Last 5 years (weekly bars)",
            WindowSelector::Y10 => "Last 10 years (weekly bars)",
            WindowSelector::Ytd => "Year to date",
            WindowSelector::Since => "Since January 1 of a given year (--since)",
        }
    }
}

impl fmt::Display for WindowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5d" => Ok(WindowSelector::D5),
            "30d" | "1mo" => Ok(WindowSelector::D30),
            "90d" | "3mo" => Ok(WindowSelector::D90),
            "182d" | "6mo" => Ok(WindowSelector::M6),
            "365d" | "1y" => Ok(WindowSelector::Y1),
            "5y" => Ok(WindowSelector::Y5),
            "10y" => Ok(WindowSelector::Y10),
            "ytd" => Ok(WindowSelector::Ytd),
            "since" => Ok(WindowSelector::Since),
            _ => Err(format!(
                "Invalid window: {}. Supported: 5d, 30d, 90d, 6mo, 1y, 5y, 10y, ytd, since",
                s
            )),
        }
    }
}

/// 데이터 소스 조회 범위.
///
/// 차트 API의 `range` 파라미터 형식을 따릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeSpec {
    Days5,
    Month1,
    Month3,
    Month6,
    Year1,
    Year5,
    Year10,
    YearToDate,
    Max,
}

impl RangeSpec {
    /// `range` 쿼리 파라미터 값.
    pub fn as_query(&self) -> &'static str {
        match self {
            RangeSpec::Days5 => "5d",
            RangeSpec::Month1 => "1mo",
            RangeSpec::Month3 => "3mo",
            RangeSpec::Month6 => "6mo",
            RangeSpec::Year1 => "1y",
            RangeSpec::Year5 => "5y",
            RangeSpec::Year10 => "10y",
            RangeSpec::YearToDate => "ytd",
            RangeSpec::Max => "max",
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// 캔들 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// 일봉
    Daily,
    /// 주봉
    Weekly,
}

impl Granularity {
    /// 주봉으로 전환하는 경과 일수 기준 (5년).
    pub const WEEKLY_THRESHOLD_DAYS: i64 = 365 * 5;

    /// `interval` 쿼리 파라미터 값.
    pub fn as_query(&self) -> &'static str {
        match self {
            Granularity::Daily => "1d",
            Granularity::Weekly => "1wk",
        }
    }

    /// 경과 일수에 맞는 간격을 고릅니다.
    pub fn for_span_days(days: i64) -> Self {
        if days > Self::WEEKLY_THRESHOLD_DAYS {
            Granularity::Weekly
        } else {
            Granularity::Daily
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parsing() {
        assert_eq!("1y".parse::<WindowSelector>().unwrap(), WindowSelector::Y1);
        assert_eq!("365d".parse::<WindowSelector>().unwrap(), WindowSelector::Y1);
        assert_eq!("YTD".parse::<WindowSelector>().unwrap(), WindowSelector::Ytd);
        assert_eq!("3mo".parse::<WindowSelector>().unwrap(), WindowSelector::D90);
        assert_eq!("since".parse::<WindowSelector>().unwrap(), WindowSelector::Since);
        assert!("2w".parse::<WindowSelector>().is_err());
    }

    #[test]
    fn test_selector_round_trip() {
        for selector in WindowSelector::ALL {
            assert_eq!(selector.as_str().parse::<WindowSelector>().unwrap(), selector);
        }
    }

    #[test]
    fn test_fixed_days() {
        assert_eq!(WindowSelector::D30.fixed_days(), Some(30));
        assert_eq!(WindowSelector::M6.fixed_days(), Some(182));
        assert_eq!(WindowSelector::Y10.fixed_days(), Some(3650));
        assert_eq!(WindowSelector::Ytd.fixed_days(), None);
        assert_eq!(WindowSelector::Since.fixed_days(), None);
    }

    #[test]
    fn test_range_spec() {
        assert_eq!(WindowSelector::D30.range_spec().as_query(), "1mo");
        assert_eq!(WindowSelector::Ytd.range_spec().as_query(), "ytd");
        assert_eq!(WindowSelector::Since.range_spec().as_query(), "max");
    }

    #[test]
    fn test_granularity_threshold() {
        assert_eq!(Granularity::for_span_days(365), Granularity::Daily);
        assert_eq!(Granularity::for_span_days(365 * 5), Granularity::Daily);
        assert_eq!(Granularity::for_span_days(365 * 5 + 1), Granularity::Weekly);
        assert_eq!(Granularity::Weekly.as_query(), "1wk");
    }
}
