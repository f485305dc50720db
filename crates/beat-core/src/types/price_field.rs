//! 가격 필드 선택.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 비교에 사용할 가격 필드.
///
/// 수정 종가와 원 종가는 서로 바꿔 쓸 수 없으므로, 한 비교의 두 시계열에는
/// 반드시 같은 필드를 사용해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    /// 배당/분할 반영 수정 종가
    #[default]
    Adjusted,
    /// 원 종가
    Unadjusted,
}

impl PriceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Adjusted => "adjusted",
            PriceField::Unadjusted => "unadjusted",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adjusted" | "adj" | "adjclose" => Ok(PriceField::Adjusted),
            "unadjusted" | "close" | "raw" => Ok(PriceField::Unadjusted),
            _ => Err(format!(
                "Invalid price field: {}. Supported: adjusted, unadjusted",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_field_parsing() {
        assert_eq!("adjusted".parse::<PriceField>().unwrap(), PriceField::Adjusted);
        assert_eq!("AdjClose".parse::<PriceField>().unwrap(), PriceField::Adjusted);
        assert_eq!("close".parse::<PriceField>().unwrap(), PriceField::Unadjusted);
        assert!("open".parse::<PriceField>().is_err());
        assert_eq!(PriceField::default(), PriceField::Adjusted);
    }
}
