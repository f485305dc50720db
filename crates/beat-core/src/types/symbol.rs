//! 티커 심볼 정규화와 벤치마크 프리셋.

use crate::error::{CompareError, CompareResult};

/// 티커 최대 길이.
const MAX_TICKER_LEN: usize = 15;

/// 기본 벤치마크 프리셋 (심볼, 설명).
pub const BENCHMARK_PRESETS: [(&str, &str); 5] = [
    ("VOO", "Vanguard S&P 500 ETF"),
    ("SPY", "SPDR S&P 500 ETF"),
    ("QQQ", "Invesco Nasdaq 100 ETF"),
    ("DIA", "SPDR Dow Jones Industrial Average ETF"),
    ("IWM", "iShares Russell 2000 ETF"),
];

/// 사용자가 입력한 티커를 정규화합니다.
///
/// 앞뒤 공백을 제거하고 대문자로 바꿉니다. 비어 있거나 허용되지 않는 문자가
/// 포함되면 `InvalidInput`을 반환합니다. 허용 문자: 영문, 숫자, `.`, `-`, `^`, `=`
/// (예: "BRK-B", "005930.KS", "^GSPC", "EURUSD=X").
pub fn normalize_ticker(raw: &str) -> CompareResult<String> {
    let ticker = raw.trim().to_uppercase();

    if ticker.is_empty() {
        return Err(CompareError::invalid("Please enter both ticker symbols."));
    }
    if ticker.len() > MAX_TICKER_LEN {
        return Err(CompareError::invalid(format!(
            "Ticker symbol too long: {}",
            ticker
        )));
    }
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(CompareError::invalid(format!(
            "Ticker symbol contains invalid characters: {}",
            raw.trim()
        )));
    }

    Ok(ticker)
}

/// 프리셋 벤치마크인지 확인합니다.
pub fn is_benchmark_preset(ticker: &str) -> bool {
    BENCHMARK_PRESETS
        .iter()
        .any(|(symbol, _)| symbol.eq_ignore_ascii_case(ticker))
}
