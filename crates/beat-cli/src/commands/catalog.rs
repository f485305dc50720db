//! 지원 기간과 벤치마크 프리셋 목록.

use beat_core::{WindowSelector, BENCHMARK_PRESETS};

/// 지원하는 기간 선택자 출력.
pub fn print_windows() {
    println!("\n지원 기간:");
    println!("{:-<50}", "");
    for window in WindowSelector::ALL {
        println!("  {:<6} - {}", window.as_str(), window.description());
    }
    println!("\n* since 기간은 --since <YEAR>로 시작 연도를 지정하세요.");
}

/// 벤치마크 프리셋 출력.
pub fn print_benchmarks(default_benchmark: &str) {
    println!("\n벤치마크 프리셋:");
    println!("{:-<50}", "");
    for (symbol, name) in BENCHMARK_PRESETS {
        let marker = if symbol == default_benchmark { " (default)" } else { "" };
        println!("  {} - {}{}", symbol, name, marker);
    }
    println!("\n* 다른 심볼은 -b <SYMBOL>로 직접 지정할 수 있습니다.");
}
