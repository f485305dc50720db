//! 비교 결과 출력 (table, csv, json).

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use beat_core::ComparisonReport;
use tracing::info;

/// 표 형식에서 보여줄 최대 시계열 행 수.
pub const TABLE_SAMPLE_ROWS: usize = 20;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 결과를 지정한 형식으로 파일 또는 stdout에 출력합니다.
pub fn write_report(
    report: &ComparisonReport,
    format: OutputFormat,
    output_path: Option<&str>,
) -> Result<()> {
    let content = render(report, format)?;

    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// 결과를 문자열로 렌더링합니다.
pub fn render(report: &ComparisonReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(report)),
        OutputFormat::Csv => Ok(format_csv(report)),
        OutputFormat::Json => format_json(report),
    }
}

/// 테이블 형식 출력 (요약 + 표본 시계열).
pub fn format_table(report: &ComparisonReport) -> String {
    let mut output = String::new();

    let window = match report.since_year {
        Some(year) => format!("since {}", year),
        None => report.window.to_string(),
    };
    output.push_str(&format!(
        "{} vs {} | window: {} | field: {} | tz: {}\n",
        report.main_symbol, report.benchmark_symbol, window, report.price_field, report.timezone
    ));
    if let (Some(first), Some(last)) = (report.dates.first(), report.dates.last()) {
        output.push_str(&format!(
            "{} → {} ({} points, {} days, {:.2} years)\n",
            first,
            last,
            report.len(),
            report.span_days,
            report.years
        ));
    }
    output.push('\n');

    // 요약
    output.push_str(&format!(
        "{:<10} {:>12} {:>12} {:>12} {:>10} {:>14}\n",
        "SYMBOL", "FIRST", "LAST", "GROWTH %", "CAGR %", "AVG RETURN %"
    ));
    output.push_str(&"-".repeat(75));
    output.push('\n');
    for leg in [&report.main_summary, &report.bench_summary] {
        output.push_str(&format!(
            "{:<10} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>14.4}\n",
            leg.symbol,
            leg.first_price,
            leg.last_price,
            leg.metrics.total_growth_pct,
            leg.metrics.cagr_pct,
            leg.metrics.avg_daily_return_pct
        ));
    }

    if let Some(relative) = report.final_relative() {
        let verdict = if report.beats_benchmark() {
            "outperformed"
        } else {
            "did not outperform"
        };
        output.push_str(&format!(
            "\nRelative: {:.4} ({} {} {})\n",
            relative, report.main_symbol, verdict, report.benchmark_symbol
        ));
    }

    // 시계열 표본
    output.push('\n');
    output.push_str(&format!(
        "{:<12} {:>12} {:>12} {:>10}\n",
        "DATE", report.main_symbol, report.benchmark_symbol, "RELATIVE"
    ));
    output.push_str(&"-".repeat(49));
    output.push('\n');
    for i in sample_indices(report.len(), TABLE_SAMPLE_ROWS) {
        output.push_str(&format!(
            "{:<12} {:>12.2} {:>12.2} {:>10.4}\n",
            report.dates[i].to_string(),
            report.main_prices[i],
            report.bench_prices[i],
            report.relative_series[i]
        ));
    }

    for warning in &report.warnings {
        output.push_str(&format!("\nWarning: {}", warning));
    }

    output
}

/// CSV 형식 출력 (정렬된 날짜마다 한 행).
pub fn format_csv(report: &ComparisonReport) -> String {
    let mut output = String::new();

    output.push_str("date,main_price,bench_price,relative,main_index,bench_index\n");
    for i in 0..report.len() {
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            report.dates[i],
            report.main_prices[i],
            report.bench_prices[i],
            report.relative_series[i],
            report.main_growth_index[i],
            report.bench_growth_index[i]
        ));
    }

    output
}

/// JSON 형식 출력.
pub fn format_json(report: &ComparisonReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize to JSON")
}

/// 길이 `len`에서 처음과 끝을 포함해 최대 `max`개의 인덱스를 고르게 고릅니다.
pub fn sample_indices(len: usize, max: usize) -> Vec<usize> {
    if len <= max {
        return (0..len).collect();
    }
    if max < 2 {
        return (len - max..len).collect();
    }
    let step = (len - 1) as f64 / (max - 1) as f64;
    let mut indices: Vec<usize> = (0..max).map(|i| (i as f64 * step).round() as usize).collect();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::parse("TABLE").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("csv").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::parse("xml").is_err());
    }

    #[test]
    fn test_sample_indices_keep_endpoints() {
        assert_eq!(sample_indices(3, 20), vec![0, 1, 2]);

        let indices = sample_indices(250, 20);
        assert_eq!(indices.len(), 20);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[19], 249);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}
