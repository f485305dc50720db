//! 종목 대 벤치마크 비교 명령.

use std::time::Duration;

use anyhow::{Context, Result};
use beat_analytics::{
    CompareSettings, ComparisonRequest, ComparisonService, ComparisonSession, DisplayState,
};
use beat_core::{
    compare_span, is_benchmark_preset, parse_timezone, AppConfig, CompareError, ComparisonReport,
    PriceField, WindowSelector,
};
use beat_data::YahooChartFetcher;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Instrument};

use super::render::{write_report, OutputFormat};

/// 비교 명령 옵션.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// 비교할 종목 심볼
    pub symbol: String,
    /// 벤치마크 심볼 (없으면 설정 기본값)
    pub benchmark: Option<String>,
    /// 기간 선택자 (없으면 설정 기본값, `since`가 있으면 since)
    pub window: Option<String>,
    /// since 기간 시작 연도
    pub since: Option<i32>,
    /// 가격 필드 재정의
    pub field: Option<String>,
    /// 기준 시간대 재정의
    pub timezone: Option<String>,
    /// 출력 형식
    pub format: OutputFormat,
    /// 출력 파일 경로
    pub output: Option<String>,
}

/// 옵션과 설정으로 비교 요청을 만듭니다.
pub fn build_request(options: &CompareOptions, config: &AppConfig) -> Result<ComparisonRequest> {
    let window: WindowSelector = match (&options.window, options.since) {
        (Some(window), _) => window.parse().map_err(anyhow::Error::msg)?,
        (None, Some(_)) => WindowSelector::Since,
        (None, None) => config.compare.default_window()?,
    };
    if let Some(year) = options.since.filter(|_| window != WindowSelector::Since) {
        anyhow::bail!(
            "--since {} only applies to the 'since' window, not '{}'",
            year,
            window
        );
    }

    let mut request = ComparisonRequest::new(options.symbol.clone(), window);
    request.benchmark_symbol = options.benchmark.clone();
    request.since_year = options.since;
    Ok(request)
}

/// 설정에 명령줄 재정의를 적용해 파이프라인 설정을 만듭니다.
pub fn build_settings(options: &CompareOptions, config: &AppConfig) -> Result<CompareSettings> {
    let mut settings = CompareSettings::from_config(&config.compare)?;

    if let Some(field) = &options.field {
        let field: PriceField = field.parse().map_err(anyhow::Error::msg)?;
        settings = settings.with_price_field(field);
    }
    if let Some(tz) = &options.timezone {
        settings = settings.with_timezone(parse_timezone(tz)?);
    }

    Ok(settings)
}

/// 비교 실패 메시지. 입력을 고쳐서 해결할 수 있는 에러에는 안내를 덧붙입니다.
pub fn failure_message(error: &CompareError) -> String {
    if error.is_user_correctable() {
        format!(
            "{} (check the symbols, window or start year and try again)",
            error
        )
    } else {
        error.to_string()
    }
}

/// 비교를 실행하고 결과를 출력합니다.
pub async fn run_compare(options: CompareOptions, config: &AppConfig) -> Result<ComparisonReport> {
    let request = build_request(&options, config)?;
    let settings = build_settings(&options, config)?;
    let fetcher = YahooChartFetcher::new(&config.data).context("Failed to create HTTP client")?;
    let service = ComparisonService::new(fetcher, settings);
    let session = ComparisonSession::new();

    let benchmark = request
        .benchmark_symbol
        .clone()
        .unwrap_or_else(|| service.settings().default_benchmark.clone());
    info!(window = %request.window, "Comparing {} against {}", request.main_symbol, benchmark);
    if !is_benchmark_preset(&benchmark) {
        info!("Using custom benchmark: {}", benchmark);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching {} and benchmark...", request.main_symbol));
    pb.enable_steady_tick(Duration::from_millis(100));

    session
        .run(&service, &request)
        .instrument(compare_span!("compare", request.main_symbol, benchmark))
        .await;
    pb.finish_and_clear();

    let report = match session.display().await {
        DisplayState::Report(report) => report,
        DisplayState::Failed(e) => anyhow::bail!(failure_message(&e)),
        DisplayState::Idle => anyhow::bail!("Comparison did not produce a result"),
    };

    for warning in &report.warnings {
        warn!("{}", warning);
    }

    write_report(&report, options.format, options.output.as_deref())?;
    Ok(report)
}
