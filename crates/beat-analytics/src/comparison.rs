//! 비교 요청 오케스트레이션.
//!
//! 한 요청의 흐름:
//! 1. 심볼 검증 및 기간 해석 (기준 시간대의 현재 시점 기준)
//! 2. 종목/벤치마크 동시 조회 (`try_join!`, 하나라도 실패하면 즉시 실패)
//! 3. 두 조회의 합류를 요청 타임아웃 하나로 제한
//! 4. 같은 필드/시간대로 정규화 → 정렬 → 지표 계산
//! 5. 평면 구조의 [`ComparisonReport`] 반환

use std::time::Duration;

use beat_core::{
    normalize_ticker, CompareConfig, CompareError, CompareResult, ComparisonReport,
    ComparisonWarning, ConfigError, NormalizedSeries, PriceField, RawSeries, WindowSelector,
};
use beat_data::SeriesFetcher;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, instrument};

use crate::alignment::align;
use crate::normalizer::SeriesNormalizer;
use crate::performance::{growth_index, relative_series, span_years, summarize_pair};
use crate::window::{resolve, ResolvedWindow};

/// 파이프라인 실행 설정.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareSettings {
    /// 날짜 경계를 결정하는 기준 시간대
    pub timezone: Tz,
    /// 두 시계열에 공통으로 사용할 가격 필드
    pub price_field: PriceField,
    /// 벤치마크 미지정 시 사용할 심볼
    pub default_benchmark: String,
    /// since 기간에 허용되는 가장 이른 연도
    pub earliest_since_year: i32,
    /// 두 조회의 합류 대기 제한
    pub request_timeout: Duration,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Los_Angeles,
            price_field: PriceField::Adjusted,
            default_benchmark: "VOO".to_string(),
            earliest_since_year: 1970,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl CompareSettings {
    /// 설정 파일의 `[compare]` 섹션에서 생성합니다.
    pub fn from_config(config: &CompareConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            timezone: config.timezone()?,
            price_field: config.price_field()?,
            default_benchmark: config.default_benchmark.clone(),
            earliest_since_year: config.earliest_since_year,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_price_field(mut self, price_field: PriceField) -> Self {
        self.price_field = price_field;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// 비교 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub main_symbol: String,
    /// `None`이면 설정의 기본 벤치마크
    pub benchmark_symbol: Option<String>,
    pub window: WindowSelector,
    /// `WindowSelector::Since`에서만 사용
    pub since_year: Option<i32>,
}

impl ComparisonRequest {
    pub fn new(main_symbol: impl Into<String>, window: WindowSelector) -> Self {
        Self {
            main_symbol: main_symbol.into(),
            benchmark_symbol: None,
            window,
            since_year: None,
        }
    }

    pub fn with_benchmark(mut self, symbol: impl Into<String>) -> Self {
        self.benchmark_symbol = Some(symbol.into());
        self
    }

    pub fn since(mut self, year: i32) -> Self {
        self.window = WindowSelector::Since;
        self.since_year = Some(year);
        self
    }
}

/// 비교 서비스.
pub struct ComparisonService<F> {
    fetcher: F,
    settings: CompareSettings,
}

impl<F: SeriesFetcher> ComparisonService<F> {
    pub fn new(fetcher: F, settings: CompareSettings) -> Self {
        Self { fetcher, settings }
    }

    pub fn settings(&self) -> &CompareSettings {
        &self.settings
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// 현재 시점 기준으로 비교를 실행합니다.
    pub async fn compare(&self, request: &ComparisonRequest) -> CompareResult<ComparisonReport> {
        self.compare_at(request, Utc::now()).await
    }

    /// 주어진 시점을 "오늘"로 보고 비교를 실행합니다.
    #[instrument(
        skip(self, request),
        fields(
            main = %request.main_symbol,
            window = %request.window,
            fetcher = self.fetcher.name()
        )
    )]
    pub async fn compare_at(
        &self,
        request: &ComparisonRequest,
        now: DateTime<Utc>,
    ) -> CompareResult<ComparisonReport> {
        let main = normalize_ticker(&request.main_symbol)?;
        let bench = normalize_ticker(
            request
                .benchmark_symbol
                .as_deref()
                .unwrap_or(&self.settings.default_benchmark),
        )?;

        let reference = now.with_timezone(&self.settings.timezone);
        let window = resolve(
            request.window,
            &reference,
            request.since_year,
            self.settings.earliest_since_year,
        )?;
        debug!(
            benchmark = %bench,
            range = %window.range,
            interval = %window.granularity,
            elapsed_days = window.elapsed_days,
            "기간 해석 완료"
        );

        let (main_raw, bench_raw) = self.fetch_pair(&main, &bench, &window).await?;

        let normalizer = SeriesNormalizer::new(self.settings.timezone, self.settings.price_field);
        let main_series = normalizer.normalize(&main_raw, &window.spec)?;
        let bench_series = normalizer.normalize(&bench_raw, &window.spec)?;

        let report = self.build_report(request, &window, main_series, bench_series)?;
        info!(
            main = %report.main_symbol,
            benchmark = %report.benchmark_symbol,
            points = report.len(),
            final_relative = report.final_relative().unwrap_or(1.0),
            "비교 완료"
        );
        Ok(report)
    }

    /// 두 시계열을 동시에 조회합니다. 합류 대기는 요청 타임아웃으로 제한됩니다.
    async fn fetch_pair(
        &self,
        main: &str,
        bench: &str,
        window: &ResolvedWindow,
    ) -> CompareResult<(RawSeries, RawSeries)> {
        let joined = async {
            tokio::try_join!(self.fetch_leg(main, window), self.fetch_leg(bench, window))
        };

        match tokio::time::timeout(self.settings.request_timeout, joined).await {
            Ok(result) => result,
            Err(_) => Err(CompareError::Timeout {
                secs: timeout_secs(self.settings.request_timeout),
            }),
        }
    }

    async fn fetch_leg(&self, symbol: &str, window: &ResolvedWindow) -> CompareResult<RawSeries> {
        self.fetcher
            .fetch(symbol, window.range, window.granularity)
            .await
            .map_err(|e| e.into_compare_error(symbol))
    }

    fn build_report(
        &self,
        request: &ComparisonRequest,
        window: &ResolvedWindow,
        main_series: NormalizedSeries,
        bench_series: NormalizedSeries,
    ) -> CompareResult<ComparisonReport> {
        let warnings: Vec<ComparisonWarning> = [&main_series, &bench_series]
            .iter()
            .filter_map(|s| {
                s.fallback.map(|f| ComparisonWarning::SinceFallback {
                    symbol: s.symbol.clone(),
                    requested_from: f.requested_from,
                    used_from: f.used_from,
                })
            })
            .collect();

        let pair = align(&main_series, &bench_series)?;
        let relative = relative_series(pair.main_prices(), pair.bench_prices())?;
        let main_growth_index = growth_index(pair.main_prices())?;
        let bench_growth_index = growth_index(pair.bench_prices())?;
        let (main_summary, bench_summary) =
            summarize_pair(&pair, &main_series.symbol, &bench_series.symbol)?;
        let span_days = pair.span_days();
        let (dates, main_prices, bench_prices) = pair.into_parts();

        Ok(ComparisonReport {
            main_symbol: main_series.symbol,
            benchmark_symbol: bench_series.symbol,
            window: window.selector,
            since_year: match window.selector {
                WindowSelector::Since => request.since_year,
                _ => None,
            },
            price_field: self.settings.price_field,
            timezone: self.settings.timezone.name().to_string(),
            dates,
            relative_series: relative,
            main_prices,
            bench_prices,
            main_growth_index,
            bench_growth_index,
            main_summary,
            bench_summary,
            span_days,
            years: span_years(span_days),
            warnings,
        })
    }
}

/// 에러 메시지용 타임아웃 초 (올림, 최소 1).
fn timeout_secs(timeout: Duration) -> u64 {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beat_core::AppConfig;

    #[test]
    fn test_settings_from_config() {
        let mut config = AppConfig::default().compare;
        config.timezone = "Asia/Seoul".to_string();
        config.price_field = "close".to_string();
        config.request_timeout_secs = 5;

        let settings = CompareSettings::from_config(&config).unwrap();
        assert_eq!(settings.timezone, chrono_tz::Asia::Seoul);
        assert_eq!(settings.price_field, PriceField::Unadjusted);
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_secs_rounds_up() {
        assert_eq!(timeout_secs(Duration::from_secs(30)), 30);
        assert_eq!(timeout_secs(Duration::from_millis(500)), 1);
        assert_eq!(timeout_secs(Duration::from_millis(1500)), 2);
        assert_eq!(timeout_secs(Duration::ZERO), 1);
    }

    #[test]
    fn test_request_builder() {
        let request = ComparisonRequest::new("aapl", WindowSelector::Y1)
            .with_benchmark("qqq")
            .since(2018);
        assert_eq!(request.window, WindowSelector::Since);
        assert_eq!(request.since_year, Some(2018));
        assert_eq!(request.benchmark_symbol.as_deref(), Some("qqq"));
    }
}
