//! Yahoo Finance v8 차트 API 조회기.
//!
//! API 키 없이 `/v8/finance/chart/{symbol}`에서 일봉/주봉 종가를 조회합니다.
//! 원 종가(`indicators.quote[0].close`)와 수정 종가(`indicators.adjclose[0].adjclose`)를
//! 함께 보관하며, 어느 필드를 쓸지는 정규화 단계에서 결정합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use beat_core::{DataSourceConfig, Granularity, RangeSpec};
//! use beat_data::{SeriesFetcher, YahooChartFetcher};
//!
//! let fetcher = YahooChartFetcher::new(&DataSourceConfig::default())?;
//! let series = fetcher.fetch("AAPL", RangeSpec::Year1, Granularity::Daily).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use beat_core::{DataSourceConfig, Granularity, RangeSpec, RawPoint, RawSeries};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::retry::{with_retry, RetryConfig};
use crate::traits::{FetchResult, SeriesFetcher};
use crate::FetchError;

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooQuote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 차트 조회기.
pub struct YahooChartFetcher {
    client: Client,
    base_url: String,
    proxy_prefix: Option<String>,
    retry: RetryConfig,
}

impl YahooChartFetcher {
    /// 설정으로부터 조회기를 생성합니다.
    pub fn new(settings: &DataSourceConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            proxy_prefix: settings
                .proxy_prefix
                .clone()
                .filter(|p| !p.trim().is_empty()),
            retry: RetryConfig::from_settings(settings),
        })
    }

    /// 재시도 정책을 교체합니다.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// 요청 URL 생성.
    ///
    /// 프록시 접두사가 있으면 전체 URL 앞에 그대로 붙입니다.
    pub fn chart_url(&self, symbol: &str, range: RangeSpec, granularity: Granularity) -> String {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includeAdjustedClose=true",
            self.base_url,
            symbol,
            range.as_query(),
            granularity.as_query()
        );

        match &self.proxy_prefix {
            Some(prefix) => format!("{}{}", prefix, url),
            None => url,
        }
    }

    async fn fetch_once(&self, symbol: &str, url: &str) -> FetchResult<RawSeries> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        let body = response.text().await?;
        debug!(symbol = symbol, status = status.as_u16(), bytes = body.len(), "차트 응답 수신");

        if !status.is_success() {
            // 4xx 응답도 chart.error 페이로드를 담는 경우가 많음
            if let Ok(parsed) = serde_json::from_str::<YahooChartResponse>(&body) {
                if let Some(error) = parsed.chart.error {
                    return Err(FetchError::Api {
                        code: error.code,
                        description: error.description,
                    });
                }
            }
            return Err(FetchError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string(),
            });
        }

        parse_chart_response(symbol, &body)
    }
}

#[async_trait]
impl SeriesFetcher for YahooChartFetcher {
    fn name(&self) -> &str {
        "yahoo"
    }

    #[instrument(skip(self, range, granularity), fields(range = %range, interval = %granularity))]
    async fn fetch(
        &self,
        symbol: &str,
        range: RangeSpec,
        granularity: Granularity,
    ) -> FetchResult<RawSeries> {
        let url = self.chart_url(symbol, range, granularity);
        debug!(url = %url, "Yahoo Finance 조회");

        let series = with_retry(self.retry, symbol, || self.fetch_once(symbol, &url)).await?;

        debug!(points = series.len(), "Yahoo Finance 조회 완료");
        Ok(series)
    }
}

/// 차트 응답 본문을 원시 시계열로 변환합니다.
///
/// 수정 종가 배열이 아예 없으면 원 종가를 수정 종가로도 사용합니다.
pub fn parse_chart_response(symbol: &str, body: &str) -> FetchResult<RawSeries> {
    let response: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(FetchError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| FetchError::NotFound(symbol.to_string()))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();
    let adj_closes = result
        .indicators
        .adj_close
        .and_then(|ac| ac.into_iter().next())
        .and_then(|ac| ac.adj_close);

    let points = timestamps
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| {
            let close = closes.get(i).copied().flatten();
            let adj_close = match &adj_closes {
                Some(values) => values.get(i).copied().flatten(),
                None => close,
            };
            RawPoint {
                timestamp,
                close,
                adj_close,
            }
        })
        .collect();

    Ok(RawSeries::new(symbol, points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use beat_core::PriceField;

    #[test]
    fn test_parse_keeps_both_price_fields() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": {
                        "quote": [{"close": [185.64, null, 181.91]}],
                        "adjclose": [{"adjclose": [184.73, null, 181.02]}]
                    }
                }],
                "error": null
            }
        }"#;

        let series = parse_chart_response("AAPL", body).unwrap();
        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.len(), 3);
        assert_eq!(series.points[0].close, Some(185.64));
        assert_eq!(series.points[0].adj_close, Some(184.73));
        assert_eq!(series.points[1].adj_close, None);
        assert_eq!(series.usable_count(PriceField::Adjusted), 2);
    }

    #[test]
    fn test_parse_without_adjclose_falls_back_to_close() {
        let body = r#"{"chart":{"result":[{"timestamp":[1,2],
            "indicators":{"quote":[{"close":[10.0,11.0]}]}}],"error":null}}"#;

        let series = parse_chart_response("X", body).unwrap();
        assert_eq!(series.points[1].adj_close, Some(11.0));
    }

    #[test]
    fn test_parse_missing_timestamps_is_empty_series() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{}],"adjclose":[{}]}}],"error":null}}"#;
        let series = parse_chart_response("NEWCO", body).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_api_error_payload() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("ZZZZ", body).unwrap_err();
        assert!(matches!(err, FetchError::Api { ref code, .. } if code == "Not Found"));
    }

    #[test]
    fn test_parse_empty_result_is_not_found() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        let err = parse_chart_response("ZZZZ", body).unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref s) if s == "ZZZZ"));
    }

    #[test]
    fn test_chart_url_with_proxy() {
        let settings = DataSourceConfig {
            proxy_prefix: Some("https://corsproxy.io/?".to_string()),
            ..DataSourceConfig::default()
        };
        let fetcher = YahooChartFetcher::new(&settings).unwrap();
        assert_eq!(
            fetcher.chart_url("VOO", RangeSpec::Year5, Granularity::Weekly),
            "https://corsproxy.io/?https://query1.finance.yahoo.com/v8/finance/chart/VOO?range=5y&interval=1wk&includeAdjustedClose=true"
        );
    }
}
