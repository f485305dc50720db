//! 설정 관리.
//!
//! 설정은 선택적인 TOML 파일에서 읽고 `BEAT__섹션__키` 형식의 환경 변수로
//! 덮어씁니다. 모든 섹션에 기본값이 있으므로 파일 없이도 동작합니다.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::types::{PriceField, WindowSelector};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "BEAT";

/// 설정 로드/검증 에러.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 또는 환경 변수 로드 실패
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// 값 검증 실패
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 외부 데이터 소스 설정
    pub data: DataSourceConfig,
    /// 비교 파이프라인 설정
    pub compare: CompareConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 외부 시계열 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSourceConfig {
    /// 차트 API 기본 URL
    pub base_url: String,
    /// HTTP User-Agent
    pub user_agent: String,
    /// 요청 URL 앞에 붙일 프록시 접두사 (예: "https://corsproxy.io/?")
    pub proxy_prefix: Option<String>,
    /// 개별 HTTP 요청 타임아웃 (초)
    pub http_timeout_secs: u64,
    /// 일시적 실패 시 최대 재시도 횟수
    pub max_retries: u32,
    /// 재시도 기본 대기 시간 (밀리초)
    pub retry_delay_ms: u64,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            proxy_prefix: None,
            http_timeout_secs: 15,
            max_retries: 2,
            retry_delay_ms: 500,
        }
    }
}

/// 비교 파이프라인 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompareConfig {
    /// 벤치마크 미지정 시 사용할 심볼
    pub default_benchmark: String,
    /// 기간 미지정 시 사용할 선택자 (예: "1y")
    pub default_window: String,
    /// 날짜 경계를 결정하는 기준 시간대 (IANA 이름)
    pub timezone: String,
    /// 가격 필드 (adjusted, unadjusted)
    pub price_field: String,
    /// "since" 기간에 허용되는 가장 이른 연도
    pub earliest_since_year: i32,
    /// 요청 전체(두 조회의 합류) 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            default_benchmark: "VOO".to_string(),
            default_window: "1y".to_string(),
            timezone: "America/Los_Angeles".to_string(),
            price_field: "adjusted".to_string(),
            earliest_since_year: 1970,
            request_timeout_secs: 30,
        }
    }
}

impl CompareConfig {
    /// 설정된 시간대를 파싱합니다.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        parse_timezone(&self.timezone)
    }

    /// 설정된 가격 필드를 파싱합니다.
    pub fn price_field(&self) -> Result<PriceField, ConfigError> {
        self.price_field
            .parse()
            .map_err(ConfigError::Validation)
    }

    /// 설정된 기본 기간 선택자를 파싱합니다.
    pub fn default_window(&self) -> Result<WindowSelector, ConfigError> {
        self.default_window
            .parse()
            .map_err(ConfigError::Validation)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// IANA 시간대 이름을 파싱합니다.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| ConfigError::Validation(format!("Unknown timezone '{}': {}", name, e)))
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compare.timezone()?;
        self.compare.price_field()?;
        self.compare.default_window()?;

        if self.compare.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "compare.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(1900..=2100).contains(&self.compare.earliest_since_year) {
            return Err(ConfigError::Validation(format!(
                "compare.earliest_since_year out of range: {}",
                self.compare.earliest_since_year
            )));
        }
        if self.compare.default_benchmark.trim().is_empty() {
            return Err(ConfigError::Validation(
                "compare.default_benchmark must not be empty".to_string(),
            ));
        }
        if self.data.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data.base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
