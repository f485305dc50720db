//! 종목 대 벤치마크 상대 성과 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # AAPL vs VOO, 최근 1년 (기본값)
//! beat compare -s AAPL
//!
//! # NVDA vs QQQ, 최근 5년 (주봉), CSV 저장
//! beat compare -s NVDA -b QQQ -w 5y -f csv -o nvda_vs_qqq.csv
//!
//! # 2018년 1월 1일부터, 원 종가 기준, 서울 시간대
//! beat compare -s 005930.KS -b SPY --since 2018 --field unadjusted --tz Asia/Seoul
//!
//! # 지원 기간 / 벤치마크 프리셋 보기
//! beat windows
//! beat benchmarks
//! ```

use anyhow::Result;
use beat_cli::commands::catalog::{print_benchmarks, print_windows};
use beat_cli::commands::compare::{run_compare, CompareOptions};
use beat_cli::commands::render::OutputFormat;
use beat_core::{init_logging, init_logging_from_env, AppConfig, LogConfig, DEFAULT_CONFIG_PATH};
use clap::{Parser, Subcommand};
use tracing::error;

#[derive(Parser)]
#[command(name = "beat")]
#[command(about = "Beat the index - 종목과 벤치마크의 상대 성과 비교", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목과 벤치마크 비교
    Compare {
        /// 종목 심볼 (예: AAPL, MSFT)
        #[arg(short, long)]
        symbol: String,

        /// 벤치마크 심볼 (기본: 설정의 default_benchmark, 보통 VOO)
        #[arg(short, long)]
        benchmark: Option<String>,

        /// 기간 (5d, 30d, 90d, 6mo, 1y, 5y, 10y, ytd, since)
        #[arg(short, long)]
        window: Option<String>,

        /// since 기간 시작 연도 (지정하면 기간은 since)
        #[arg(long)]
        since: Option<i32>,

        /// 가격 필드 (adjusted, unadjusted)
        #[arg(long)]
        field: Option<String>,

        /// 날짜 경계 기준 시간대 (IANA 이름, 예: America/New_York)
        #[arg(long)]
        tz: Option<String>,

        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 지원 기간 목록 보기
    Windows,

    /// 벤치마크 프리셋 보기
    Benchmarks,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            init_logging_from_env().ok();
            error!("Failed to load configuration from {}: {}", cli.config, e);
            return Err(e.into());
        }
    };

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Compare {
            symbol,
            benchmark,
            window,
            since,
            field,
            tz,
            format,
            output,
        } => {
            let options = CompareOptions {
                symbol,
                benchmark,
                window,
                since,
                field,
                timezone: tz,
                format: OutputFormat::parse(&format)?,
                output,
            };

            if let Err(e) = run_compare(options, &config).await {
                error!("Comparison failed: {}", e);
                return Err(e);
            }
        }

        Commands::Windows => print_windows(),

        Commands::Benchmarks => print_benchmarks(&config.compare.default_benchmark),
    }

    Ok(())
}
