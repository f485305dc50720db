//! `beat` CLI.
//!
//! 비교 파이프라인의 터미널 출력 계층입니다:
//! - 종목 대 벤치마크 비교 실행
//! - 표/CSV/JSON 출력
//! - 지원 기간과 벤치마크 프리셋 안내

pub mod commands;
