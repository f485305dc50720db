//! # Beat Core
//!
//! 종목과 벤치마크의 상대 성과 비교에 필요한 핵심 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 원시/정규화/정렬된 가격 시계열
//! - 기간 선택자, 가격 필드, 조회 범위 정의
//! - 비교 결과(프레젠테이션용 평면 구조체)
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use self::config::*;
pub use self::domain::*;
pub use self::error::*;
pub use self::logging::*;
pub use self::types::*;
