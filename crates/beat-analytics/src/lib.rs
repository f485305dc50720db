//! # Beat Analytics
//!
//! 종목 대 벤치마크 상대 성과 파이프라인.
//!
//! 선택자 → [`window`] 해석 → 두 시계열 동시 조회 → [`normalizer`] →
//! [`alignment`] → [`performance`] → 평면 구조의 비교 결과.
//!
//! - [`ComparisonService`]: 한 요청을 처음부터 끝까지 실행
//! - [`ComparisonSession`]: 새 요청이 이전 요청을 대체하는 표시 상태

pub mod alignment;
pub mod comparison;
pub mod normalizer;
pub mod performance;
pub mod session;
pub mod window;

pub use alignment::align;
pub use comparison::{CompareSettings, ComparisonRequest, ComparisonService};
pub use normalizer::SeriesNormalizer;
pub use session::{Completion, ComparisonSession, DisplayState, RequestTicket};
pub use window::{resolve, ResolvedWindow, WindowSpec};
