//! 비교 파이프라인의 도메인 모델.

mod comparison;
mod series;

pub use comparison::*;
pub use series::*;
