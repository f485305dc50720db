//! 워크스페이스 전반에서 사용되는 공통 타입.

mod price_field;
mod symbol;
mod window;

pub use price_field::*;
pub use symbol::*;
pub use window::*;
