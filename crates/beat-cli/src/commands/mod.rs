//! CLI 명령어 구현 모듈.

pub mod catalog;
pub mod compare;
pub mod render;
