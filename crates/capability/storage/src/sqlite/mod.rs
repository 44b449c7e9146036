//! # SQLite 存储实现
//!
//! 默认后端。SQL 使用 `?` 占位符，其余语义与 [`crate::postgres`] 一致。

pub mod location;
pub mod reading;

pub use location::*;
pub use reading::*;
