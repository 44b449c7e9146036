//! # PostgreSQL 存储实现
//!
//! 所有 SQL 使用 `$n` 参数绑定；chosen 切换在单个事务内完成，
//! 配合 `only_one_chosen_location` 部分唯一索引，并发切换不会出现两个选中行。

pub mod location;
pub mod reading;

pub use location::*;
pub use reading::*;
