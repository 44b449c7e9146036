//! 内存存储实现模块
//!
//! 仅用于测试和本地演示，进程退出即丢失。
//!
//! - ReadingStore: InMemoryReadingStore
//! - LocationStore: InMemoryLocationStore

pub mod location;
pub mod reading;

pub use location::*;
pub use reading::*;
