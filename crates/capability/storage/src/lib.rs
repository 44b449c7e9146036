//! # Noise Storage 模块
//!
//! 读数与位置的存储抽象层，支持三种后端：
//!
//! - [`sqlite`]：嵌入式文件数据库（默认）
//! - [`postgres`]：外部 PostgreSQL
//! - [`in_memory`]：`RwLock` 内存实现，用于测试和本地演示
//!
//! 三者实现同一组 trait（[`ReadingStore`]、[`LocationStore`]），
//! 启动时按配置选择，行为上除连接方式外没有差异。
//!
//! ## 数据表
//!
//! - `data`：历史读数（自增 id，只追加，支持按 id 更新/删除）
//! - `latest_data`：每设备一行的最新读数（device_id 主键，upsert）
//! - `locations`：监测位置（name 唯一，至多一个 chosen）
//!
//! ## 时间比较
//!
//! `measure_time` 以 RFC3339 文本保存，范围查询直接做字符串比较，
//! 因此调用方传入的边界需与存储值使用相同格式（UTC，`Z` 后缀）。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use noise_storage::{SqliteReadingStore, connect_sqlite_pool, init_sqlite_schema};
//!
//! let pool = connect_sqlite_pool("production.db", 8).await?;
//! init_sqlite_schema(&pool).await?;
//! let readings = SqliteReadingStore::new(pool.clone());
//! let latest = readings.read_latest("arduino_001").await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod postgres;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use schema::*;
pub use traits::*;

pub use in_memory::{InMemoryLocationStore, InMemoryReadingStore};
pub use postgres::{PgLocationStore, PgReadingStore};
pub use sqlite::{SqliteLocationStore, SqliteReadingStore};
