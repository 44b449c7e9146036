//! 数据库连接管理
//!
//! - connect_pool：建立 Postgres 连接池
//! - connect_sqlite_pool：建立 SQLite 连接池（文件或内存）
//!
//! 连接池在启动时建立一次，所有请求共享，退出前显式 close。

use crate::error::StorageError;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// SQLite 内存库路径标记。
pub const SQLITE_MEMORY: &str = ":memory:";

/// 建立 Postgres 连接池
///
/// # 参数
/// - `database_url`：Postgres 连接字符串
/// - `max_connections`：最大连接数
pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// 建立 SQLite 连接池
///
/// 文件库启用 WAL 与 busy_timeout，文件不存在时自动创建。
/// 内存库（`:memory:`）每个连接都是独立数据库，因此固定为单连接且不回收。
pub async fn connect_sqlite_pool(
    path: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    if path == SQLITE_MEMORY {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        return Ok(pool);
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}
