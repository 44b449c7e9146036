//! 存储后端装配
//!
//! 按配置建立连接池、初始化表结构，并把具体实现收敛为 trait 对象。
//! 退出时调用 [`Storage::close`] 释放连接。

use noise_config::StorageBackend;
use noise_storage::{
    InMemoryLocationStore, InMemoryReadingStore, LocationStore, PgLocationStore, PgReadingStore,
    ReadingStore, SqliteLocationStore, SqliteReadingStore, StorageError, connect_pool,
    connect_sqlite_pool, init_postgres_schema, init_sqlite_schema,
};
use sqlx::{PgPool, SqlitePool};
use std::sync::Arc;
use tracing::info;

enum StoragePool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
    Memory,
}

/// 已打开的存储。
pub struct Storage {
    pub readings: Arc<dyn ReadingStore>,
    pub locations: Arc<dyn LocationStore>,
    pool: StoragePool,
}

impl Storage {
    /// 打开配置指定的后端。
    pub async fn open(backend: &StorageBackend, max_connections: u32) -> Result<Self, StorageError> {
        match backend {
            StorageBackend::Sqlite { path } => {
                let pool = connect_sqlite_pool(path, max_connections).await?;
                init_sqlite_schema(&pool).await?;
                info!(target: "noise.api", path = %path, "sqlite_opened");
                Ok(Self {
                    readings: Arc::new(SqliteReadingStore::new(pool.clone())),
                    locations: Arc::new(SqliteLocationStore::new(pool.clone())),
                    pool: StoragePool::Sqlite(pool),
                })
            }
            StorageBackend::Postgres { database_url } => {
                let pool = connect_pool(database_url, max_connections).await?;
                init_postgres_schema(&pool).await?;
                info!(target: "noise.api", "postgres_opened");
                Ok(Self {
                    readings: Arc::new(PgReadingStore::new(pool.clone())),
                    locations: Arc::new(PgLocationStore::new(pool.clone())),
                    pool: StoragePool::Postgres(pool),
                })
            }
            StorageBackend::Memory => Ok(Self::in_memory()),
        }
    }

    /// 内存存储（测试与演示）。
    pub fn in_memory() -> Self {
        Self {
            readings: Arc::new(InMemoryReadingStore::new()),
            locations: Arc::new(InMemoryLocationStore::new()),
            pool: StoragePool::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.pool {
            StoragePool::Sqlite(_) => "sqlite",
            StoragePool::Postgres(_) => "postgres",
            StoragePool::Memory => "memory",
        }
    }

    /// 关闭连接池，等待已借出的连接归还。
    pub async fn close(self) {
        match self.pool {
            StoragePool::Sqlite(pool) => pool.close().await,
            StoragePool::Postgres(pool) => pool.close().await,
            StoragePool::Memory => {}
        }
        info!(target: "noise.api", "storage_closed");
    }
}
