//! 表结构初始化
//!
//! 启动时以 `create ... if not exists` 建表，不做版本迁移。
//!
//! - `data`：历史读数，自增 id，只追加
//! - `latest_data`：每设备一行的最新读数，device_id 为主键
//! - `locations`：监测位置，name 唯一，部分唯一索引保证至多一个 chosen

use crate::error::StorageError;
use sqlx::{PgPool, SqlitePool};
use tracing::info;

const POSTGRES_SCHEMA: &[&str] = &[
    "create table if not exists data ( \
         id bigint generated by default as identity primary key, \
         device_id varchar(50) not null, \
         room_name text not null, \
         sound_level double precision not null, \
         threshold double precision not null, \
         measure_time text not null, \
         is_alert boolean not null default false, \
         description text not null default '')",
    "create index if not exists idx_data_room_time on data (room_name, measure_time)",
    "create table if not exists latest_data ( \
         device_id varchar(50) primary key, \
         room_name text not null, \
         sound_level double precision not null, \
         threshold double precision not null, \
         measure_time text not null, \
         is_alert boolean not null default false, \
         description text not null default '')",
    "create table if not exists locations ( \
         id bigint generated by default as identity primary key, \
         name text not null unique, \
         chosen boolean not null default false, \
         threshold double precision not null default 70)",
    "create unique index if not exists only_one_chosen_location \
         on locations (chosen) where chosen = true",
];

const SQLITE_SCHEMA: &[&str] = &[
    "create table if not exists data ( \
         id integer primary key autoincrement, \
         device_id text not null, \
         room_name text not null, \
         sound_level real not null, \
         threshold real not null, \
         measure_time text not null, \
         is_alert boolean not null default 0, \
         description text not null default '')",
    "create index if not exists idx_data_room_time on data (room_name, measure_time)",
    "create table if not exists latest_data ( \
         device_id text primary key, \
         room_name text not null, \
         sound_level real not null, \
         threshold real not null, \
         measure_time text not null, \
         is_alert boolean not null default 0, \
         description text not null default '')",
    "create table if not exists locations ( \
         id integer primary key autoincrement, \
         name text not null unique, \
         chosen boolean not null default 0, \
         threshold real not null default 70)",
    "create unique index if not exists only_one_chosen_location \
         on locations (chosen) where chosen = 1",
];

/// 初始化 Postgres 表结构
pub async fn init_postgres_schema(pool: &PgPool) -> Result<(), StorageError> {
    for statement in POSTGRES_SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!(target: "noise.storage", backend = "postgres", "schema_ready");
    Ok(())
}

/// 初始化 SQLite 表结构
pub async fn init_sqlite_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    for statement in SQLITE_SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!(target: "noise.storage", backend = "sqlite", "schema_ready");
    Ok(())
}
