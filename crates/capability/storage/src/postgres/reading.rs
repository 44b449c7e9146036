//! Postgres 读数存储实现

use crate::error::StorageError;
use crate::traits::ReadingStore;
use domain::Reading;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const READING_COLUMNS: &str =
    "id, device_id, room_name, sound_level, threshold, measure_time, is_alert, description";

const LATEST_COLUMNS: &str =
    "device_id, room_name, sound_level, threshold, measure_time, is_alert, description";

pub struct PgReadingStore {
    pub pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn reading_from_row(row: &PgRow, with_id: bool) -> Result<Reading, StorageError> {
    Ok(Reading {
        id: if with_id { row.try_get("id")? } else { 0 },
        device_id: row.try_get("device_id")?,
        room_name: row.try_get("room_name")?,
        sound_level: row.try_get("sound_level")?,
        threshold: row.try_get("threshold")?,
        measure_time: row.try_get("measure_time")?,
        is_alert: row.try_get("is_alert")?,
        description: row.try_get("description")?,
        is_periodic: false,
    })
}

fn readings_from_rows(rows: Vec<PgRow>) -> Result<Vec<Reading>, StorageError> {
    rows.iter().map(|row| reading_from_row(row, true)).collect()
}

#[async_trait::async_trait]
impl ReadingStore for PgReadingStore {
    async fn create_historical(&self, reading: &Reading) -> Result<i64, StorageError> {
        let row = sqlx::query(
            "insert into data \
             (device_id, room_name, sound_level, threshold, measure_time, is_alert, description) \
             values ($1, $2, $3, $4, $5, $6, $7) returning id",
        )
        .bind(&reading.device_id)
        .bind(&reading.room_name)
        .bind(reading.sound_level)
        .bind(reading.threshold)
        .bind(&reading.measure_time)
        .bind(reading.is_alert)
        .bind(&reading.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("id")?)
    }

    async fn upsert_latest(&self, reading: &Reading) -> Result<(), StorageError> {
        sqlx::query(
            "insert into latest_data \
             (device_id, room_name, sound_level, threshold, measure_time, is_alert, description) \
             values ($1, $2, $3, $4, $5, $6, $7) \
             on conflict (device_id) do update set \
             room_name = excluded.room_name, \
             sound_level = excluded.sound_level, \
             threshold = excluded.threshold, \
             measure_time = excluded.measure_time, \
             is_alert = excluded.is_alert, \
             description = excluded.description",
        )
        .bind(&reading.device_id)
        .bind(&reading.room_name)
        .bind(reading.sound_level)
        .bind(reading.threshold)
        .bind(&reading.measure_time)
        .bind(reading.is_alert)
        .bind(&reading.description)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn read_one(&self, id: i64) -> Result<Option<Reading>, StorageError> {
        let sql = format!("select {READING_COLUMNS} from data where id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(reading_from_row(&row, true)?))
    }

    async fn read_latest(&self, device_id: &str) -> Result<Option<Reading>, StorageError> {
        let sql = format!("select {LATEST_COLUMNS} from latest_data where device_id = $1");
        let row = sqlx::query(&sql)
            .bind(device_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(reading_from_row(&row, false)?))
    }

    async fn read_page(&self, limit: i64, offset: i64) -> Result<Vec<Reading>, StorageError> {
        let sql = format!("select {READING_COLUMNS} from data order by id limit $1 offset $2");
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        readings_from_rows(rows)
    }

    async fn read_all(&self) -> Result<Vec<Reading>, StorageError> {
        let sql = format!("select {READING_COLUMNS} from data order by id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        readings_from_rows(rows)
    }

    async fn update(&self, reading: &Reading) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "update data set device_id = $1, room_name = $2, sound_level = $3, threshold = $4, \
             measure_time = $5, is_alert = $6, description = $7 where id = $8",
        )
        .bind(&reading.device_id)
        .bind(&reading.room_name)
        .bind(reading.sound_level)
        .bind(reading.threshold)
        .bind(&reading.measure_time)
        .bind(reading.is_alert)
        .bind(&reading.description)
        .bind(reading.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let result = sqlx::query("delete from data where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn read_by_room_since(
        &self,
        room_name: &str,
        since: &str,
    ) -> Result<Vec<Reading>, StorageError> {
        let sql = format!(
            "select {READING_COLUMNS} from data \
             where room_name = $1 and measure_time >= $2 order by measure_time asc"
        );
        let rows = sqlx::query(&sql)
            .bind(room_name)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;
        readings_from_rows(rows)
    }

    async fn read_by_room_between(
        &self,
        room_name: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<Reading>, StorageError> {
        let sql = format!(
            "select {READING_COLUMNS} from data \
             where room_name = $1 and measure_time >= $2 and measure_time < $3 \
             order by measure_time asc"
        );
        let rows = sqlx::query(&sql)
            .bind(room_name)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        readings_from_rows(rows)
    }

    async fn delete_before(&self, cutoff: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("delete from data where measure_time < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
