//! SQLite 位置存储实现

use crate::error::StorageError;
use crate::traits::LocationStore;
use domain::Location;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct SqliteLocationStore {
    pub pool: SqlitePool,
}

impl SqliteLocationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn location_from_row(row: &SqliteRow) -> Result<Location, StorageError> {
    Ok(Location {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        chosen: row.try_get("chosen")?,
        threshold: row.try_get("threshold")?,
    })
}

#[async_trait::async_trait]
impl LocationStore for SqliteLocationStore {
    async fn create(&self, location: &Location) -> Result<Location, StorageError> {
        let mut tx = self.pool.begin().await?;
        if location.chosen {
            sqlx::query("update locations set chosen = 0 where chosen = 1")
                .execute(&mut *tx)
                .await?;
        }
        let row = sqlx::query(
            "insert into locations (name, chosen, threshold) values (?, ?, ?) returning id",
        )
        .bind(&location.name)
        .bind(location.chosen)
        .bind(location.threshold)
        .fetch_one(&mut *tx)
        .await?;
        let id: i64 = row.try_get("id")?;
        tx.commit().await?;
        Ok(Location {
            id,
            ..location.clone()
        })
    }

    async fn read_all(&self) -> Result<Vec<Location>, StorageError> {
        let rows = sqlx::query("select id, name, chosen, threshold from locations order by name")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(location_from_row).collect()
    }

    async fn read_chosen(&self) -> Result<Option<Location>, StorageError> {
        let row = sqlx::query(
            "select id, name, chosen, threshold from locations where chosen = 1 limit 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(location_from_row(&row)?))
    }

    async fn set_chosen(&self, id: i64) -> Result<bool, StorageError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("update locations set chosen = 0 where chosen = 1")
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("update locations set chosen = 1 where id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn update_threshold(&self, id: i64, threshold: f64) -> Result<bool, StorageError> {
        let result = sqlx::query("update locations set threshold = ? where id = ?")
            .bind(threshold)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let result = sqlx::query("delete from locations where id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
