//! 读数内存存储实现

use crate::error::StorageError;
use crate::traits::ReadingStore;
use domain::Reading;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

#[derive(Default)]
struct Tables {
    next_id: i64,
    history: BTreeMap<i64, Reading>,
    latest: HashMap<String, Reading>,
}

/// 读数内存存储
///
/// 历史表用 BTreeMap 保证按 id 升序遍历。
#[derive(Default)]
pub struct InMemoryReadingStore {
    tables: RwLock<Tables>,
}

impl InMemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter_history<F>(&self, predicate: F) -> Result<Vec<Reading>, StorageError>
    where
        F: Fn(&Reading) -> bool,
    {
        let tables = self.tables.read().map_err(|_| StorageError::lock_failed())?;
        Ok(tables
            .history
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect())
    }
}

fn stored(reading: &Reading) -> Reading {
    Reading {
        is_periodic: false,
        ..reading.clone()
    }
}

#[async_trait::async_trait]
impl ReadingStore for InMemoryReadingStore {
    async fn create_historical(&self, reading: &Reading) -> Result<i64, StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        tables.next_id += 1;
        let id = tables.next_id;
        let mut record = stored(reading);
        record.id = id;
        tables.history.insert(id, record);
        Ok(id)
    }

    async fn upsert_latest(&self, reading: &Reading) -> Result<(), StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let mut record = stored(reading);
        record.id = 0;
        tables.latest.insert(record.device_id.clone(), record);
        Ok(())
    }

    async fn read_one(&self, id: i64) -> Result<Option<Reading>, StorageError> {
        let tables = self.tables.read().map_err(|_| StorageError::lock_failed())?;
        Ok(tables.history.get(&id).cloned())
    }

    async fn read_latest(&self, device_id: &str) -> Result<Option<Reading>, StorageError> {
        let tables = self.tables.read().map_err(|_| StorageError::lock_failed())?;
        Ok(tables.latest.get(device_id).cloned())
    }

    async fn read_page(&self, limit: i64, offset: i64) -> Result<Vec<Reading>, StorageError> {
        let tables = self.tables.read().map_err(|_| StorageError::lock_failed())?;
        let limit = usize::try_from(limit).unwrap_or(0);
        let offset = usize::try_from(offset).unwrap_or(0);
        Ok(tables
            .history
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn read_all(&self) -> Result<Vec<Reading>, StorageError> {
        self.filter_history(|_| true)
    }

    async fn update(&self, reading: &Reading) -> Result<u64, StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let Some(existing) = tables.history.get_mut(&reading.id) else {
            return Ok(0);
        };
        *existing = stored(reading);
        Ok(1)
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(u64::from(tables.history.remove(&id).is_some()))
    }

    async fn read_by_room_since(
        &self,
        room_name: &str,
        since: &str,
    ) -> Result<Vec<Reading>, StorageError> {
        let mut items = self.filter_history(|item| {
            item.room_name == room_name && item.measure_time.as_str() >= since
        })?;
        items.sort_by(|a, b| a.measure_time.cmp(&b.measure_time));
        Ok(items)
    }

    async fn read_by_room_between(
        &self,
        room_name: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<Reading>, StorageError> {
        let mut items = self.filter_history(|item| {
            item.room_name == room_name
                && item.measure_time.as_str() >= start
                && item.measure_time.as_str() < end
        })?;
        items.sort_by(|a, b| a.measure_time.cmp(&b.measure_time));
        Ok(items)
    }

    async fn delete_before(&self, cutoff: &str) -> Result<u64, StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let before = tables.history.len();
        tables
            .history
            .retain(|_, item| item.measure_time.as_str() >= cutoff);
        Ok((before - tables.history.len()) as u64)
    }
}
