//! 位置内存存储实现
//!
//! 单把写锁覆盖“取消全部 + 设置一个”，与数据库事务等价（单进程内）。

use crate::error::StorageError;
use crate::traits::LocationStore;
use domain::Location;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct Table {
    next_id: i64,
    items: BTreeMap<i64, Location>,
}

/// 位置内存存储
#[derive(Default)]
pub struct InMemoryLocationStore {
    table: RwLock<Table>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn create(&self, location: &Location) -> Result<Location, StorageError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if table.items.values().any(|item| item.name == location.name) {
            return Err(StorageError::new("location name exists"));
        }
        if location.chosen {
            for item in table.items.values_mut() {
                item.chosen = false;
            }
        }
        table.next_id += 1;
        let record = Location {
            id: table.next_id,
            ..location.clone()
        };
        table.items.insert(record.id, record.clone());
        Ok(record)
    }

    async fn read_all(&self) -> Result<Vec<Location>, StorageError> {
        let table = self.table.read().map_err(|_| StorageError::lock_failed())?;
        let mut items: Vec<Location> = table.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn read_chosen(&self) -> Result<Option<Location>, StorageError> {
        let table = self.table.read().map_err(|_| StorageError::lock_failed())?;
        Ok(table.items.values().find(|item| item.chosen).cloned())
    }

    async fn set_chosen(&self, id: i64) -> Result<bool, StorageError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if !table.items.contains_key(&id) {
            return Ok(false);
        }
        for item in table.items.values_mut() {
            item.chosen = item.id == id;
        }
        Ok(true)
    }

    async fn update_threshold(&self, id: i64, threshold: f64) -> Result<bool, StorageError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        match table.items.get_mut(&id) {
            Some(item) => {
                item.threshold = threshold;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(u64::from(table.items.remove(&id).is_some()))
    }
}
