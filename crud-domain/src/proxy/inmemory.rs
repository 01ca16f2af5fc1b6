//! 内存版同步数据代理（InMemoryDataProxy）
//!
//! 以 `std::sync::RwLock` 保护的有序序列实现 `DataProxy`：
//! 读操作共享锁、写操作独占锁，插入时的键分配与追加在同一临界区内完成。
//! 典型用途：测试环境、示例与本地开发。
//!
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{DataProxy, ProxyCapabilities};
use super::rows::Rows;
use crate::{
    entity::{Entity, entity_label},
    error::{DomainError, DomainResult as Result},
    key::SequentialKey,
};

pub struct InMemoryDataProxy<T> {
    rows: RwLock<Rows<T>>,
}

impl<T> Default for InMemoryDataProxy<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Rows::default()),
        }
    }
}

impl<T: Entity> InMemoryDataProxy<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以初始数据创建；键重复时返回 `DuplicateKey`
    pub fn with_entities(entities: Vec<T>) -> Result<Self> {
        Ok(Self {
            rows: RwLock::new(Rows::from_entities(entities)?),
        })
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Rows<T>>> {
        self.rows.read().map_err(|_| poisoned::<T>())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows<T>>> {
        self.rows.write().map_err(|_| poisoned::<T>())
    }
}

impl<T> ProxyCapabilities for InMemoryDataProxy<T> {}

fn poisoned<T>() -> DomainError {
    DomainError::repository(format!("{} store lock poisoned", entity_label::<T>()))
}

impl<T> DataProxy<T> for InMemoryDataProxy<T>
where
    T: Entity,
    T::Key: SequentialKey,
{
    fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.read()?.all())
    }

    fn get_by_id(&self, key: &T::Key) -> Result<T> {
        self.read()?.find(key)
    }

    fn insert(&self, entity: T) -> Result<T> {
        self.write()?.insert(entity)
    }

    fn update(&self, entity: T) -> Result<T> {
        self.write()?.update(entity)
    }

    fn delete(&self, key: &T::Key) -> Result<()> {
        self.write()?.delete(key)
    }
}
