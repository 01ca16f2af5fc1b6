//! 内存版异步数据代理（AsyncInMemoryDataProxy）
//!
//! 基于 `tokio::sync::RwLock` 的有序序列实现 `AsyncDataProxy`，
//! 与同步版共享同一套行存储逻辑；锁等待会真正挂起当前任务。
//!
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AsyncDataProxy, ProxyCapabilities};
use super::rows::Rows;
use crate::{entity::Entity, error::DomainResult as Result, key::SequentialKey};

pub struct AsyncInMemoryDataProxy<T> {
    rows: RwLock<Rows<T>>,
}

impl<T> Default for AsyncInMemoryDataProxy<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Rows::default()),
        }
    }
}

impl<T: Entity> AsyncInMemoryDataProxy<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以初始数据创建；键重复时返回 `DuplicateKey`
    pub fn with_entities(entities: Vec<T>) -> Result<Self> {
        Ok(Self {
            rows: RwLock::new(Rows::from_entities(entities)?),
        })
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T> ProxyCapabilities for AsyncInMemoryDataProxy<T> {}

#[async_trait]
impl<T> AsyncDataProxy<T> for AsyncInMemoryDataProxy<T>
where
    T: Entity,
    T::Key: SequentialKey,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.rows.read().await.all())
    }

    async fn get_by_id(&self, key: &T::Key) -> Result<T> {
        self.rows.read().await.find(key)
    }

    async fn insert(&self, entity: T) -> Result<T> {
        self.rows.write().await.insert(entity)
    }

    async fn update(&self, entity: T) -> Result<T> {
        self.rows.write().await.update(entity)
    }

    async fn delete(&self, key: &T::Key) -> Result<()> {
        self.rows.write().await.delete(key)
    }
}
