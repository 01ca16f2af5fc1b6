//! 数据代理（Data Proxy）
//!
//! 定义面向单一实体类型的 CRUD 能力抽象及其内存实现：
//! - 同步代理（`DataProxy`）与异步代理（`AsyncDataProxy`），共享能力标记
//!   [`ProxyCapabilities`]，供调用方分支决策；
//! - 查找、更新、删除不存在的键统一返回 `DomainError::NotFound`；
//! - 内存实现（`InMemoryDataProxy`、`AsyncInMemoryDataProxy`）以有序序列存放实体，
//!   所有操作经同一把锁串行化，插入按“最大键 + 1”分配新键。
//!
//! 该模块聚焦协议，具体存储后端（如数据库、远程服务）由上层实现并注入。
//!
mod inmemory;
#[cfg(feature = "async")]
mod inmemory_async;
mod rows;

pub use inmemory::InMemoryDataProxy;
#[cfg(feature = "async")]
pub use inmemory_async::AsyncInMemoryDataProxy;

use crate::{entity::Entity, error::DomainResult as Result};
use async_trait::async_trait;
use std::sync::Arc;

/// 代理能力标记，默认均为 false
pub trait ProxyCapabilities {
    /// 是否支持事务
    fn supports_transactions(&self) -> bool {
        false
    }

    /// 调用是否可能有明显延迟（如跨网络）
    fn is_latency_prone(&self) -> bool {
        false
    }
}

impl<P: ProxyCapabilities + ?Sized> ProxyCapabilities for Arc<P> {
    fn supports_transactions(&self) -> bool {
        (**self).supports_transactions()
    }

    fn is_latency_prone(&self) -> bool {
        (**self).is_latency_prone()
    }
}

/// 同步数据代理
pub trait DataProxy<T: Entity>: ProxyCapabilities + Send + Sync {
    fn get_all(&self) -> Result<Vec<T>>;

    /// 按键查找；不存在时返回 `NotFound`
    fn get_by_id(&self, key: &T::Key) -> Result<T>;

    /// 插入并返回带有已分配键的实体
    fn insert(&self, entity: T) -> Result<T>;

    /// 以传入实体替换同键实体
    fn update(&self, entity: T) -> Result<T>;

    fn delete(&self, key: &T::Key) -> Result<()>;
}

impl<T, P> DataProxy<T> for Arc<P>
where
    T: Entity,
    P: DataProxy<T> + ?Sized,
{
    fn get_all(&self) -> Result<Vec<T>> {
        (**self).get_all()
    }

    fn get_by_id(&self, key: &T::Key) -> Result<T> {
        (**self).get_by_id(key)
    }

    fn insert(&self, entity: T) -> Result<T> {
        (**self).insert(entity)
    }

    fn update(&self, entity: T) -> Result<T> {
        (**self).update(entity)
    }

    fn delete(&self, key: &T::Key) -> Result<()> {
        (**self).delete(key)
    }
}

/// 异步数据代理
#[async_trait]
pub trait AsyncDataProxy<T: Entity>: ProxyCapabilities + Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>>;

    async fn get_by_id(&self, key: &T::Key) -> Result<T>;

    async fn insert(&self, entity: T) -> Result<T>;

    async fn update(&self, entity: T) -> Result<T>;

    async fn delete(&self, key: &T::Key) -> Result<()>;
}

#[async_trait]
impl<T, P> AsyncDataProxy<T> for Arc<P>
where
    T: Entity,
    P: AsyncDataProxy<T> + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, key: &T::Key) -> Result<T> {
        (**self).get_by_id(key).await
    }

    async fn insert(&self, entity: T) -> Result<T> {
        (**self).insert(entity).await
    }

    async fn update(&self, entity: T) -> Result<T> {
        (**self).update(entity).await
    }

    async fn delete(&self, key: &T::Key) -> Result<()> {
        (**self).delete(key).await
    }
}
