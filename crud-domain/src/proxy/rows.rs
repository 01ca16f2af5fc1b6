//! 内存代理共享的有序行存储
//!
//! 仅负责数据操作本身，不含同步原语；由外层代理持锁调用。
//!
use std::collections::HashSet;

use tracing::debug;

use crate::{
    entity::{Entity, entity_label},
    error::{DomainError, DomainResult as Result},
    key::{SequentialKey, next_key},
};

pub(crate) struct Rows<T> {
    items: Vec<T>,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Rows<T> {
    /// 以初始实体构建；键重复时报错
    pub(crate) fn from_entities(items: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.key()) {
                return Err(DomainError::DuplicateKey {
                    entity: entity_label::<T>().to_string(),
                    key: item.key().to_string(),
                });
            }
        }
        Ok(Self { items })
    }

    pub(crate) fn all(&self) -> Vec<T> {
        self.items.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn find(&self, key: &T::Key) -> Result<T> {
        self.items
            .iter()
            .find(|item| item.key() == key)
            .cloned()
            .ok_or_else(|| DomainError::not_found(entity_label::<T>(), key))
    }

    /// 以传入实体替换同键实体，位置不变
    pub(crate) fn update(&mut self, entity: T) -> Result<T> {
        let Some(slot) = self.items.iter_mut().find(|item| item.key() == entity.key()) else {
            return Err(DomainError::not_found(entity_label::<T>(), entity.key()));
        };
        *slot = entity.clone();
        debug!(entity = entity_label::<T>(), key = %entity.key(), "entity updated");
        Ok(entity)
    }

    pub(crate) fn delete(&mut self, key: &T::Key) -> Result<()> {
        let Some(index) = self.items.iter().position(|item| item.key() == key) else {
            return Err(DomainError::not_found(entity_label::<T>(), key));
        };
        self.items.remove(index);
        debug!(entity = entity_label::<T>(), key = %key, "entity deleted");
        Ok(())
    }
}

impl<T> Rows<T>
where
    T: Entity,
    T::Key: SequentialKey,
{
    /// 分配“最大键 + 1”并追加到末尾
    pub(crate) fn insert(&mut self, mut entity: T) -> Result<T> {
        let key = next_key(entity_label::<T>(), self.items.iter().map(|item| item.key()))?;
        entity.set_key(key);
        self.items.push(entity.clone());
        debug!(entity = entity_label::<T>(), key = %entity.key(), "entity inserted");
        Ok(entity)
    }
}
