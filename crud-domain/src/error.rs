//! 领域层统一错误定义
//!
//! 聚焦数据代理（查找/键分配/存储）的最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use std::fmt::Display;

use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 数据代理 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("duplicate key: entity={entity}, key={key}")]
    DuplicateKey { entity: String, key: String },
    #[error("key space exhausted: entity={entity}, last={last}")]
    KeyExhausted { entity: String, last: String },
    #[error("repository error: {reason}")]
    Repository { reason: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// 按实体名与键构造 `NotFound`
    pub fn not_found(entity: &str, key: impl Display) -> Self {
        DomainError::NotFound {
            reason: format!("{entity} with key {key} does not exist"),
        }
    }

    pub fn repository(reason: impl Into<String>) -> Self {
        DomainError::Repository {
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}
