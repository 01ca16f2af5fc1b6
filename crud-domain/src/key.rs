//! 顺序键（Sequential Key）
//!
//! 数据代理在插入时按“当前最大键 + 1”分配新键，空存储从 `first()` 开始。
//!
use std::fmt::Display;

use crate::error::{DomainError, DomainResult};

/// 可按顺序递增分配的键类型
pub trait SequentialKey: Sized {
    /// 空存储中的第一个键
    fn first() -> Self;

    /// 后继键；溢出时返回 `None`
    fn successor(&self) -> Option<Self>;
}

macro_rules! impl_sequential_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl SequentialKey for $t {
                fn first() -> Self {
                    1
                }

                fn successor(&self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

impl_sequential_key!(i32, i64, u32, u64, usize);

/// 计算下一个键
///
/// # 示例
///
/// ```
/// use crud_domain::key::next_key;
///
/// let keys = [3_i64, 9, 4];
/// assert_eq!(next_key("Category", keys.iter()).unwrap(), 10);
///
/// let empty: [i64; 0] = [];
/// assert_eq!(next_key("Category", empty.iter()).unwrap(), 1);
/// ```
pub fn next_key<'a, K>(entity: &str, keys: impl Iterator<Item = &'a K>) -> DomainResult<K>
where
    K: SequentialKey + Ord + Display + 'a,
{
    match keys.max() {
        None => Ok(K::first()),
        Some(last) => last.successor().ok_or_else(|| DomainError::KeyExhausted {
            entity: entity.to_string(),
            last: last.to_string(),
        }),
    }
}
