//! 执行上下文（Execution Context）
//!
//! 一次命令执行期间贯穿“前置钩子 → 校验 → 业务规则 → 执行器”的开放键值包：
//! - 每个命令创建一个新的上下文，执行结束即丢弃；
//! - 值以类型擦除（`Any`）方式存放，按类型取回；
//! - 可选携带请求元信息（关联 ID、操作者），用于日志与审计。
//!
//! ```rust
//! use crud_domain::context::ExecutionContext;
//!
//! let mut ctx = ExecutionContext::builder()
//!     .correlation_id("cor-123")
//!     .actor_id("u-1")
//!     .build();
//! ctx.insert("existing_names", vec!["books".to_string()]);
//!
//! assert_eq!(ctx.correlation_id(), Some("cor-123"));
//! assert_eq!(ctx.get::<Vec<String>>("existing_names").map(Vec::len), Some(1));
//! assert!(ctx.get::<u32>("existing_names").is_none());
//! ```
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use bon::Builder;

type BoxAnyValue = Box<dyn Any + Send + Sync>;

#[derive(Builder, Default)]
pub struct ExecutionContext {
    /// 关联ID
    #[builder(into)]
    correlation_id: Option<String>,
    /// 触发命令的主体ID
    #[builder(into)]
    actor_id: Option<String>,
    #[builder(skip)]
    items: HashMap<String, BoxAnyValue>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    /// 写入值；返回是否覆盖了已有条目
    pub fn insert<V>(&mut self, key: impl Into<String>, value: V) -> bool
    where
        V: Any + Send + Sync,
    {
        self.items.insert(key.into(), Box::new(value)).is_some()
    }

    /// 按键与类型读取；类型不匹配时返回 `None`
    pub fn get<V: Any>(&self, key: &str) -> Option<&V> {
        self.items.get(key)?.downcast_ref::<V>()
    }

    pub fn get_mut<V: Any>(&mut self, key: &str) -> Option<&mut V> {
        self.items.get_mut(key)?.downcast_mut::<V>()
    }

    /// 按键与类型取出；类型不匹配时条目保持不变
    pub fn remove<V: Any>(&mut self, key: &str) -> Option<V> {
        if !self.items.get(key)?.is::<V>() {
            return None;
        }
        let boxed = self.items.remove(key)?;
        boxed.downcast::<V>().ok().map(|v| *v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("ExecutionContext")
            .field("correlation_id", &self.correlation_id)
            .field("actor_id", &self.actor_id)
            .field("keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_overwrite() {
        let mut ctx = ExecutionContext::new();
        assert!(!ctx.insert("n", 1_u8));
        assert!(ctx.insert("n", 2_u8));
        assert_eq!(ctx.get::<u8>("n"), Some(&2));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn remove_with_wrong_type_keeps_entry() {
        let mut ctx = ExecutionContext::new();
        ctx.insert("name", String::from("books"));

        assert_eq!(ctx.remove::<i32>("name"), None);
        assert!(ctx.contains_key("name"));

        assert_eq!(ctx.remove::<String>("name").as_deref(), Some("books"));
        assert!(ctx.is_empty());
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut ctx = ExecutionContext::new();
        ctx.insert("seen", Vec::<u32>::new());
        if let Some(seen) = ctx.get_mut::<Vec<u32>>("seen") {
            seen.push(7);
        }
        assert_eq!(ctx.get::<Vec<u32>>("seen"), Some(&vec![7]));
    }

    #[test]
    fn debug_lists_sorted_keys_only() {
        let mut ctx = ExecutionContext::builder().actor_id("u-9").build();
        ctx.insert("b", 1_i32);
        ctx.insert("a", 2_i32);
        let out = format!("{ctx:?}");
        assert!(out.contains(r#"keys: ["a", "b"]"#));
        assert!(out.contains("u-9"));
    }
}
