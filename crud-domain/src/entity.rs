//! 实体（Entity）基础抽象
//!
//! 为数据代理管理的对象提供统一的唯一键与自校验能力。
//!
use std::{
    any::type_name,
    fmt::{Debug, Display},
    hash::Hash,
};

use crate::validation::ValidationResult;

/// 具备唯一键的实体抽象
pub trait Entity: Clone + Send + Sync + 'static {
    /// 实体键类型，要求可比较（用于顺序分配）、可显示与可克隆
    type Key: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;

    /// 获取实体键
    fn key(&self) -> &Self::Key;

    /// 设置实体键（由数据代理在插入时分配）
    fn set_key(&mut self, key: Self::Key);

    /// 实体自身的字段级校验，默认无错误
    fn validation_errors(&self) -> Vec<ValidationResult> {
        Vec::new()
    }
}

/// 实体类型的简短名称（去掉模块路径），用于日志字段与错误信息
pub fn entity_label<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use crud_macros::entity;

    #[entity(key = i64, validate = Self::check)]
    #[derive(PartialEq)]
    struct Tag {
        label: String,
    }

    impl Tag {
        fn check(&self) -> Vec<ValidationResult> {
            Validator::new().required("label", &self.label).finish()
        }
    }

    #[entity(key = u32)]
    struct Plain {
        note: String,
    }

    #[test]
    fn macro_generates_key_accessors() {
        let mut tag = Tag {
            id: 3,
            label: "rust".into(),
        };
        assert_eq!(*tag.key(), 3);
        tag.set_key(7);
        assert_eq!(tag.id, 7);
        assert!(tag.validation_errors().is_empty());
    }

    #[test]
    fn macro_wires_validate_function() {
        let tag = Tag::default();
        let errors = tag.validation_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].member_names(), ["label".to_string()]);
    }

    #[test]
    fn default_validation_is_empty() {
        let plain = Plain {
            id: 1,
            note: String::new(),
        };
        assert!(plain.validation_errors().is_empty());
        assert!(plain.note.is_empty());
    }

    #[test]
    fn entity_label_strips_module_path() {
        assert_eq!(entity_label::<Tag>(), "Tag");
        assert_eq!(entity_label::<Vec<Tag>>(), "Vec");
    }
}
