//! 校验结果（Validation Result）
//!
//! 一条校验失败信息：消息 + 涉及的字段名列表。
//! `Validator` 以声明式方式收集字段级校验结果，供实体实现
//! [`Entity::validation_errors`](crate::entity::Entity::validation_errors)。
//!
use std::fmt;

use serde::{Deserialize, Serialize};

/// 单条校验结果
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationResult {
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    member_names: Vec<String>,
}

impl ValidationResult {
    /// 不关联具体字段的校验结果
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            member_names: Vec::new(),
        }
    }

    pub fn with_members<I, S>(message: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            member_names: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field: String = field.into();
        Self::with_members(message, [field])
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.member_names.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} ({})", self.message, self.member_names.join(", "))
        }
    }
}

/// 字段级校验收集器
///
/// # 示例
///
/// ```
/// use crud_domain::validation::Validator;
///
/// let errors = Validator::new()
///     .required("name", "")
///     .max_length("code", "ABCDEFG", 4)
///     .range("priority", 7, 1, 5)
///     .finish();
/// assert_eq!(errors.len(), 3);
/// assert_eq!(errors[0].member_names(), ["name".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    results: Vec<ValidationResult>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 非空（去除首尾空白后）
    pub fn required(self, field: &str, value: &str) -> Self {
        self.check(
            !value.trim().is_empty(),
            field,
            format!("the {field} field is required"),
        )
    }

    /// 最大字符数
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        self.check(
            value.chars().count() <= max,
            field,
            format!("the {field} field must be at most {max} characters"),
        )
    }

    /// 最小字符数
    pub fn min_length(self, field: &str, value: &str, min: usize) -> Self {
        self.check(
            value.chars().count() >= min,
            field,
            format!("the {field} field must be at least {min} characters"),
        )
    }

    /// 闭区间取值范围
    pub fn range<V>(self, field: &str, value: V, min: V, max: V) -> Self
    where
        V: PartialOrd + fmt::Display,
    {
        let ok = value >= min && value <= max;
        self.check(
            ok,
            field,
            format!("the {field} field must be between {min} and {max}"),
        )
    }

    /// 通用断言：`ok` 为 false 时记录一条字段校验结果
    pub fn check(mut self, ok: bool, field: &str, message: impl Into<String>) -> Self {
        if !ok {
            self.results.push(ValidationResult::for_field(field, message));
        }
        self
    }

    pub fn finish(self) -> Vec<ValidationResult> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_members() {
        let plain = ValidationResult::new("bad input");
        assert_eq!(plain.to_string(), "bad input");

        let fielded = ValidationResult::with_members("mismatch", ["start", "end"]);
        assert_eq!(fielded.to_string(), "mismatch (start, end)");
    }

    #[test]
    fn validator_keeps_declaration_order() {
        let errors = Validator::new()
            .min_length("code", "a", 2)
            .required("name", "   ")
            .range("qty", 3, 1, 10)
            .finish();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].member_names(), ["code".to_string()]);
        assert_eq!(errors[1].message(), "the name field is required");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let errors = Validator::new().max_length("name", "日本語", 3).finish();
        assert!(errors.is_empty());
    }
}
