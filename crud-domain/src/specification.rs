//! 规约（Specification）
//!
//! 以可组合的谓词表达业务约束，可直接包装为业务规则
//! （见 [`SpecificationRule`](crate::rule::SpecificationRule)）。
//!
use std::marker::PhantomData;

/// 规约模式的核心 trait
///
/// 用于封装业务规则，使其可复用、可组合和可测试
pub trait Specification<T>: Send + Sync {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        AndSpecification::new(Box::new(self), Box::new(other))
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> OrSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        OrSpecification::new(Box::new(self), Box::new(other))
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> NotSpecification<T>
    where
        Self: Sized + 'static,
    {
        NotSpecification::new(Box::new(self))
    }
}

pub type BoxSpecification<T> = Box<dyn Specification<T>>;

/// 为 Box<dyn Specification<T>> 实现 Specification trait
/// 使得可以直接使用 Box 类型的规约
impl<T> Specification<T> for BoxSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// 以闭包表达的规约
pub struct PredicateSpecification<T, F> {
    predicate: F,
    _marker: PhantomData<fn(&T) -> bool>,
}

impl<T, F> Specification<T> for PredicateSpecification<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.predicate)(candidate)
    }
}

/// 由闭包创建规约
///
/// ```
/// use crud_domain::specification::{Specification, from_fn};
///
/// let short = from_fn(|s: &String| s.len() <= 8);
/// let lower = from_fn(|s: &String| s.chars().all(|c| c.is_lowercase()));
/// let slug = short.and(lower);
/// assert!(slug.is_satisfied_by(&"books".to_string()));
/// assert!(!slug.is_satisfied_by(&"Books".to_string()));
/// ```
pub fn from_fn<T, F>(predicate: F) -> PredicateSpecification<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    PredicateSpecification {
        predicate,
        _marker: PhantomData,
    }
}

/// AND 组合规约
///
/// 当两个规约都满足时，组合规约才满足
pub struct AndSpecification<T> {
    left: BoxSpecification<T>,
    right: BoxSpecification<T>,
}

impl<T> AndSpecification<T> {
    pub fn new(left: BoxSpecification<T>, right: BoxSpecification<T>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}

/// OR 组合规约
///
/// 当任意一个规约满足时，组合规约就满足
pub struct OrSpecification<T> {
    left: BoxSpecification<T>,
    right: BoxSpecification<T>,
}

impl<T> OrSpecification<T> {
    pub fn new(left: BoxSpecification<T>, right: BoxSpecification<T>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for OrSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }
}

/// NOT 规约
///
/// 当内部规约不满足时，NOT 规约才满足
pub struct NotSpecification<T> {
    inner: BoxSpecification<T>,
}

impl<T> NotSpecification<T> {
    pub fn new(inner: BoxSpecification<T>) -> Self {
        Self { inner }
    }
}

impl<T> Specification<T> for NotSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NonEmpty;
    impl Specification<String> for NonEmpty {
        fn is_satisfied_by(&self, candidate: &String) -> bool {
            !candidate.is_empty()
        }
    }

    struct Reserved;
    impl Specification<String> for Reserved {
        fn is_satisfied_by(&self, candidate: &String) -> bool {
            candidate == "admin"
        }
    }

    #[test]
    fn and_or_not_combine() {
        let allowed = NonEmpty.and(Reserved.not());
        assert!(allowed.is_satisfied_by(&"books".to_string()));
        assert!(!allowed.is_satisfied_by(&"admin".to_string()));
        assert!(!allowed.is_satisfied_by(&String::new()));

        let either = Reserved.or(from_fn(|s: &String| s.starts_with('_')));
        assert!(either.is_satisfied_by(&"_hidden".to_string()));
        assert!(!either.is_satisfied_by(&"books".to_string()));
    }

    #[test]
    fn boxed_specification_delegates() {
        let boxed: BoxSpecification<String> = Box::new(NonEmpty);
        assert!(boxed.is_satisfied_by(&"x".to_string()));
    }
}
