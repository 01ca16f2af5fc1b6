//! 业务规则（Rule）
//!
//! 一条业务约束：在执行上下文中求值，得到通过/失败及失败消息。
//! - `Rule`：规则协议，`validate` 返回 [`RuleOutcome`]；
//! - `FnRule` / [`rule_fn`] / [`ensure`]：以闭包表达规则；
//! - `SpecificationRule`：以 [`Specification`] 检查候选对象；
//! - [`Rule::then_validate`]：前一条规则通过后才求值下一条。
//!
use std::any::type_name;
use std::borrow::Cow;

use crate::context::ExecutionContext;
use crate::specification::Specification;

/// 规则求值结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Valid,
    Invalid { message: String },
}

impl RuleOutcome {
    pub fn invalid(message: impl Into<String>) -> Self {
        RuleOutcome::Invalid {
            message: message.into(),
        }
    }

    /// `ok` 为 true 时通过，否则以 `message` 失败
    pub fn check(ok: bool, message: impl Into<String>) -> Self {
        if ok {
            RuleOutcome::Valid
        } else {
            Self::invalid(message)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RuleOutcome::Valid)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RuleOutcome::Valid => None,
            RuleOutcome::Invalid { message } => Some(message),
        }
    }
}

/// 业务规则协议
pub trait Rule: Send + Sync {
    /// 规则名称，用于日志与追踪
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    /// 在给定上下文中求值
    fn validate(&self, ctx: &ExecutionContext) -> RuleOutcome;

    /// 仅当当前规则通过时才求值 `next`
    fn then_validate<N>(self, next: N) -> Chain<Self, N>
    where
        Self: Sized,
        N: Rule,
    {
        Chain { first: self, next }
    }
}

pub type BoxRule = Box<dyn Rule>;

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn validate(&self, ctx: &ExecutionContext) -> RuleOutcome {
        (**self).validate(ctx)
    }
}

/// 规则串联：前一条失败时短路
pub struct Chain<A, B> {
    first: A,
    next: B,
}

impl<A: Rule, B: Rule> Rule for Chain<A, B> {
    fn name(&self) -> &str {
        self.first.name()
    }

    fn validate(&self, ctx: &ExecutionContext) -> RuleOutcome {
        match self.first.validate(ctx) {
            RuleOutcome::Valid => self.next.validate(ctx),
            invalid => invalid,
        }
    }
}

/// 以闭包表达的规则
pub struct FnRule<F> {
    name: Cow<'static, str>,
    check: F,
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&ExecutionContext) -> RuleOutcome + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, ctx: &ExecutionContext) -> RuleOutcome {
        (self.check)(ctx)
    }
}

pub fn rule_fn<F>(name: impl Into<Cow<'static, str>>, check: F) -> FnRule<F>
where
    F: Fn(&ExecutionContext) -> RuleOutcome + Send + Sync,
{
    FnRule {
        name: name.into(),
        check,
    }
}

/// 谓词为 false 时以固定消息失败的规则
///
/// ```
/// use crud_domain::context::ExecutionContext;
/// use crud_domain::rule::{Rule, ensure};
///
/// let rule = ensure("positive", "amount must be positive", |ctx| {
///     ctx.get::<i64>("amount").is_some_and(|n| *n > 0)
/// });
///
/// let mut ctx = ExecutionContext::new();
/// ctx.insert("amount", -3_i64);
/// assert_eq!(rule.validate(&ctx).error_message(), Some("amount must be positive"));
/// ```
pub fn ensure<P>(
    name: impl Into<Cow<'static, str>>,
    message: impl Into<String>,
    predicate: P,
) -> FnRule<impl Fn(&ExecutionContext) -> RuleOutcome + Send + Sync>
where
    P: Fn(&ExecutionContext) -> bool + Send + Sync,
{
    let message = message.into();
    rule_fn(name, move |ctx: &ExecutionContext| {
        RuleOutcome::check(predicate(ctx), message.clone())
    })
}

/// 用规约检查候选对象的规则
pub struct SpecificationRule<T, S> {
    name: Cow<'static, str>,
    candidate: T,
    spec: S,
    message: String,
}

impl<T, S> SpecificationRule<T, S>
where
    T: Send + Sync,
    S: Specification<T>,
{
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        candidate: T,
        spec: S,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            candidate,
            spec,
            message: message.into(),
        }
    }
}

impl<T, S> Rule for SpecificationRule<T, S>
where
    T: Send + Sync,
    S: Specification<T>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, _ctx: &ExecutionContext) -> RuleOutcome {
        RuleOutcome::check(
            self.spec.is_satisfied_by(&self.candidate),
            self.message.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::from_fn;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct AlwaysValid;
    impl Rule for AlwaysValid {
        fn validate(&self, _ctx: &ExecutionContext) -> RuleOutcome {
            RuleOutcome::Valid
        }
    }

    struct AlwaysInvalid;
    impl Rule for AlwaysInvalid {
        fn validate(&self, _ctx: &ExecutionContext) -> RuleOutcome {
            RuleOutcome::invalid("nope")
        }
    }

    #[test]
    fn default_name_is_type_name() {
        assert!(AlwaysValid.name().ends_with("AlwaysValid"));
        let boxed: BoxRule = Box::new(rule_fn("named", |_| RuleOutcome::Valid));
        assert_eq!(boxed.name(), "named");
    }

    #[test]
    fn chain_short_circuits_on_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let counted = rule_fn("counted", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            RuleOutcome::Valid
        });

        let ctx = ExecutionContext::new();
        let chained = AlwaysInvalid.then_validate(counted);
        assert_eq!(chained.validate(&ctx).error_message(), Some("nope"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let passing = AlwaysValid.then_validate(AlwaysInvalid);
        assert!(!passing.validate(&ctx).is_valid());
    }

    #[test]
    fn ensure_reads_from_context() {
        let rule = ensure("flag", "flag must be set", |ctx| ctx.contains_key("flag"));
        let mut ctx = ExecutionContext::new();
        assert!(!rule.validate(&ctx).is_valid());
        ctx.insert("flag", ());
        assert!(rule.validate(&ctx).is_valid());
    }

    #[test]
    fn specification_rule_reports_message() {
        let rule = SpecificationRule::new(
            "name_is_short",
            "a very long category name".to_string(),
            from_fn(|s: &String| s.len() <= 10),
            "name is too long",
        );
        let outcome = rule.validate(&ExecutionContext::new());
        assert_eq!(outcome, RuleOutcome::invalid("name is too long"));
    }
}
