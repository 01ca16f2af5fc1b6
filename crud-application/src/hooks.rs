//! 操作钩子（Operation Hooks）
//!
//! 以函数值配置单个操作的前置钩子、校验来源与业务规则来源，
//! 在构造服务时显式注入，取代基于子类覆写的扩展方式。
//! 默认不含任何检查。
//!
use std::sync::Arc;

use crud_domain::{
    context::ExecutionContext,
    entity::Entity,
    rule::{BoxRule, Rule, RuleOutcome},
    validation::ValidationResult,
};

pub type BeforeFn<I> = Arc<dyn Fn(&I, &mut ExecutionContext) + Send + Sync>;

pub type ValidationFn<I> =
    Arc<dyn Fn(&I, &mut ExecutionContext) -> Vec<ValidationResult> + Send + Sync>;

pub type RulesFn<I> = Arc<dyn Fn(&I, &mut ExecutionContext) -> Vec<BoxRule> + Send + Sync>;

/// 单个操作的钩子集合，按注册顺序执行
pub struct OperationHooks<I> {
    before: Vec<BeforeFn<I>>,
    validations: Vec<ValidationFn<I>>,
    rules: Vec<RulesFn<I>>,
}

impl<I> Default for OperationHooks<I> {
    fn default() -> Self {
        Self {
            before: Vec::new(),
            validations: Vec::new(),
            rules: Vec::new(),
        }
    }
}

impl<I> Clone for OperationHooks<I> {
    fn clone(&self) -> Self {
        Self {
            before: self.before.clone(),
            validations: self.validations.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<I: 'static> OperationHooks<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加前置钩子（在校验之前执行，可向上下文写入数据）
    pub fn before<F>(mut self, f: F) -> Self
    where
        F: Fn(&I, &mut ExecutionContext) + Send + Sync + 'static,
    {
        self.before.push(Arc::new(f));
        self
    }

    /// 追加校验结果来源
    pub fn validate_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&I, &mut ExecutionContext) -> Vec<ValidationResult> + Send + Sync + 'static,
    {
        self.validations.push(Arc::new(f));
        self
    }

    /// 追加业务规则来源（规则通常捕获输入的一部分）
    pub fn rules_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&I, &mut ExecutionContext) -> Vec<BoxRule> + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(f));
        self
    }

    /// 追加一条与输入无关的固定规则
    pub fn rule<R>(self, rule: R) -> Self
    where
        R: Rule + 'static,
    {
        let rule = Arc::new(rule);
        self.rules_with(move |_, _| vec![Box::new(SharedRule(rule.clone())) as BoxRule])
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.validations.is_empty() && self.rules.is_empty()
    }

    pub(crate) fn run_before(&self, input: &I, ctx: &mut ExecutionContext) {
        for hook in &self.before {
            hook(input, ctx);
        }
    }

    pub(crate) fn collect_validations(
        &self,
        input: &I,
        ctx: &mut ExecutionContext,
    ) -> Vec<ValidationResult> {
        self.validations
            .iter()
            .flat_map(|source| source(input, ctx))
            .collect()
    }

    pub(crate) fn collect_rules(&self, input: &I, ctx: &mut ExecutionContext) -> Vec<BoxRule> {
        self.rules.iter().flat_map(|source| source(input, ctx)).collect()
    }
}

struct SharedRule<R>(Arc<R>);

impl<R: Rule> Rule for SharedRule<R> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn validate(&self, ctx: &ExecutionContext) -> RuleOutcome {
        self.0.validate(ctx)
    }
}

/// CRUD 各操作的钩子
pub struct ServiceHooks<T: Entity> {
    pub get_by_id: OperationHooks<T::Key>,
    pub get_all: OperationHooks<()>,
    pub insert: OperationHooks<T>,
    pub update: OperationHooks<T>,
    pub delete: OperationHooks<T::Key>,
}

impl<T: Entity> Default for ServiceHooks<T> {
    fn default() -> Self {
        Self {
            get_by_id: OperationHooks::default(),
            get_all: OperationHooks::default(),
            insert: OperationHooks::default(),
            update: OperationHooks::default(),
            delete: OperationHooks::default(),
        }
    }
}

impl<T: Entity> Clone for ServiceHooks<T> {
    fn clone(&self) -> Self {
        Self {
            get_by_id: self.get_by_id.clone(),
            get_all: self.get_all.clone(),
            insert: self.insert.clone(),
            update: self.update.clone(),
            delete: self.delete.clone(),
        }
    }
}

impl<T: Entity> ServiceHooks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get_by_id(mut self, hooks: OperationHooks<T::Key>) -> Self {
        self.get_by_id = hooks;
        self
    }

    pub fn on_get_all(mut self, hooks: OperationHooks<()>) -> Self {
        self.get_all = hooks;
        self
    }

    pub fn on_insert(mut self, hooks: OperationHooks<T>) -> Self {
        self.insert = hooks;
        self
    }

    pub fn on_update(mut self, hooks: OperationHooks<T>) -> Self {
        self.update = hooks;
        self
    }

    pub fn on_delete(mut self, hooks: OperationHooks<T::Key>) -> Self {
        self.delete = hooks;
        self
    }
}
