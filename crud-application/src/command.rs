//! 命令（Command）
//!
//! 一个延迟执行、先校验后执行的工作单元。执行顺序固定为：
//! 1. 前置钩子（可向上下文写入数据）；
//! 2. 收集校验结果；
//! 3. 收集业务规则并逐条求值；
//! 4. 任一环节产生失败时放弃执行，返回合并后的失败信息；
//! 5. 否则调用执行器一次，并返回其结果。
//!
//! `Command` 为同步版本，`AsyncCommand` 为异步版本；两者共享同一套校验流程。
//! 每个命令持有独立的 [`ExecutionContext`]，执行结束即丢弃。
//!
use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;

use crud_domain::{
    context::ExecutionContext,
    error::DomainResult,
    rule::{BoxRule, RuleOutcome},
    validation::ValidationResult,
};
use tracing::{Instrument, debug, debug_span, warn};

use crate::{error::AppError, execution_result::ExecutionResult};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type BeforeFn<'a, I> = Box<dyn FnOnce(&I, &mut ExecutionContext) + Send + 'a>;

type ValidationsFn<'a, I> =
    Box<dyn FnOnce(&I, &mut ExecutionContext) -> Vec<ValidationResult> + Send + 'a>;

type RulesFn<'a, I> = Box<dyn FnOnce(&I, &mut ExecutionContext) -> Vec<BoxRule> + Send + 'a>;

type ExecuteFn<'a, I, R> = Box<dyn FnOnce(I, &mut ExecutionContext) -> DomainResult<R> + Send + 'a>;

type ExecuteAsyncFn<'a, I, R> =
    Box<dyn FnOnce(I, ExecutionContext) -> BoxFuture<'a, DomainResult<R>> + Send + 'a>;

/// 执行器之前的检查环节
struct Guards<'a, I> {
    before: Option<BeforeFn<'a, I>>,
    validations: Option<ValidationsFn<'a, I>>,
    rules: Option<RulesFn<'a, I>>,
    fail_fast: bool,
}

impl<I> Default for Guards<'_, I> {
    fn default() -> Self {
        Self {
            before: None,
            validations: None,
            rules: None,
            fail_fast: false,
        }
    }
}

impl<I> Guards<'_, I> {
    /// 依次运行前置钩子、校验与规则，返回全部失败信息
    fn check(self, input: &I, ctx: &mut ExecutionContext) -> Vec<ValidationResult> {
        if let Some(before) = self.before {
            before(input, ctx);
        }

        let mut failures = match self.validations {
            Some(source) => source(input, ctx),
            None => Vec::new(),
        };

        if self.fail_fast && !failures.is_empty() {
            debug!(failures = failures.len(), "validation failed, skipping business rules");
            return failures;
        }

        let rules = match self.rules {
            Some(source) => source(input, ctx),
            None => Vec::new(),
        };

        for rule in &rules {
            if let RuleOutcome::Invalid { message } = rule.validate(ctx) {
                debug!(rule = rule.name(), %message, "business rule failed");
                failures.push(ValidationResult::new(message));
            }
        }

        failures
    }
}

/// 同步命令
pub struct Command<'a, I, R> {
    name: Cow<'static, str>,
    input: I,
    context: ExecutionContext,
    guards: Guards<'a, I>,
    executor: ExecuteFn<'a, I, R>,
}

impl<'a, I, R> Command<'a, I, R> {
    /// 以名称、输入与执行器创建命令；检查环节默认为空
    pub fn new<F>(name: impl Into<Cow<'static, str>>, input: I, executor: F) -> Self
    where
        F: FnOnce(I, &mut ExecutionContext) -> DomainResult<R> + Send + 'a,
    {
        Self {
            name: name.into(),
            input,
            context: ExecutionContext::new(),
            guards: Guards::default(),
            executor: Box::new(executor),
        }
    }

    /// 设置（替换）前置钩子
    pub fn before<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&I, &mut ExecutionContext) + Send + 'a,
    {
        self.guards.before = Some(Box::new(f));
        self
    }

    /// 设置（替换）校验结果来源
    pub fn validations<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&I, &mut ExecutionContext) -> Vec<ValidationResult> + Send + 'a,
    {
        self.guards.validations = Some(Box::new(f));
        self
    }

    /// 设置（替换）业务规则来源
    pub fn rules<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&I, &mut ExecutionContext) -> Vec<BoxRule> + Send + 'a,
    {
        self.guards.rules = Some(Box::new(f));
        self
    }

    /// 校验已失败时是否跳过业务规则
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.guards.fail_fast = fail_fast;
        self
    }

    /// 替换执行上下文（例如携带调用方的关联 ID）
    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn execute(self) -> Result<ExecutionResult<R>, AppError> {
        let Self {
            name,
            input,
            mut context,
            guards,
            executor,
        } = self;

        let span = debug_span!(
            "command",
            command = %name,
            correlation_id = context.correlation_id()
        );
        let _entered = span.enter();

        let failures = guards.check(&input, &mut context);
        if !failures.is_empty() {
            warn!(failures = failures.len(), "command rejected");
            return Ok(ExecutionResult::Failed(failures));
        }

        let value = executor(input, &mut context)?;
        debug!("command executed");
        Ok(ExecutionResult::Success(value))
    }
}

/// 异步命令
pub struct AsyncCommand<'a, I, R> {
    name: Cow<'static, str>,
    input: I,
    context: ExecutionContext,
    guards: Guards<'a, I>,
    executor: ExecuteAsyncFn<'a, I, R>,
}

impl<'a, I, R> AsyncCommand<'a, I, R> {
    /// 以名称、输入与异步执行器创建命令；执行器取得上下文所有权
    pub fn new<F, Fut>(name: impl Into<Cow<'static, str>>, input: I, executor: F) -> Self
    where
        F: FnOnce(I, ExecutionContext) -> Fut + Send + 'a,
        Fut: Future<Output = DomainResult<R>> + Send + 'a,
    {
        Self {
            name: name.into(),
            input,
            context: ExecutionContext::new(),
            guards: Guards::default(),
            executor: Box::new(move |input, ctx| {
                Box::pin(executor(input, ctx)) as BoxFuture<'a, DomainResult<R>>
            }),
        }
    }

    /// 设置（替换）前置钩子
    pub fn before<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&I, &mut ExecutionContext) + Send + 'a,
    {
        self.guards.before = Some(Box::new(f));
        self
    }

    /// 设置（替换）校验结果来源
    pub fn validations<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&I, &mut ExecutionContext) -> Vec<ValidationResult> + Send + 'a,
    {
        self.guards.validations = Some(Box::new(f));
        self
    }

    /// 设置（替换）业务规则来源
    pub fn rules<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&I, &mut ExecutionContext) -> Vec<BoxRule> + Send + 'a,
    {
        self.guards.rules = Some(Box::new(f));
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.guards.fail_fast = fail_fast;
        self
    }

    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub async fn execute(self) -> Result<ExecutionResult<R>, AppError> {
        let span = debug_span!(
            "command",
            command = %self.name,
            correlation_id = self.context.correlation_id()
        );
        self.run().instrument(span).await
    }

    async fn run(self) -> Result<ExecutionResult<R>, AppError> {
        let Self {
            input,
            mut context,
            guards,
            executor,
            ..
        } = self;

        let failures = guards.check(&input, &mut context);
        if !failures.is_empty() {
            warn!(failures = failures.len(), "command rejected");
            return Ok(ExecutionResult::Failed(failures));
        }

        let value = executor(input, context).await?;
        debug!("command executed");
        Ok(ExecutionResult::Success(value))
    }
}
