//! 命令执行结果（Execution Result）
//!
//! 校验或业务规则失败不是错误：命令以 `Failed` 返回全部失败信息，
//! 由调用方决定如何呈现；只有执行器本身的失败（如键不存在）才以 `Err` 返回。
//!
use crud_domain::validation::ValidationResult;

use crate::error::AppError;

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult<R> {
    Success(R),
    Failed(Vec<ValidationResult>),
}

impl<R> ExecutionResult<R> {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success(_))
    }

    pub fn value(&self) -> Option<&R> {
        match self {
            ExecutionResult::Success(value) => Some(value),
            ExecutionResult::Failed(_) => None,
        }
    }

    pub fn into_value(self) -> Option<R> {
        match self {
            ExecutionResult::Success(value) => Some(value),
            ExecutionResult::Failed(_) => None,
        }
    }

    /// 失败信息；成功时为空
    pub fn errors(&self) -> &[ValidationResult] {
        match self {
            ExecutionResult::Success(_) => &[],
            ExecutionResult::Failed(errors) => errors,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> ExecutionResult<U> {
        match self {
            ExecutionResult::Success(value) => ExecutionResult::Success(f(value)),
            ExecutionResult::Failed(errors) => ExecutionResult::Failed(errors),
        }
    }

    /// 转为 `Result`，失败信息映射为 `AppError::Validation`
    pub fn into_result(self) -> Result<R, AppError> {
        match self {
            ExecutionResult::Success(value) => Ok(value),
            ExecutionResult::Failed(errors) => Err(AppError::Validation(errors)),
        }
    }
}
