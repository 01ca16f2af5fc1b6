//! 应用层：命令、钩子与 CRUD 服务
//!
//! - [`command`]：先校验后执行的同步/异步命令；
//! - [`hooks`]：按操作配置的前置钩子、校验来源与业务规则来源；
//! - [`service`]：基于数据代理产出预配置命令的 `CrudService`；
//! - [`config`]：服务配置（代码构造或环境变量）。
//!
pub mod command;
pub mod config;
pub mod error;
pub mod execution_result;
pub mod hooks;
pub mod service;

#[cfg(test)]
mod test_support;

pub use command::{AsyncCommand, Command};
pub use config::ServiceConfig;
pub use error::AppError;
pub use execution_result::ExecutionResult;
pub use hooks::{OperationHooks, ServiceHooks};
pub use service::CrudService;
