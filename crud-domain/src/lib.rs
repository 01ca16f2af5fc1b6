//! CRUD 领域层基础库（crud-domain）
//!
//! 提供围绕“校验后执行”的 CRUD 服务所需的领域层抽象：
//! - 实体（`entity`）与顺序键分配（`key`）
//! - 校验结果（`validation`）与字段级校验器
//! - 业务规则（`rule`）与规约（`specification`）
//! - 单次命令执行期间的上下文（`context`）
//! - 数据代理（`proxy`）：同步/异步 CRUD 能力抽象及内存实现
//!
//! 本 crate 不绑定任何存储后端，仅定义协议与最小必要的错误类型；
//! 具体的持久化实现（数据库、远程服务等）由上层实现 `DataProxy`/`AsyncDataProxy` 并注入。
//!
//! 典型用法：
//! 1. 定义实体并实现 `Entity`（或使用 `crud-macros` 的 `#[entity]`）；
//! 2. 选择 `proxy` 中的数据代理实现，或为自定义后端实现代理 trait；
//! 3. 以 `Rule`/`Specification` 表达业务约束，交由应用层命令统一执行。
//!
pub mod context;
pub mod entity;
pub mod error;
pub mod key;
pub mod proxy;
pub mod rule;
pub mod specification;
pub mod validation;

// 允许在本 crate 内部通过 ::crud_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::crud_domain 路径。
extern crate self as crud_domain;
