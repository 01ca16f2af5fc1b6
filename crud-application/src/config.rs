//! 服务配置
//!
//! 既可通过 `ServiceConfig::builder()` 在代码中构造，也可以从环境变量读取：
//!
//! | 变量 | 含义 |
//! | --- | --- |
//! | `CRUD_SERVICE_LABEL` | 命令名称前缀，缺省为实体类型名 |
//! | `CRUD_FAIL_FAST` | `true`/`false`/`1`/`0`，校验失败后是否跳过业务规则 |
//!
use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const LABEL_ENV: &str = "CRUD_SERVICE_LABEL";
pub const FAIL_FAST_ENV: &str = "CRUD_FAIL_FAST";

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[builder(into)]
    #[serde(default)]
    label: Option<String>,
    #[builder(default)]
    #[serde(default)]
    fail_fast: bool,
}

impl ServiceConfig {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// 从进程环境变量读取配置
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let label = lookup(LABEL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let fail_fast = match lookup(FAIL_FAST_ENV) {
            Some(raw) => parse_flag(FAIL_FAST_ENV, &raw)?,
            None => false,
        };

        Ok(Self { label, fail_fast })
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => Err(AppError::Config {
            key,
            value: raw.to_string(),
            reason: "expected true/false/1/0".to_string(),
        }),
    }
}
