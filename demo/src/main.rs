use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use crud_application::{
    AppError, CrudService, ExecutionResult, OperationHooks, ServiceConfig, ServiceHooks,
};
use crud_domain::context::ExecutionContext;
use crud_domain::proxy::{AsyncDataProxy, AsyncInMemoryDataProxy, DataProxy, InMemoryDataProxy};
use crud_domain::rule::{BoxRule, ensure};
use crud_domain::validation::{ValidationResult, Validator};
use crud_macros::entity;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// 上下文中保存现有名称的键
const EXISTING_NAMES: &str = "existing_names";

const PROTECTED_ID: i64 = 1;

#[entity(key = i64, validate = Self::check)]
struct Category {
    name: String,
    description: String,
}

impl Category {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn check(&self) -> Vec<ValidationResult> {
        Validator::new()
            .required("name", &self.name)
            .max_length("name", &self.name, 30)
            .max_length("description", &self.description, 200)
            .finish()
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

fn seed() -> Vec<Category> {
    let mut general = Category::new("general", "fallback category");
    general.id = PROTECTED_ID;
    let mut books = Category::new("books", "printed and digital");
    books.id = 2;
    vec![general, books]
}

/// 名称唯一：比对上下文中的现有名称（更新时跳过自身）
///
/// 名称快照在规则求值前读取，插入在之后另行持锁，两者不在同一临界区：
/// 并发插入同名分类时都可能通过此规则。本 demo 单线程顺序执行；
/// 需要强唯一性时应由存储后端在写入时校验。
fn unique_name_rule(candidate: &Category, ctx: &mut ExecutionContext) -> Vec<BoxRule> {
    let taken = ctx
        .get::<Vec<(i64, String)>>(EXISTING_NAMES)
        .is_some_and(|names| {
            names
                .iter()
                .any(|(id, name)| *id != candidate.id && name.eq_ignore_ascii_case(&candidate.name))
        });
    let message = format!("a category named {} already exists", candidate.name);
    vec![Box::new(ensure("unique_name", message, move |_| !taken)) as BoxRule]
}

/// 受保护的分类不可删除
fn protected_delete_rule(key: &i64, _ctx: &mut ExecutionContext) -> Vec<BoxRule> {
    let key = *key;
    vec![Box::new(ensure(
        "not_protected",
        format!("category {key} is protected"),
        move |_| key != PROTECTED_ID,
    )) as BoxRule]
}

fn names_of(categories: Vec<Category>) -> Vec<(i64, String)> {
    categories.into_iter().map(|c| (c.id, c.name)).collect()
}

fn report<R: Debug>(operation: &str, outcome: Result<ExecutionResult<R>, AppError>) {
    match outcome {
        Ok(ExecutionResult::Success(value)) => info!(operation, ?value, "succeeded"),
        Ok(ExecutionResult::Failed(errors)) => {
            for error in &errors {
                warn!(operation, %error, "rejected");
            }
        }
        Err(err) => warn!(operation, %err, "failed"),
    }
}

fn run_sync() -> anyhow::Result<()> {
    let proxy = Arc::new(InMemoryDataProxy::with_entities(seed())?);

    // 同步代理可在前置钩子里直接读取快照（仅为提示性检查，见 unique_name_rule）
    let names_source = proxy.clone();
    let write_hooks = move || {
        let names_source = names_source.clone();
        OperationHooks::new()
            .before(move |_: &Category, ctx: &mut ExecutionContext| {
                if let Ok(all) = names_source.get_all() {
                    ctx.insert(EXISTING_NAMES, names_of(all));
                }
            })
            .rules_with(unique_name_rule)
    };

    let service = CrudService::<Category, _>::builder()
        .proxy(proxy.clone())
        .hooks(
            ServiceHooks::new()
                .on_insert(write_hooks())
                .on_update(write_hooks())
                .on_delete(OperationHooks::new().rules_with(protected_delete_rule)),
        )
        .config(ServiceConfig::from_env()?)
        .build();

    info!(
        service = service.label(),
        transactions = service.supports_transactions(),
        latency_prone = service.is_latency_prone(),
        "sync service ready"
    );

    report("insert", service.insert_command(Category::new("music", "records")).execute());
    report("insert", service.insert_command(Category::new("Books", "dup")).execute());
    report("insert", service.insert_command(Category::new("", "no name")).execute());

    let mut renamed = service.get_by_id_command(2).execute()?.into_result()?;
    renamed.name = "literature".to_string();
    report("update", service.update_command(renamed).execute());

    report("delete", service.delete_command(PROTECTED_ID).execute());
    report("delete", service.delete_command(3).execute());
    report("get_by_id", service.get_by_id_command(3).execute());

    let all = service.get_all_command().execute()?.into_result()?;
    info!(categories = %serde_json::to_string(&all)?, "sync final state");
    Ok(())
}

async fn run_async() -> anyhow::Result<()> {
    let proxy = Arc::new(AsyncInMemoryDataProxy::with_entities(seed())?);
    let service = CrudService::<Category, _>::builder()
        .proxy(proxy.clone())
        .hooks(
            ServiceHooks::new()
                .on_insert(OperationHooks::new().rules_with(unique_name_rule))
                .on_delete(OperationHooks::new().rules_with(protected_delete_rule)),
        )
        .config(ServiceConfig::builder().label("async-categories").build())
        .build();

    for (n, name) in ["games", "general", "films"].into_iter().enumerate() {
        // 异步代理的快照在命令外读取，经上下文传给规则
        let mut ctx = ExecutionContext::builder()
            .correlation_id(format!("req-{n}"))
            .actor_id("demo")
            .build();
        ctx.insert(EXISTING_NAMES, names_of(proxy.get_all().await?));

        let outcome = service
            .insert_command_async(Category::new(name, "async insert"))
            .with_context(ctx)
            .execute()
            .await;
        report("insert_async", outcome);
    }

    report(
        "delete_async",
        service.delete_command_async(PROTECTED_ID).execute().await,
    );
    report("get_by_id_async", service.get_by_id_command_async(42).execute().await);

    let all = service.get_all_command_async().execute().await?.into_result()?;
    info!(categories = %serde_json::to_string(&all)?, "async final state");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    run_sync()?;
    run_async().await?;
    Ok(())
}
