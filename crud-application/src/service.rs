//! CRUD 业务服务
//!
//! `CrudService` 持有一个数据代理，为每个 CRUD 操作产出预先配置好的命令：
//! 执行器转发到代理的对应操作，检查环节来自 [`ServiceHooks`]。
//! 服务本身不缓存、不重试，命令之间除调用顺序外没有额外的次序保证。
//!
use std::borrow::Cow;
use std::sync::Arc;

use bon::Builder;
use crud_domain::{
    context::ExecutionContext,
    entity::{Entity, entity_label},
    proxy::{AsyncDataProxy, DataProxy, ProxyCapabilities},
    validation::ValidationResult,
};

use crate::{
    command::{AsyncCommand, Command},
    config::ServiceConfig,
    hooks::{OperationHooks, ServiceHooks},
};

#[derive(Builder)]
pub struct CrudService<T: Entity, P> {
    proxy: Arc<P>,
    #[builder(default)]
    hooks: ServiceHooks<T>,
    #[builder(default)]
    config: ServiceConfig,
}

impl<T: Entity, P> CrudService<T, P> {
    /// 以默认钩子与配置创建服务
    pub fn new(proxy: P) -> Self {
        Self {
            proxy: Arc::new(proxy),
            hooks: ServiceHooks::default(),
            config: ServiceConfig::default(),
        }
    }

    /// 命令名称前缀
    pub fn label(&self) -> &str {
        self.config
            .label()
            .unwrap_or_else(|| entity_label::<T>())
    }

    pub fn proxy(&self) -> &Arc<P> {
        &self.proxy
    }

    pub fn hooks(&self) -> &ServiceHooks<T> {
        &self.hooks
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn command_name(&self, operation: &str) -> Cow<'static, str> {
        Cow::Owned(format!("{}.{operation}", self.label()))
    }
}

/// 插入/更新的校验：实体自校验在前，钩子配置的来源在后
fn entity_validations<T: Entity>(
    hooks: &OperationHooks<T>,
    entity: &T,
    ctx: &mut ExecutionContext,
) -> Vec<ValidationResult> {
    let mut results = entity.validation_errors();
    results.extend(hooks.collect_validations(entity, ctx));
    results
}

impl<T: Entity, P: ProxyCapabilities> CrudService<T, P> {
    pub fn supports_transactions(&self) -> bool {
        self.proxy.supports_transactions()
    }

    pub fn is_latency_prone(&self) -> bool {
        self.proxy.is_latency_prone()
    }
}

impl<T: Entity, P: DataProxy<T>> CrudService<T, P> {
    pub fn get_by_id_command(&self, key: T::Key) -> Command<'_, T::Key, T> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.get_by_id;
        Command::new(self.command_name("get_by_id"), key, move |key, _| {
            proxy.get_by_id(&key)
        })
        .before(move |key, ctx| hooks.run_before(key, ctx))
        .validations(move |key, ctx| hooks.collect_validations(key, ctx))
        .rules(move |key, ctx| hooks.collect_rules(key, ctx))
        .fail_fast(self.config.fail_fast())
    }

    pub fn get_all_command(&self) -> Command<'_, (), Vec<T>> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.get_all;
        Command::new(self.command_name("get_all"), (), move |_, _| proxy.get_all())
            .before(move |input, ctx| hooks.run_before(input, ctx))
            .validations(move |input, ctx| hooks.collect_validations(input, ctx))
            .rules(move |input, ctx| hooks.collect_rules(input, ctx))
            .fail_fast(self.config.fail_fast())
    }

    pub fn insert_command(&self, entity: T) -> Command<'_, T, T> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.insert;
        Command::new(self.command_name("insert"), entity, move |entity, _| {
            proxy.insert(entity)
        })
        .before(move |entity, ctx| hooks.run_before(entity, ctx))
        .validations(move |entity, ctx| entity_validations(hooks, entity, ctx))
        .rules(move |entity, ctx| hooks.collect_rules(entity, ctx))
        .fail_fast(self.config.fail_fast())
    }

    pub fn update_command(&self, entity: T) -> Command<'_, T, T> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.update;
        Command::new(self.command_name("update"), entity, move |entity, _| {
            proxy.update(entity)
        })
        .before(move |entity, ctx| hooks.run_before(entity, ctx))
        .validations(move |entity, ctx| entity_validations(hooks, entity, ctx))
        .rules(move |entity, ctx| hooks.collect_rules(entity, ctx))
        .fail_fast(self.config.fail_fast())
    }

    pub fn delete_command(&self, key: T::Key) -> Command<'_, T::Key, ()> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.delete;
        Command::new(self.command_name("delete"), key, move |key, _| {
            proxy.delete(&key)
        })
        .before(move |key, ctx| hooks.run_before(key, ctx))
        .validations(move |key, ctx| hooks.collect_validations(key, ctx))
        .rules(move |key, ctx| hooks.collect_rules(key, ctx))
        .fail_fast(self.config.fail_fast())
    }
}

impl<T: Entity, P: AsyncDataProxy<T>> CrudService<T, P> {
    pub fn get_by_id_command_async(&self, key: T::Key) -> AsyncCommand<'_, T::Key, T> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.get_by_id;
        AsyncCommand::new(
            self.command_name("get_by_id"),
            key,
            move |key, _| async move { proxy.get_by_id(&key).await },
        )
        .before(move |key, ctx| hooks.run_before(key, ctx))
        .validations(move |key, ctx| hooks.collect_validations(key, ctx))
        .rules(move |key, ctx| hooks.collect_rules(key, ctx))
        .fail_fast(self.config.fail_fast())
    }

    pub fn get_all_command_async(&self) -> AsyncCommand<'_, (), Vec<T>> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.get_all;
        AsyncCommand::new(self.command_name("get_all"), (), move |_, _| async move {
            proxy.get_all().await
        })
        .before(move |input, ctx| hooks.run_before(input, ctx))
        .validations(move |input, ctx| hooks.collect_validations(input, ctx))
        .rules(move |input, ctx| hooks.collect_rules(input, ctx))
        .fail_fast(self.config.fail_fast())
    }

    pub fn insert_command_async(&self, entity: T) -> AsyncCommand<'_, T, T> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.insert;
        AsyncCommand::new(
            self.command_name("insert"),
            entity,
            move |entity, _| async move { proxy.insert(entity).await },
        )
        .before(move |entity, ctx| hooks.run_before(entity, ctx))
        .validations(move |entity, ctx| entity_validations(hooks, entity, ctx))
        .rules(move |entity, ctx| hooks.collect_rules(entity, ctx))
        .fail_fast(self.config.fail_fast())
    }

    pub fn update_command_async(&self, entity: T) -> AsyncCommand<'_, T, T> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.update;
        AsyncCommand::new(
            self.command_name("update"),
            entity,
            move |entity, _| async move { proxy.update(entity).await },
        )
        .before(move |entity, ctx| hooks.run_before(entity, ctx))
        .validations(move |entity, ctx| entity_validations(hooks, entity, ctx))
        .rules(move |entity, ctx| hooks.collect_rules(entity, ctx))
        .fail_fast(self.config.fail_fast())
    }

    pub fn delete_command_async(&self, key: T::Key) -> AsyncCommand<'_, T::Key, ()> {
        let proxy: &P = &self.proxy;
        let hooks = &self.hooks.delete;
        AsyncCommand::new(
            self.command_name("delete"),
            key,
            move |key, _| async move { proxy.delete(&key).await },
        )
        .before(move |key, ctx| hooks.run_before(key, ctx))
        .validations(move |key, ctx| hooks.collect_validations(key, ctx))
        .rules(move |key, ctx| hooks.collect_rules(key, ctx))
        .fail_fast(self.config.fail_fast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Item;
    use crud_domain::error::DomainResult;
    use crud_domain::proxy::InMemoryDataProxy;

    #[test]
    fn label_defaults_to_entity_name() {
        let service: CrudService<Item, _> = CrudService::new(InMemoryDataProxy::<Item>::new());
        assert_eq!(service.label(), "Item");
        assert_eq!(service.get_all_command().name(), "Item.get_all");
    }

    #[test]
    fn label_comes_from_config() {
        let service = CrudService::<Item, _>::builder()
            .proxy(Arc::new(InMemoryDataProxy::<Item>::new()))
            .config(ServiceConfig::builder().label("items").build())
            .build();
        assert_eq!(service.insert_command(Item::named("a")).name(), "items.insert");
    }

    #[test]
    fn insert_runs_entity_validation_before_hooks() {
        let service = CrudService::<Item, _>::builder()
            .proxy(Arc::new(InMemoryDataProxy::<Item>::new()))
            .hooks(ServiceHooks::new().on_insert(
                OperationHooks::new().validate_with(|_, _| vec![ValidationResult::new("hook")]),
            ))
            .build();

        let result = service.insert_command(Item::named("")).execute().unwrap();
        let messages: Vec<&str> = result.errors().iter().map(|e| e.message()).collect();
        assert_eq!(messages, ["the name field is required", "hook"]);
        assert_eq!(service.proxy().len().unwrap(), 0);
    }

    /// 声明支持事务且有网络延迟的代理，存储委托给内存实现
    #[derive(Default)]
    struct RemoteProxy {
        inner: InMemoryDataProxy<Item>,
    }

    impl ProxyCapabilities for RemoteProxy {
        fn supports_transactions(&self) -> bool {
            true
        }

        fn is_latency_prone(&self) -> bool {
            true
        }
    }

    impl DataProxy<Item> for RemoteProxy {
        fn get_all(&self) -> DomainResult<Vec<Item>> {
            self.inner.get_all()
        }

        fn get_by_id(&self, key: &i64) -> DomainResult<Item> {
            self.inner.get_by_id(key)
        }

        fn insert(&self, entity: Item) -> DomainResult<Item> {
            self.inner.insert(entity)
        }

        fn update(&self, entity: Item) -> DomainResult<Item> {
            self.inner.update(entity)
        }

        fn delete(&self, key: &i64) -> DomainResult<()> {
            self.inner.delete(key)
        }
    }

    #[test]
    fn default_capabilities_are_false() {
        let service: CrudService<Item, _> = CrudService::new(InMemoryDataProxy::<Item>::new());
        assert!(!service.supports_transactions());
        assert!(!service.is_latency_prone());
    }

    #[test]
    fn proxy_capabilities_reach_the_service() {
        let service: CrudService<Item, _> = CrudService::new(RemoteProxy::default());
        assert!(service.supports_transactions());
        assert!(service.is_latency_prone());

        let created = service
            .insert_command(Item::named("a"))
            .execute()
            .unwrap()
            .into_value();
        assert_eq!(created.map(|item| item.id), Some(1));
    }

    #[test]
    fn capabilities_survive_arc_wrapping() {
        let shared = Arc::new(RemoteProxy::default());
        assert!(shared.supports_transactions());
        assert!(shared.is_latency_prone());

        let service: CrudService<Item, Arc<RemoteProxy>> = CrudService::new(shared);
        assert!(service.supports_transactions());
        assert!(service.is_latency_prone());
    }
}
