use proc_macro::TokenStream;

mod derive_utils;
mod entity;
mod field_utils;

/// 实体宏
/// - 若缺失则追加键字段 `id: KeyType` 并置于字段最前
/// - 合并派生：`Debug`（可关闭）、`Clone`、`Default`、`serde::Serialize`、`serde::Deserialize`
/// - 自动实现 `::crud_domain::entity::Entity`（`key/set_key`，可选 `validation_errors`）
/// - 支持参数：`#[entity(key = KeyType, validate = path, debug = true|false)]`，`key` 默认 `i64`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}
