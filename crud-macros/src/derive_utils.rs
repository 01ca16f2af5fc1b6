use std::collections::HashSet;

use quote::ToTokens;
use syn::{Attribute, Path, Token, punctuated::Punctuated};

/// 派生项的归一化名称：`serde::Serialize` 与 `Serialize` 视为同一项
fn derive_name(path: &Path) -> String {
    match path.segments.last() {
        Some(last) => last.ident.to_string(),
        None => path.to_token_stream().to_string(),
    }
}

/// 把结构体上所有 `#[derive(..)]` 合并为一个，并补齐 `required` 中缺失的派生项
///
/// 合并后的 derive 位于属性列表最前（先于 `#[serde(..)]` 等辅助属性）；
/// `required` 在前，用户已有的派生项按原顺序追加。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) {
    let mut others = Vec::with_capacity(attrs.len());
    let mut user_derives = Vec::new();

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            others.push(attr);
            continue;
        }
        match attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) {
            Ok(list) => user_derives.extend(list),
            // 无法解析的 derive 原样保留，交由编译器报告
            Err(_) => others.push(attr),
        }
    }

    let mut seen = HashSet::new();
    let merged: Vec<Path> = required
        .into_iter()
        .chain(user_derives)
        .filter(|p| seen.insert(derive_name(p)))
        .collect();

    attrs.push(syn::parse_quote!(#[derive(#(#merged),*)]));
    attrs.extend(others);
}
