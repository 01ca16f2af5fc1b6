use proc_macro2::Span;
use syn::{Field, FieldsNamed, Ident, Token, Type, punctuated::Punctuated};

fn is_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().is_some_and(|i| i == name)
}

/// 确保具名字段结构体以指定字段开头
/// - 已存在：复用原字段定义（保留属性与可见性），移至最前
/// - 不存在：按给定类型新建
///
/// 其余字段保持原有相对顺序。
pub(crate) fn ensure_leading_field(fields_named: &mut FieldsNamed, name: &str, ty: &Type) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    match old_named.iter().find(|f| is_named(f, name)) {
        Some(existing) => new_named.push(existing.clone()),
        None => {
            let ident = Ident::new(name, Span::call_site());
            new_named.push(syn::parse_quote! { #ident: #ty });
        }
    }

    for f in old_named.into_iter().filter(|f| !is_named(f, name)) {
        new_named.push(f);
    }

    fields_named.named = new_named;
}
