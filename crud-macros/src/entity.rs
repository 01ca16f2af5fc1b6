use crate::derive_utils::apply_derives;
use crate::field_utils::ensure_leading_field;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, ItemStruct, Path, Result, Token, Type, parse::Parse, parse::ParseStream};

/// #[entity] 宏实现
/// - 若缺失则追加字段 `id: KeyType`，并置于字段最前
/// - 自动实现 `::crud_domain::entity::Entity`（key/set_key，以及可选的 validation_errors）
/// - 支持参数：`#[entity(key = KeyType, validate = path, debug = true|false)]`；
///   - `key` 默认 `i64`
///   - `validate` 指向 `fn(&Self) -> Vec<ValidationResult>`，缺省时实体无自校验
///   - `debug` 默认 `true`（派生 Debug）。当为 `false` 时不派生 Debug，便于用户自定义实现。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_entity(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_entity(attr: TokenStream2, item: TokenStream2) -> Result<TokenStream2> {
    let cfg: EntityAttrConfig = syn::parse2(attr)?;
    let input: Item = syn::parse2(item)?;

    let mut st = match input {
        Item::Struct(s) => s,
        other => return Err(syn::Error::new(other.span(), "#[entity] only on struct")),
    };

    // 仅支持具名字段结构体
    let st_span = st.span();
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => return Err(syn::Error::new(st_span, "only supports named-field struct")),
    };

    let key_type = cfg.key_ty.unwrap_or_else(|| syn::parse_quote! { i64 });
    ensure_leading_field(fields_named, "id", &key_type);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let out_struct = ItemStruct { ..st };

    let ident = &out_struct.ident;
    let generics = out_struct.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let validation = cfg.validate.map(|path| {
        quote! {
            fn validation_errors(
                &self,
            ) -> ::std::vec::Vec<::crud_domain::validation::ValidationResult> {
                #path(self)
            }
        }
    });

    let expanded = quote! {
        #out_struct

        impl #impl_generics ::crud_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Key = #key_type;

            fn key(&self) -> &Self::Key { &self.id }

            fn set_key(&mut self, key: Self::Key) { self.id = key; }

            #validation
        }
    };

    Ok(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    key_ty: Option<Type>,
    validate: Option<Path>,
    derive_debug: Option<bool>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            key_ty: None,
            validate: None,
            derive_debug: None,
        };

        if input.is_empty() {
            return Ok(cfg);
        }

        let elems: Punctuated<EntityAttrElem, Token![,]> =
            Punctuated::<EntityAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                EntityAttrElem::Key(ty) => {
                    if cfg.key_ty.is_some() {
                        return Err(syn::Error::new(
                            ty.span(),
                            "duplicate key 'key' in attribute",
                        ));
                    }
                    cfg.key_ty = Some(*ty);
                }
                EntityAttrElem::Validate(path) => {
                    if cfg.validate.is_some() {
                        return Err(syn::Error::new(
                            path.span(),
                            "duplicate key 'validate' in attribute",
                        ));
                    }
                    cfg.validate = Some(path);
                }
                EntityAttrElem::Debug(b) => {
                    if cfg.derive_debug.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'debug' in attribute",
                        ));
                    }
                    cfg.derive_debug = Some(b);
                }
            }
        }

        Ok(cfg)
    }
}

enum EntityAttrElem {
    Key(Box<Type>),
    Validate(Path),
    Debug(bool),
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        if key == "key" {
            let ty: Type = input.parse()?;
            Ok(EntityAttrElem::Key(Box::new(ty)))
        } else if key == "validate" {
            let path: Path = input.parse()?;
            Ok(EntityAttrElem::Validate(path))
        } else if key == "debug" {
            let expr: syn::Expr = input.parse()?;
            match expr {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Bool(b),
                    ..
                }) => Ok(EntityAttrElem::Debug(b.value())),
                other => Err(syn::Error::new(
                    other.span(),
                    "expected boolean literal for 'debug'",
                )),
            }
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'key', 'validate' or 'debug'",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_error(attr: TokenStream2, item: TokenStream2) -> String {
        match expand_entity(attr, item) {
            Ok(tokens) => panic!("expected an error, got `{tokens}`"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn inserts_key_field_and_entity_impl() {
        let out = expand_entity(quote!(key = u32), quote!(struct Tag { label: String }))
            .unwrap()
            .to_string();
        assert!(out.contains("id : u32"));
        assert!(out.contains("type Key = u32"));
        assert!(!out.contains("validation_errors"));
    }

    #[test]
    fn rejects_non_struct_items() {
        assert_eq!(
            expand_error(quote!(), quote!(enum Kind { A, B })),
            "#[entity] only on struct"
        );
    }

    #[test]
    fn rejects_tuple_and_unit_structs() {
        assert_eq!(
            expand_error(quote!(), quote!(struct Tag(String);)),
            "only supports named-field struct"
        );
        assert_eq!(
            expand_error(quote!(), quote!(struct Marker;)),
            "only supports named-field struct"
        );
    }

    #[test]
    fn rejects_duplicate_arguments() {
        assert_eq!(
            expand_error(quote!(key = i64, key = u32), quote!(struct Tag { label: String })),
            "duplicate key 'key' in attribute"
        );
        assert_eq!(
            expand_error(
                quote!(debug = true, debug = false),
                quote!(struct Tag { label: String })
            ),
            "duplicate key 'debug' in attribute"
        );
    }

    #[test]
    fn rejects_unknown_argument() {
        assert_eq!(
            expand_error(quote!(id = i64), quote!(struct Tag { label: String })),
            "unknown key in attribute; expected 'key', 'validate' or 'debug'"
        );
    }

    #[test]
    fn rejects_non_bool_debug() {
        assert_eq!(
            expand_error(quote!(debug = 1), quote!(struct Tag { label: String })),
            "expected boolean literal for 'debug'"
        );
    }
}
