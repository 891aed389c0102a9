use quote::ToTokens;
use std::collections::HashSet;
use syn::{Attribute, Path, Token, punctuated::Punctuated};

/// 将 `required` 派生与用户已写的 `#[derive(...)]` 合并为一个属性并放在最前
///
/// 以路径末段去重（`Serialize` 与 `serde::Serialize` 视为同一项），`required` 优先。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) {
    let mut existing = Vec::new();
    attrs.retain(|attr| {
        if !attr.path().is_ident("derive") {
            return true;
        }
        match attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) {
            Ok(list) => {
                existing.extend(list);
                false
            }
            // 无法解析的 derive 原样保留，交给编译器报错
            Err(_) => true,
        }
    });

    let mut seen = HashSet::new();
    let merged: Vec<Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    attrs.insert(0, syn::parse_quote!(#[derive(#(#merged),*)]));
}

fn derive_key(p: &Path) -> String {
    p.segments
        .last()
        .map(|seg| seg.ident.to_string())
        .unwrap_or_else(|| p.to_token_stream().to_string())
}
