use crate::derive_utils::apply_derives;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Fields, ItemStruct, Result};

/// 展开 `#[entity_id]`
///
/// 命令消息中的标识以字符串到达，分发器通过 `FromStr` 把它解析成实体标识，
/// 因此这里把解析与显示都委托给内部类型。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new(Span::call_site(), "#[entity_id] takes no arguments"));
    }

    let mut st: ItemStruct = syn::parse2(item)
        .map_err(|e| syn::Error::new(e.span(), "#[entity_id] can only be applied to a struct"))?;

    let inner = match &st.fields {
        Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
        _ => {
            return Err(syn::Error::new(
                st.ident.span(),
                "#[entity_id] expects a newtype such as `struct OrderNo(u64);`",
            ));
        }
    };

    apply_derives(
        &mut st.attrs,
        vec![
            syn::parse_quote!(Debug),
            syn::parse_quote!(Clone),
            syn::parse_quote!(Default),
            syn::parse_quote!(PartialEq),
            syn::parse_quote!(Eq),
            syn::parse_quote!(Hash),
            syn::parse_quote!(serde::Serialize),
            syn::parse_quote!(serde::Deserialize),
        ],
    );

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new(value: #inner) -> Self {
                Self(value)
            }

            pub fn into_inner(self) -> #inner {
                self.0
            }
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #where_clause {
            type Err = <#inner as ::std::str::FromStr>::Err;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <#inner as ::std::str::FromStr>::from_str(s).map(Self)
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl #impl_generics ::std::convert::AsRef<#inner> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &#inner {
                &self.0
            }
        }

        impl #impl_generics ::std::convert::From<#inner> for #ident #ty_generics #where_clause {
            fn from(value: #inner) -> Self {
                Self(value)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_gets_parsing_and_display() {
        let out = expand(TokenStream::new(), quote!(struct OrderNo(u64);))
            .unwrap()
            .to_string();
        assert!(out.contains("type Err = < u64 as :: std :: str :: FromStr > :: Err"));
        assert!(out.contains(":: std :: fmt :: Display for OrderNo"));
        assert!(out.contains("Hash"));
    }

    #[test]
    fn only_single_field_tuple_structs_are_accepted() {
        assert!(expand(quote!(debug = false), quote!(struct A(u64);)).is_err());
        assert!(expand(TokenStream::new(), quote!(struct B { id: u64 })).is_err());
        assert!(expand(TokenStream::new(), quote!(struct C(u64, u64);)).is_err());
        assert!(expand(TokenStream::new(), quote!(enum D { X })).is_err());
    }
}
