use crate::derive_utils::apply_derives;
use crate::field_utils::ensure_required_fields;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::spanned::Spanned;
use syn::{Fields, Ident, ItemStruct, LitBool, Result, Type};

#[derive(Default)]
struct EntityArgs {
    id: Option<Type>,
    data: Option<Ident>,
    debug: Option<bool>,
}

fn parse_args(attr: TokenStream) -> Result<EntityArgs> {
    let mut args = EntityArgs::default();
    let parser = syn::meta::parser(|meta| {
        let key = meta
            .path
            .get_ident()
            .map(ToString::to_string)
            .unwrap_or_default();
        match key.as_str() {
            "id" if args.id.is_none() => args.id = Some(meta.value()?.parse()?),
            "data" if args.data.is_none() => args.data = Some(meta.value()?.parse()?),
            "debug" if args.debug.is_none() => {
                args.debug = Some(meta.value()?.parse::<LitBool>()?.value());
            }
            "id" | "data" | "debug" => {
                return Err(meta.error(format!("duplicate key '{key}' in attribute")));
            }
            _ => return Err(meta.error("unknown key; expected 'id', 'data' or 'debug'")),
        }
        Ok(())
    });
    parser.parse2(attr)?;
    Ok(args)
}

/// 展开 `#[entity]`：补齐 `id`/`version` 字段并实现 `Entity`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let args = parse_args(attr)?;
    let mut st: ItemStruct = syn::parse2(item)
        .map_err(|e| syn::Error::new(e.span(), "#[entity] can only be applied to a struct"))?;

    let span = st.span();
    let Fields::Named(fields) = &mut st.fields else {
        return Err(syn::Error::new(span, "#[entity] requires a struct with named fields"));
    };

    let id_ty = args.id.unwrap_or_else(|| syn::parse_quote!(String));
    let version_ty: Type = syn::parse_quote!(usize);
    ensure_required_fields(fields, &[("id", &id_ty), ("version", &version_ty)]);

    // 未指定 data 时实体本身就是提交后回传的数据
    let (data_ty, data_expr) = match &args.data {
        None => (quote!(Self), quote!(self)),
        Some(name) => {
            let field = fields
                .named
                .iter()
                .find(|f| f.ident.as_ref() == Some(name))
                .ok_or_else(|| {
                    syn::Error::new(name.span(), format!("no field named `{name}` to use as data"))
                })?;
            let ty = &field.ty;
            (quote!(#ty), quote!(&self.#name))
        }
    };

    let mut derives: Vec<syn::Path> = Vec::new();
    if args.debug.unwrap_or(true) {
        derives.push(syn::parse_quote!(Debug));
    }
    derives.extend([
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ]);
    apply_derives(&mut st.attrs, derives);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics ::escmd_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_ty;
            type Data = #data_ty;

            fn new(id: Self::Id, version: usize) -> Self {
                Self { id, version, ..::std::default::Default::default() }
            }

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn version(&self) -> usize {
                self.version
            }

            fn data(&self) -> &Self::Data {
                #data_expr
            }
        }
    })
}
