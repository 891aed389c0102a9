use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::spanned::Spanned;
use syn::{Attribute, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Result};

/// 单个命令：命令名与对应的方法名
struct CommandMethod {
    name: LitStr,
    method: syn::Ident,
}

/// #[command_handler] 宏实现
///
/// 收集 impl 块中的 `async fn`，生成命令表构造函数：
/// - 每个命令对应一个具名的适配函数，把 `async fn` 的 future 装箱为 `CommandFuture`；
/// - 每个命令名附带一个常量断言，命中 `escmd_application::command_table::is_reserved` 时编译失败。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new(
            attr.span(),
            "#[command_handler] takes no arguments",
        ));
    }

    let mut item_impl: ItemImpl = syn::parse2(item)?;

    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(syn::Error::new(
            path.span(),
            "#[command_handler] must be placed on an inherent impl block",
        ));
    }
    if !item_impl.generics.params.is_empty() {
        return Err(syn::Error::new(
            item_impl.generics.span(),
            "#[command_handler] does not support generic impl blocks",
        ));
    }

    let mut commands: Vec<CommandMethod> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for impl_item in item_impl.items.iter_mut() {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let opts = take_command_attrs(&mut method.attrs)?;
        if opts.skip || method.sig.asyncness.is_none() {
            continue;
        }

        check_signature(method)?;

        let name = opts
            .name
            .unwrap_or_else(|| LitStr::new(&method.sig.ident.to_string(), method.sig.ident.span()));
        if !seen.insert(name.value()) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate command name `{}`", name.value()),
            ));
        }

        commands.push(CommandMethod {
            name,
            method: method.sig.ident.clone(),
        });
    }

    let self_ty = &item_impl.self_ty;

    let guards = commands.iter().map(|c| {
        // assert! 把消息当作格式串，命令名里的花括号需要转义
        let escaped = c.name.value().replace('{', "{{").replace('}', "}}");
        let message = LitStr::new(
            &format!("`{escaped}` is a reserved dispatcher method and cannot be a command"),
            c.name.span(),
        );
        let name = &c.name;
        quote! {
            const _: () = ::std::assert!(
                !::escmd_application::command_table::is_reserved(#name),
                #message
            );
        }
    });

    let adapters = commands.iter().map(|c| {
        let adapter = format_ident!("__escmd_command_{}", c.method);
        let method = &c.method;
        quote! {
            fn #adapter<'a>(
                dispatcher: &'a #self_ty,
                message: ::escmd_application::message::FrozenMessage,
                entity: <#self_ty as ::escmd_application::dispatcher::CommandDispatcher>::Entity,
            ) -> ::escmd_application::command_table::CommandFuture<'a> {
                ::std::boxed::Box::pin(dispatcher.#method(message, entity))
            }
        }
    });

    let registrations = commands.iter().map(|c| {
        let adapter = format_ident!("__escmd_command_{}", c.method);
        let name = &c.name;
        quote! { table.register(#name, #adapter)?; }
    });

    Ok(quote! {
        #item_impl

        impl #self_ty {
            /// 由 `#[command_handler]` 生成的命令表
            pub fn command_table() -> ::escmd_application::error::AppResult<
                ::escmd_application::command_table::CommandTable<Self>,
            > {
                #( #guards )*
                #( #adapters )*

                let table = ::escmd_application::command_table::CommandTable::new();
                #( #registrations )*
                ::std::result::Result::Ok(table)
            }
        }
    })
}

#[derive(Default)]
struct CommandAttr {
    name: Option<LitStr>,
    skip: bool,
}

// 取出并移除方法上的 #[command(...)] 属性
fn take_command_attrs(attrs: &mut Vec<Attribute>) -> Result<CommandAttr> {
    let mut out = CommandAttr::default();
    let mut error: Option<syn::Error> = None;

    attrs.retain(|attr| {
        if !attr.path().is_ident("command") {
            return true;
        }
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else if meta.path.is_ident("name") {
                if out.name.is_some() {
                    return Err(meta.error("duplicate key 'name' in attribute"));
                }
                out.name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown key; expected 'name' | 'skip'"))
            }
        });
        if let Err(e) = parsed {
            match &mut error {
                Some(acc) => acc.combine(e),
                None => error = Some(e),
            }
        }
        false
    });

    match error {
        Some(e) => Err(e),
        None => Ok(out),
    }
}

// 命令方法形如：async fn name(&self, message, entity) -> AppResult<Value>
fn check_signature(method: &ImplItemFn) -> Result<()> {
    let mut inputs = method.sig.inputs.iter();
    let by_ref_self = matches!(
        inputs.next(),
        Some(FnArg::Receiver(r)) if r.reference.is_some() && r.mutability.is_none()
    );
    let typed = inputs.filter(|a| matches!(a, FnArg::Typed(_))).count();

    if !by_ref_self || typed != 2 {
        return Err(syn::Error::new(
            method.sig.span(),
            "command methods must look like `async fn name(&self, message: FrozenMessage, entity: Entity)`",
        ));
    }
    if !method.sig.generics.params.is_empty() {
        return Err(syn::Error::new(
            method.sig.generics.span(),
            "command methods cannot be generic",
        ));
    }
    Ok(())
}
