use proc_macro::TokenStream;

mod command_handler;
mod derive_utils;
mod entity;
mod entity_id;
mod field_utils;

/// 实体宏
/// - 追加字段：`id: IdType`, `version: usize`（若缺失）并置于字段最前
/// - 自动为目标结构体实现 `::escmd_domain::entity::Entity` trait
/// - 支持参数：`#[entity(id = IdType, data = field, debug = true|false)]`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 实体 ID 宏
/// 用于为 `tuple struct` 形式的 ID 类型（例如 `struct AccountId(String);`、`struct OrderId(Uuid);`）
/// 自动实现 `Display`、`FromStr`、`From`、`AsRef` 等。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 命令处理器宏
///
/// 作用于分发器的固有 `impl` 块：块内每个 `async fn` 都注册为同名命令，
/// 并生成 `fn command_table() -> AppResult<CommandTable<Self>>`。
///
/// - `#[command(name = "...")]` 覆写命令名；
/// - `#[command(skip)]` 跳过该方法；
/// - 命令名与保留名冲突时编译失败。
#[proc_macro_attribute]
pub fn command_handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    command_handler::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
