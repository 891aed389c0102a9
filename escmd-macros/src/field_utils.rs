use proc_macro2::Span;
use syn::{Field, FieldsNamed, Ident, Type};

/// 把标识字段（`id`、`version` 等）放到结构体最前面。
///
/// 用户已声明的同名字段原样保留，未声明的按给定类型补上，其余字段顺序不变。
pub(crate) fn ensure_required_fields(fields_named: &mut FieldsNamed, required: &[(&str, &Type)]) {
    let mut rest: Vec<Field> = std::mem::take(&mut fields_named.named).into_iter().collect();

    let mut leading = Vec::with_capacity(required.len());
    for (name, ty) in required {
        let declared = rest
            .iter()
            .position(|f| f.ident.as_ref().is_some_and(|i| i == name));
        let field = match declared {
            Some(pos) => rest.remove(pos),
            None => {
                let ident = Ident::new(name, Span::call_site());
                syn::parse_quote! { #ident: #ty }
            }
        };
        leading.push(field);
    }

    fields_named.named = leading.into_iter().chain(rest).collect();
}
