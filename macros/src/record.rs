use crate::field_parser::{FieldDef, RoleDef};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;

fn descriptor(struct_ident: &Ident, field: &FieldDef) -> TokenStream {
    let field_ident = &field.name;
    // `r#type` maps to column `type`
    let field_name = field_ident.unraw().to_string();
    let field_type = &field.tpe;
    let variant = Ident::new(field.field_type.variant(), Span::call_site());
    let role = match field.role {
        RoleDef::PrimaryKey => quote!(::rust_orm::Role::PrimaryKey),
        RoleDef::Column => quote!(::rust_orm::Role::Column),
    };
    quote! {
        ::rust_orm::FieldDescriptor {
            name: #field_name,
            field_type: ::rust_orm::FieldType::#variant,
            role: #role,
            get: |record: &#struct_ident| {
                ::rust_orm::Value::from(::core::clone::Clone::clone(&record.#field_ident))
            },
            set: |record: &mut #struct_ident, value: ::rust_orm::Value| {
                record.#field_ident =
                    <#field_type as ::core::convert::TryFrom<::rust_orm::Value>>::try_from(value)?;
                ::core::result::Result::Ok(())
            },
        }
    }
}

pub fn new(struct_ident: &Ident, fields: &[FieldDef]) -> TokenStream {
    let table_name = struct_ident.unraw().to_string();
    let count = fields.len();
    let descriptors: Vec<TokenStream> = fields
        .iter()
        .map(|f| descriptor(struct_ident, f))
        .collect();
    quote! {
        impl ::rust_orm::Record for #struct_ident {
            fn table_name() -> &'static str {
                #table_name
            }

            fn fields() -> &'static [::rust_orm::FieldDescriptor<Self>] {
                static FIELDS: [::rust_orm::FieldDescriptor<#struct_ident>; #count] = [
                    #(#descriptors),*
                ];
                &FIELDS
            }
        }
    }
}
