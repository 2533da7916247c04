use proc_macro2::Ident;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDef {
    PrimaryKey,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTypeDef {
    Int64,
    Int32,
    Text,
    Real,
    Boolean,
    Blob,
}

impl FieldTypeDef {
    pub fn variant(&self) -> &'static str {
        match self {
            FieldTypeDef::Int64 => "Int64",
            FieldTypeDef::Int32 => "Int32",
            FieldTypeDef::Text => "Text",
            FieldTypeDef::Real => "Real",
            FieldTypeDef::Boolean => "Boolean",
            FieldTypeDef::Blob => "Blob",
        }
    }
}

#[derive(Clone)]
pub struct FieldDef {
    pub name: Ident,
    pub tpe: Type,
    pub field_type: FieldTypeDef,
    pub role: RoleDef,
}

fn is_vec_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(tp) if {
        tp.path.segments.last().is_some_and(|seg| {
            seg.ident == "Vec" && matches!(&seg.arguments, PathArguments::AngleBracketed(args) if {
                args.args.iter().any(|arg| matches!(arg,
                    GenericArgument::Type(Type::Path(p)) if p.path.is_ident("u8")))
            })
        })
    })
}

fn field_type_of(ty: &Type) -> Option<FieldTypeDef> {
    if is_vec_u8(ty) {
        return Some(FieldTypeDef::Blob);
    }
    let Type::Path(tp) = ty else { return None };
    let segment = tp.path.segments.last()?;
    if !segment.arguments.is_empty() {
        return None;
    }
    match segment.ident.to_string().as_str() {
        "i64" => Some(FieldTypeDef::Int64),
        "i32" => Some(FieldTypeDef::Int32),
        "String" => Some(FieldTypeDef::Text),
        "f64" => Some(FieldTypeDef::Real),
        "bool" => Some(FieldTypeDef::Boolean),
        _ => None,
    }
}

fn parse_role(field: &syn::Field) -> Result<Option<RoleDef>, syn::Error> {
    let mut role = None;
    for attr in &field.attrs {
        let found = if attr.path().is_ident("primary_key") {
            RoleDef::PrimaryKey
        } else if attr.path().is_ident("column") {
            RoleDef::Column
        } else {
            continue;
        };
        attr.meta.require_path_only()?;
        if role.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "Field may carry only one of #[primary_key] / #[column]",
            ));
        }
        role = Some(found);
    }
    Ok(role)
}

/// Tagged fields of the struct in declaration order; untagged fields are skipped.
pub fn get_field_defs(ast: &DeriveInput) -> Result<Vec<FieldDef>, syn::Error> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new(
            ast.generics.span(),
            "`#[derive(Record)]` does not support generic structs",
        ));
    }
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    ast.span(),
                    "`#[derive(Record)]` only supports structs with named fields.",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                ast.span(),
                "`#[derive(Record)]` only supports structs.",
            ))
        }
    };

    let mut defs = Vec::new();
    let mut pk_seen = false;
    for field in fields.iter() {
        let Some(role) = parse_role(field)? else { continue };
        let name = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "Unnamed fields not supported"))?;
        if role == RoleDef::PrimaryKey {
            if pk_seen {
                return Err(syn::Error::new(
                    field.span(),
                    "Multiple `#[primary_key]` fields found; only one is allowed",
                ));
            }
            pk_seen = true;
        }
        let field_type = field_type_of(&field.ty).ok_or_else(|| {
            syn::Error::new(
                field.ty.span(),
                format!(
                    "Field `{}` must be one of i64, i32, String, f64, bool, Vec<u8> to be mapped",
                    name.unraw()
                ),
            )
        })?;
        defs.push(FieldDef {
            name,
            tpe: field.ty.clone(),
            field_type,
            role,
        });
    }
    Ok(defs)
}
