extern crate proc_macro;
mod field_parser;
mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `rust_orm::Record` for a struct with named fields.
///
/// `#[primary_key]` marks the identity field, `#[column]` marks mapped
/// fields, everything else is left out of the mapping.
#[proc_macro_derive(Record, attributes(primary_key, column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match field_parser::get_field_defs(&ast) {
        Ok(fields) => record::new(&ast.ident, &fields).into(),
        Err(e) => e.to_compile_error().into(),
    }
}
