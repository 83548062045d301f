//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod parcel_struct;
mod state_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use parcel_struct::ParcelStruct;
pub(crate) use state_struct::StateStruct;

use syn::{Data, DeriveInput, Fields, FieldsNamed};

/// Both derives only accept structs with named fields.
fn named_fields<'a>(ast: &'a DeriveInput, derive: &str) -> syn::Result<&'a FieldsNamed> {
    match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            Fields::Unnamed(_) | Fields::Unit => Err(syn::Error::new_spanned(
                &ast.ident,
                format!("`{derive}` can only be derived for structs with named fields"),
            )),
        },
        Data::Enum(data) => Err(syn::Error::new(
            data.enum_token.span,
            format!("`{derive}` cannot be derived for enums"),
        )),
        Data::Union(data) => Err(syn::Error::new(
            data.union_token.span,
            format!("`{derive}` cannot be derived for unions"),
        )),
    }
}

/// `true` if the type has type parameters, which rules out static registration.
fn has_type_params(ast: &DeriveInput) -> bool {
    ast.generics.type_params().next().is_some()
}
