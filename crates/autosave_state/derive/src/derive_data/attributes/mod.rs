//! Provide some tools for parsing attributes.
//!
//! `#[auto_save(...)]` is read by `derive(AutoSave)`,
//! `#[parcel(...)]` is read by `derive(Parcelable)`.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod parcel_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{FieldAttributes, FieldMode};
pub(crate) use parcel_attributes::{ParcelFieldAttributes, ParcelTypeAttributes};
pub(crate) use type_attributes::TypeAttributes;

/// Fail on a flag that was already set.
pub(super) fn reject_duplicate(slot: &Option<proc_macro2::Span>, ident: &syn::Ident) -> syn::Result<()> {
    match slot {
        Some(_) => Err(syn::Error::new(
            ident.span(),
            format!("duplicate attribute `{ident}`"),
        )),
        None => Ok(()),
    }
}
