//! Paths of the items generated code refers to.
//!
//! Kept in one place so a move inside `autosave_state` only touches this file.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `autosave_state` crate.
///
/// 1. For crates that depend on `autosave_state`, `::autosave_state` is returned.
/// 2. For crates that depend on `autosave`, `::autosave::state` is returned.
/// 3. Otherwise `::autosave_state` is returned, which may be incorrect.
///
/// Reading the caller's manifest is relatively expensive, so the path is
/// resolved once per macro invocation and passed around.
pub(crate) fn autosave_state() -> syn::Path {
    autosave_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("autosave_state"))
}

// -----------------------------------------------------------------------------
// Items

#[inline]
pub(crate) fn auto_save_(state_path: &syn::Path) -> TokenStream {
    quote! {
        #state_path::AutoSave
    }
}

#[inline]
pub(crate) fn info_(state_path: &syn::Path) -> TokenStream {
    quote! {
        #state_path::info
    }
}

#[inline]
pub(crate) fn bundle_(state_path: &syn::Path) -> TokenStream {
    quote! {
        #state_path::bundle
    }
}

#[inline]
pub(crate) fn macro_exports_(state_path: &syn::Path) -> TokenStream {
    quote! {
        #state_path::__macro_exports
    }
}

#[inline]
pub(crate) fn vec_(state_path: &syn::Path) -> TokenStream {
    quote! {
        #state_path::__macro_exports::Vec
    }
}

#[cfg(feature = "auto_register")]
#[inline]
pub(crate) fn auto_register_(state_path: &syn::Path) -> TokenStream {
    quote! {
        #state_path::__macro_exports::auto_register
    }
}
