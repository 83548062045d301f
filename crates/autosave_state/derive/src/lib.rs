//! See following macros:
//!
//! - [`AutoSave`](derive_auto_save)
//! - [`Parcelable`](derive_parcelable)
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static AUTO_SAVE_ATTRIBUTE_NAME: &str = "auto_save";
static PARCEL_ATTRIBUTE_NAME: &str = "parcel";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Derive `AutoSave`
///
/// Implements `AutoSave` for a struct with named fields. Only fields marked
/// with `#[auto_save]` take part; they are declared in source order.
///
/// ## Field Markers
///
/// ```rust, ignore
/// #[derive(AutoSave)]
/// struct Editor {
///     #[auto_save]                       // key "cursor"
///     cursor: i32,
///     #[auto_save("draft_text")]         // explicit key
///     draft: String,
///     #[auto_save(key = "mode")]         // same, named form
///     mode_index: i64,
///     #[auto_save(ignore_invalid_type)]  // unsupported or mismatched values are skipped
///     zoom: f32,
///     handle: Handle,                    // not saved
/// }
/// ```
///
/// An empty key (`#[auto_save("")]`) keeps the field name.
/// `ignore_invalid_type` also accepts `ignore_invalid_type = false`.
///
/// A field whose type implements `StateType` carries that codec, so derived
/// parcelables, fixed-size arrays and `Serialized<T>` need no registration.
/// Other field types are looked up in the codec registry when saving.
///
/// Keys are not checked here. Two fields sharing a key are reported by
/// `scan` as a `ConfigurationError`, since inherited keys are only known then.
///
/// ## Embedded Ancestors
///
/// At most one field may be marked `#[auto_save(parent)]`. Its type must
/// implement `AutoSave` itself, and its fields are declared before the
/// fields of this type, as if inherited.
///
/// ```rust, ignore
/// #[derive(AutoSave)]
/// struct Detail {
///     #[auto_save(parent)]
///     page: Page,
///     #[auto_save]
///     item: i64,
/// }
/// ```
///
/// ## Type Attributes
///
/// - `#[auto_save(all)]`: every named field is saved unless marked `#[auto_save(skip)]`.
/// - `#[auto_save(ignore_invalid_type)]`: the default for fields without their own flag.
///
/// ## Generics
///
/// Type parameters get a `'static` bound, and field types mentioning them
/// are bounded by `Any`.
#[proc_macro_derive(AutoSave, attributes(auto_save))]
pub fn derive_auto_save(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let data = match derive_data::StateStruct::new(&ast) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let auto_save_impl = impls::impl_auto_save(&data);

    TokenStream::from(quote! {
        const _: () = {
            #auto_save_impl
        };
    })
}

/// # Derive `Parcelable`
///
/// Implements `Parcelable`, `StateType` and `ArrayElement` for a struct with
/// named fields, so the type can be saved as a field value, inside a `Vec`,
/// or inside a sparse `BTreeMap<i32, _>`.
///
/// Every field is written under its name; all field types must implement
/// `StateType`.
///
/// ```rust, ignore
/// #[derive(Parcelable)]
/// #[parcel(class = "app.Point", auto_register)]
/// struct Point {
///     x: i32,
///     #[parcel(rename = "y_pos")]
///     y: i32,
///     #[parcel(skip)]   // restored with `Default::default()`
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Type Attributes
///
/// - `class = "..."`: the class tag checked on read, defaults to `module_path!()::Name`.
///   Generic types without an explicit class tag each instantiation with its
///   full type name instead, so `Wrapper<i32>` and `Wrapper<String>` do not
///   read each other's parcels. An explicit class is shared by all of them.
/// - `auto_register`: registers the codecs of `Point`, `Vec<Point>` and
///   `BTreeMap<i32, Point>` (each with its `Option`) into the global registry.
///   Ignored for generic types and without the `auto_register` feature.
#[proc_macro_derive(Parcelable, attributes(parcel))]
pub fn derive_parcelable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let data = match derive_data::ParcelStruct::new(&ast) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let parcelable_impl = impls::impl_parcelable(&data);
    let auto_register_impl = impls::get_auto_register_impl(&data);

    TokenStream::from(quote! {
        const _: () = {
            #parcelable_impl
            #auto_register_impl
        };
    })
}

/// Registers the codecs of a `StateType` (and its `Option`) into the global
/// registry when it is first created.
///
/// Does nothing if the `auto_register` feature is disabled.
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(foo::Meters);
/// impl_auto_register!(Vec<u32>);      // Ok, but already built in
/// impl_auto_register!(Vec<T>);        // Error
/// ```
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        let type_path = syn::parse_macro_input!(_input as syn::Type);

        let state_path = path::autosave_state();
        let auto_register_ = path::auto_register_(&state_path);

        TokenStream::from(quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#type_path as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
