use proc_macro2::Span;
use syn::{Attribute, Meta};

use super::reject_duplicate;
use crate::AUTO_SAVE_ATTRIBUTE_NAME;

/// Type level `#[auto_save(...)]` attributes.
///
/// ```ignore
/// #[derive(AutoSave)]
/// #[auto_save(all, ignore_invalid_type)]
/// struct Foo { /* ... */ }
/// ```
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// Every named field is saved unless marked `#[auto_save(skip)]`.
    pub all: Option<Span>,
    /// Default of `ignore_invalid_type` for fields without their own marker.
    pub ignore_invalid_type: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(AUTO_SAVE_ATTRIBUTE_NAME) {
                continue;
            }
            if let Meta::Path(path) = &attr.meta {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected `#[auto_save(all)]` or `#[auto_save(ignore_invalid_type)]` on a type",
                ));
            }

            attr.parse_nested_meta(|meta| {
                let Some(ident) = meta.path.get_ident() else {
                    return Err(meta.error("unsupported `auto_save` type attribute"));
                };

                if ident == "all" {
                    reject_duplicate(&this.all, ident)?;
                    this.all = Some(ident.span());
                    Ok(())
                } else if ident == "ignore_invalid_type" {
                    reject_duplicate(&this.ignore_invalid_type, ident)?;
                    this.ignore_invalid_type = Some(ident.span());
                    Ok(())
                } else {
                    Err(meta.error(format!("unsupported `auto_save` type attribute `{ident}`")))
                }
            })?;
        }

        Ok(this)
    }
}
