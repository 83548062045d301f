use proc_macro2::Span;
use syn::{Attribute, LitStr};

use super::reject_duplicate;
use crate::PARCEL_ATTRIBUTE_NAME;

/// Type level `#[parcel(...)]` attributes.
///
/// ```ignore
/// #[derive(Parcelable)]
/// #[parcel(class = "app.Point", auto_register)]
/// struct Point { /* ... */ }
/// ```
#[derive(Default, Debug)]
pub(crate) struct ParcelTypeAttributes {
    /// Class tag, defaults to the module path of the type.
    pub class: Option<LitStr>,
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    pub auto_register: Option<Span>,
}

impl ParcelTypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(PARCEL_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let Some(ident) = meta.path.get_ident() else {
                    return Err(meta.error("unsupported `parcel` type attribute"));
                };

                if ident == "class" {
                    if this.class.is_some() {
                        return Err(meta.error("duplicate attribute `class`"));
                    }
                    this.class = Some(meta.value()?.parse()?);
                    Ok(())
                } else if ident == "auto_register" {
                    reject_duplicate(&this.auto_register, ident)?;
                    this.auto_register = Some(ident.span());
                    Ok(())
                } else {
                    Err(meta.error(format!("unsupported `parcel` type attribute `{ident}`")))
                }
            })?;
        }

        Ok(this)
    }
}

/// Field level `#[parcel(...)]` attributes.
///
/// `skip` fields are filled with `Default::default()` when read back.
#[derive(Default, Debug)]
pub(crate) struct ParcelFieldAttributes {
    pub rename: Option<LitStr>,
    pub skip: Option<Span>,
}

impl ParcelFieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(PARCEL_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let Some(ident) = meta.path.get_ident() else {
                    return Err(meta.error("unsupported `parcel` field attribute"));
                };

                if ident == "rename" {
                    if this.rename.is_some() {
                        return Err(meta.error("duplicate attribute `rename`"));
                    }
                    this.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if ident == "skip" {
                    reject_duplicate(&this.skip, ident)?;
                    this.skip = Some(ident.span());
                    Ok(())
                } else {
                    Err(meta.error(format!("unsupported `parcel` field attribute `{ident}`")))
                }
            })?;
        }

        if let (Some(span), Some(_)) = (this.skip, &this.rename) {
            return Err(syn::Error::new(span, "`skip` cannot be combined with `rename`"));
        }

        Ok(this)
    }
}
