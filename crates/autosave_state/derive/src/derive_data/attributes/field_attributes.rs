use proc_macro2::Span;
use syn::parse::ParseStream;
use syn::{Attribute, Ident, LitBool, LitStr, Meta, Token};

use super::reject_duplicate;
use crate::AUTO_SAVE_ATTRIBUTE_NAME;

/// How a field takes part in the generated `declare_fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldMode {
    /// Not saved.
    Ignored,
    /// Saved under its own key.
    Saved,
    /// An embedded ancestor whose fields are flattened in.
    Parent,
}

/// Field level `#[auto_save(...)]` attributes.
///
/// ```ignore
/// #[auto_save]                          // key = field name
/// #[auto_save("custom")]                // key = "custom"
/// #[auto_save(key = "custom")]          // same as above
/// #[auto_save(ignore_invalid_type)]
/// #[auto_save(parent)]
/// #[auto_save(skip)]                    // only meaningful with `#[auto_save(all)]`
/// ```
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// The field carries at least one `auto_save` attribute.
    pub marked: Option<Span>,
    pub key: Option<LitStr>,
    pub ignore_invalid_type: Option<LitBool>,
    pub parent: Option<Span>,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(AUTO_SAVE_ATTRIBUTE_NAME) {
                continue;
            }
            this.marked = Some(attr.path().get_ident().map_or_else(Span::call_site, Ident::span));

            match &attr.meta {
                Meta::Path(_) => {}
                Meta::List(_) => attr.parse_args_with(|input: ParseStream| this.parse_inner(input))?,
                Meta::NameValue(nv) => {
                    return Err(syn::Error::new_spanned(
                        nv,
                        "expected `#[auto_save]` or `#[auto_save(...)]`",
                    ));
                }
            }
        }

        this.validate()?;
        Ok(this)
    }

    fn parse_inner(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            if input.peek(LitStr) {
                let lit: LitStr = input.parse()?;
                self.set_key(lit)?;
            } else {
                let ident: Ident = input.parse()?;
                if ident == "key" || ident == "value" {
                    input.parse::<Token![=]>()?;
                    self.set_key(input.parse()?)?;
                } else if ident == "ignore_invalid_type" {
                    if self.ignore_invalid_type.is_some() {
                        return Err(syn::Error::new(ident.span(), "duplicate attribute `ignore_invalid_type`"));
                    }
                    let lit = if input.peek(Token![=]) {
                        input.parse::<Token![=]>()?;
                        input.parse()?
                    } else {
                        LitBool::new(true, ident.span())
                    };
                    self.ignore_invalid_type = Some(lit);
                } else if ident == "parent" {
                    reject_duplicate(&self.parent, &ident)?;
                    self.parent = Some(ident.span());
                } else if ident == "skip" {
                    reject_duplicate(&self.skip, &ident)?;
                    self.skip = Some(ident.span());
                } else {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unsupported `auto_save` field attribute `{ident}`"),
                    ));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }
        Ok(())
    }

    fn set_key(&mut self, lit: LitStr) -> syn::Result<()> {
        if self.key.is_some() {
            return Err(syn::Error::new(lit.span(), "the key is already given"));
        }
        self.key = Some(lit);
        Ok(())
    }

    fn validate(&self) -> syn::Result<()> {
        if let Some(span) = self.skip
            && (self.key.is_some() || self.ignore_invalid_type.is_some() || self.parent.is_some())
        {
            return Err(syn::Error::new(span, "`skip` cannot be combined with other options"));
        }
        if let Some(span) = self.parent
            && (self.key.is_some() || self.ignore_invalid_type.is_some())
        {
            return Err(syn::Error::new(
                span,
                "`parent` fields take their keys from the embedded type",
            ));
        }
        Ok(())
    }

    /// Resolve the role of the field given the type level `all` switch.
    pub fn mode(&self, all: bool) -> FieldMode {
        if self.skip.is_some() {
            FieldMode::Ignored
        } else if self.parent.is_some() {
            FieldMode::Parent
        } else if self.marked.is_some() || all {
            FieldMode::Saved
        } else {
            FieldMode::Ignored
        }
    }
}
