use syn::ext::IdentExt;
use syn::{DeriveInput, Ident, LitStr, Path, Type};

use super::attributes::{ParcelFieldAttributes, ParcelTypeAttributes};

pub(crate) struct ParcelField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub rename: Option<LitStr>,
    pub skip: bool,
}

impl ParcelField<'_> {
    /// The key the field is written under.
    pub fn key(&self) -> String {
        match &self.rename {
            Some(lit) => lit.value(),
            None => self.ident.unraw().to_string(),
        }
    }
}

/// A parsed `#[derive(Parcelable)]` input.
pub(crate) struct ParcelStruct<'a> {
    pub ast: &'a DeriveInput,
    pub state_path: Path,
    pub attrs: ParcelTypeAttributes,
    pub fields: Vec<ParcelField<'a>>,
}

impl<'a> ParcelStruct<'a> {
    pub fn new(ast: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = ParcelTypeAttributes::parse_attrs(&ast.attrs)?;
        let named = super::named_fields(ast, "Parcelable")?;

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let Some(ident) = &field.ident else {
                continue;
            };
            let field_attrs = ParcelFieldAttributes::parse_attrs(&field.attrs)?;
            fields.push(ParcelField {
                ident,
                ty: &field.ty,
                rename: field_attrs.rename,
                skip: field_attrs.skip.is_some(),
            });
        }

        let mut seen: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields.iter().filter(|f| !f.skip) {
            let key = field.key();
            if seen.contains(&key) {
                return Err(syn::Error::new_spanned(
                    field.ident,
                    format!("parcel key `{key}` is used twice"),
                ));
            }
            seen.push(key);
        }

        Ok(Self {
            ast,
            state_path: crate::path::autosave_state(),
            attrs,
            fields,
        })
    }

    /// Generic types tag parcels with their full type name and are never
    /// auto-registered.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        super::has_type_params(self.ast)
    }
}
