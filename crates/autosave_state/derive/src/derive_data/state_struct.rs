use syn::ext::IdentExt;
use syn::{DeriveInput, Ident, LitStr, Path, Type};

use super::attributes::{FieldAttributes, FieldMode, TypeAttributes};

/// A field that takes part in `declare_fields`.
pub(crate) struct StateField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub mode: FieldMode,
    /// `None` keeps the field name.
    pub key: Option<LitStr>,
    pub ignore_invalid_type: bool,
}

impl StateField<'_> {
    /// Field name as written, without a raw identifier prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

/// A parsed `#[derive(AutoSave)]` input.
pub(crate) struct StateStruct<'a> {
    pub ast: &'a DeriveInput,
    pub state_path: Path,
    /// Saved fields and the parent, in declaration order.
    pub fields: Vec<StateField<'a>>,
}

impl<'a> StateStruct<'a> {
    pub fn new(ast: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
        let named = super::named_fields(ast, "AutoSave")?;
        let all = attrs.all.is_some();

        let mut fields = Vec::new();
        let mut parent_seen = false;
        let mut errors: Option<syn::Error> = None;

        for field in &named.named {
            let Some(ident) = &field.ident else {
                continue;
            };
            let field_attrs = match FieldAttributes::parse_attrs(&field.attrs) {
                Ok(v) => v,
                Err(err) => {
                    combine(&mut errors, err);
                    continue;
                }
            };

            let mode = field_attrs.mode(all);
            if mode == FieldMode::Ignored {
                continue;
            }
            if mode == FieldMode::Parent {
                if parent_seen {
                    combine(
                        &mut errors,
                        syn::Error::new_spanned(field, "only one `#[auto_save(parent)]` field is allowed"),
                    );
                    continue;
                }
                parent_seen = true;
            }

            let ignore_invalid_type = match &field_attrs.ignore_invalid_type {
                Some(lit) => lit.value,
                None => attrs.ignore_invalid_type.is_some(),
            };

            fields.push(StateField {
                ident,
                ty: &field.ty,
                mode,
                key: field_attrs.key,
                ignore_invalid_type,
            });
        }

        if let Some(err) = errors {
            return Err(err);
        }

        Ok(Self {
            ast,
            state_path: crate::path::autosave_state(),
            fields,
        })
    }

    #[inline]
    pub fn parent(&self) -> Option<&StateField<'a>> {
        self.fields.iter().find(|f| f.mode == FieldMode::Parent)
    }

    #[inline]
    pub fn saved(&self) -> impl Iterator<Item = &StateField<'a>> {
        self.fields.iter().filter(|f| f.mode == FieldMode::Saved)
    }
}

fn combine(slot: &mut Option<syn::Error>, err: syn::Error) {
    match slot {
        Some(prev) => prev.combine(err),
        None => *slot = Some(err),
    }
}

