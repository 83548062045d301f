use alloc::string::String;

use autosave_bundle::{BundleError, ValueKind};
use thiserror::Error;

use crate::info::FieldDescriptor;

/// Two participating fields of one type resolve to the same storage key.
///
/// Raised by [`scan`](crate::scan()), the result is not cached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("storage key `{key}` of `{type_name}` is declared by both `{first}` and `{second}`")]
pub struct ConfigurationError {
    pub type_name: &'static str,
    pub key: &'static str,
    /// `Owner::field` of the first declaration.
    pub first: String,
    /// `Owner::field` of the conflicting declaration.
    pub second: String,
}

/// A participating field has no registered codec for its type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{field}` of `{owner}` has unsupported type `{type_name}`")]
pub struct UnsupportedFieldTypeError {
    pub owner: &'static str,
    pub field: &'static str,
    pub key: &'static str,
    pub type_name: &'static str,
}

impl UnsupportedFieldTypeError {
    pub(crate) fn new(field: &FieldDescriptor) -> Self {
        Self {
            owner: field.owner(),
            field: field.name(),
            key: field.key(),
            type_name: field.type_name(),
        }
    }
}

/// A stored value cannot be converted into the type of its field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot restore field `{field}` of `{owner}` (`{type_name}`) from `{found}` under key `{key}`: {source}")]
pub struct TypeMismatchError {
    pub owner: &'static str,
    pub field: &'static str,
    pub key: &'static str,
    pub type_name: &'static str,
    /// The kind of the stored value.
    pub found: ValueKind,
    #[source]
    pub source: BundleError,
}

impl TypeMismatchError {
    pub(crate) fn new(field: &FieldDescriptor, found: ValueKind, source: BundleError) -> Self {
        Self {
            owner: field.owner(),
            field: field.name(),
            key: field.key(),
            type_name: field.type_name(),
            found,
            source,
        }
    }
}

/// Errors of [`register_save`](crate::register_save) and
/// [`register_restore`](crate::register_restore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    UnsupportedFieldType(#[from] UnsupportedFieldTypeError),
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),
    #[error("target object is not a `{expected}`")]
    TargetMismatch { expected: &'static str },
}
