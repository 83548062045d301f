use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::{BundleValue, ValueKind};

/// A stored value has a different [`ValueKind`] than the one requested.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected a `{expected}` value, found `{found}`")]
pub struct ValueKindError {
    pub expected: ValueKind,
    pub found: ValueKind,
}

impl ValueKindError {
    #[inline]
    pub(crate) fn new(expected: ValueKind, found: &BundleValue) -> Self {
        Self {
            expected,
            found: found.kind(),
        }
    }
}

/// An error produced while converting a [`BundleValue`] back into a Rust value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    #[error(transparent)]
    Kind(#[from] ValueKindError),
    #[error("expected a parcel of class `{expected}`, found `{found}`")]
    ClassMismatch { expected: String, found: String },
    #[error("parcel has no entry for required key `{0}`")]
    MissingKey(String),
    #[error("value {value} does not fit in `{target}`")]
    OutOfRange { value: i64, target: &'static str },
    #[error("expected an array of {expected} element(s), found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("cannot decode serialized value: {0}")]
    Deserialize(String),
    #[error("invalid entry `{key}`: {source}")]
    Entry {
        key: String,
        #[source]
        source: Box<BundleError>,
    },
}

impl BundleError {
    /// The kind mismatch at the bottom of this error, if any.
    pub fn kind_error(&self) -> Option<&ValueKindError> {
        match self {
            Self::Kind(err) => Some(err),
            Self::Entry { source, .. } => source.kind_error(),
            _ => None,
        }
    }
}
