use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Bundle, Parcel, Size, SizeF};

// -----------------------------------------------------------------------------
// BundleValue

/// A single value stored in a [`Bundle`].
///
/// The variants mirror what a platform state container can hold natively.
/// Rust types without a native kind of their own are mapped onto one by
/// [`StateType`](crate::StateType), e.g. `u32` is stored as [`Int`](Self::Int).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BundleValue {
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Size(Size),
    SizeF(SizeF),
    Bundle(Bundle),
    BoolArray(Vec<bool>),
    ByteArray(Vec<u8>),
    ShortArray(Vec<i16>),
    CharArray(Vec<char>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
    Parcelable(Parcel),
    ParcelableArray(Vec<Parcel>),
    SparseParcelableArray(BTreeMap<i32, Parcel>),
    /// A serde value of a type without a native kind, as JSON text.
    Serialized(String),
}

impl BundleValue {
    /// Returns the [`ValueKind`] of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Byte(_) => ValueKind::Byte,
            Self::Char(_) => ValueKind::Char,
            Self::Short(_) => ValueKind::Short,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::String(_) => ValueKind::String,
            Self::Size(_) => ValueKind::Size,
            Self::SizeF(_) => ValueKind::SizeF,
            Self::Bundle(_) => ValueKind::Bundle,
            Self::BoolArray(_) => ValueKind::BoolArray,
            Self::ByteArray(_) => ValueKind::ByteArray,
            Self::ShortArray(_) => ValueKind::ShortArray,
            Self::CharArray(_) => ValueKind::CharArray,
            Self::IntArray(_) => ValueKind::IntArray,
            Self::LongArray(_) => ValueKind::LongArray,
            Self::FloatArray(_) => ValueKind::FloatArray,
            Self::DoubleArray(_) => ValueKind::DoubleArray,
            Self::StringArray(_) => ValueKind::StringArray,
            Self::Parcelable(_) => ValueKind::Parcelable,
            Self::ParcelableArray(_) => ValueKind::ParcelableArray,
            Self::SparseParcelableArray(_) => ValueKind::SparseParcelableArray,
            Self::Serialized(_) => ValueKind::Serialized,
        }
    }
}

// -----------------------------------------------------------------------------
// ValueKind

/// The discriminant of a [`BundleValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Size,
    SizeF,
    Bundle,
    BoolArray,
    ByteArray,
    ShortArray,
    CharArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    StringArray,
    Parcelable,
    ParcelableArray,
    SparseParcelableArray,
    Serialized,
}

impl ValueKind {
    /// Returns `true` for the array kinds, sparse parcel arrays included.
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            Self::BoolArray
                | Self::ByteArray
                | Self::ShortArray
                | Self::CharArray
                | Self::IntArray
                | Self::LongArray
                | Self::FloatArray
                | Self::DoubleArray
                | Self::StringArray
                | Self::ParcelableArray
                | Self::SparseParcelableArray
        )
    }

    /// The lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Size => "size",
            Self::SizeF => "size_f",
            Self::Bundle => "bundle",
            Self::BoolArray => "bool[]",
            Self::ByteArray => "byte[]",
            Self::ShortArray => "short[]",
            Self::CharArray => "char[]",
            Self::IntArray => "int[]",
            Self::LongArray => "long[]",
            Self::FloatArray => "float[]",
            Self::DoubleArray => "double[]",
            Self::StringArray => "string[]",
            Self::Parcelable => "parcelable",
            Self::ParcelableArray => "parcelable[]",
            Self::SparseParcelableArray => "sparse_parcelable[]",
            Self::Serialized => "serialized",
        }
    }
}

impl fmt::Display for ValueKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{BundleValue, ValueKind};
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(BundleValue::Int(1).kind(), ValueKind::Int);
        assert_eq!(BundleValue::IntArray(vec![1]).kind(), ValueKind::IntArray);
        assert!(ValueKind::IntArray.is_array());
        assert!(!ValueKind::Parcelable.is_array());
    }

    #[test]
    fn display_names() {
        assert_eq!(ValueKind::StringArray.to_string(), "string[]");
        assert_eq!(ValueKind::Long.to_string(), "long");
    }
}
