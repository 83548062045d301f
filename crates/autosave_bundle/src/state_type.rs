use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Bundle, BundleError, BundleValue, Parcel, Parcelable, Size, SizeF};
use crate::{ValueKind, ValueKindError};

// -----------------------------------------------------------------------------
// StateType

/// A Rust type with a stored form in a [`Bundle`].
///
/// | Rust type | stored as |
/// |---|---|
/// | `bool`, `char`, `f32`, `f64`, `String` | the matching scalar kind |
/// | `i8`/`u8`, `i16`/`u16`, `i32`/`u32` | `byte`, `short`, `int` |
/// | `i64`/`u64`/`isize`/`usize` | `long` |
/// | `Size`, `SizeF`, `Bundle`, `Parcel` | their own kind |
/// | `Vec<E: ArrayElement>`, `[E; N]` | the array kind of `E` |
/// | `BTreeMap<i32, P: Parcelable>` | sparse parcel array |
/// | `Option<T>` | the kind of `T`, `None` writes nothing |
///
/// Unsigned integers keep their bit pattern in the signed kind of the same
/// width, so they round-trip exactly.
pub trait StateType: Sized + 'static {
    /// Converts `self` into a stored value, `None` means nothing is written.
    fn to_value(&self) -> Option<BundleValue>;

    fn from_value(value: &BundleValue) -> Result<Self, BundleError>;

    /// The value to use when a required entry is absent.
    #[inline]
    fn from_missing() -> Option<Self> {
        None
    }
}

/// An element type with a native array kind.
pub trait ArrayElement: Sized + 'static {
    fn array_to_value(items: &[Self]) -> BundleValue;

    fn array_from_value(value: &BundleValue) -> Result<Vec<Self>, BundleError>;
}

#[inline]
fn mismatch(expected: ValueKind, found: &BundleValue) -> BundleError {
    ValueKindError::new(expected, found).into()
}

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_copy_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl StateType for $ty {
            #[inline]
            fn to_value(&self) -> Option<BundleValue> {
                Some(BundleValue::$variant(*self))
            }

            fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
                match value {
                    BundleValue::$variant(v) => Ok(*v),
                    other => Err(mismatch(ValueKind::$variant, other)),
                }
            }
        }
    )*};
}

macro_rules! impl_clone_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl StateType for $ty {
            #[inline]
            fn to_value(&self) -> Option<BundleValue> {
                Some(BundleValue::$variant(self.clone()))
            }

            fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
                match value {
                    BundleValue::$variant(v) => Ok(v.clone()),
                    other => Err(mismatch(ValueKind::$variant, other)),
                }
            }
        }
    )*};
}

// Same-width reinterpretation, lossless in both directions.
macro_rules! impl_bitcast_scalar {
    ($($ty:ty => $variant:ident($native:ty)),* $(,)?) => {$(
        impl StateType for $ty {
            #[inline]
            fn to_value(&self) -> Option<BundleValue> {
                Some(BundleValue::$variant(*self as $native))
            }

            fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
                match value {
                    BundleValue::$variant(v) => Ok(*v as $ty),
                    other => Err(mismatch(ValueKind::$variant, other)),
                }
            }
        }
    )*};
}

impl_copy_scalar!(
    bool => Bool,
    i8 => Byte,
    char => Char,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Size => Size,
    SizeF => SizeF,
);

impl_clone_scalar!(
    String => String,
    Bundle => Bundle,
    Parcel => Parcelable,
);

impl_bitcast_scalar!(
    u8 => Byte(i8),
    u16 => Short(i16),
    u32 => Int(i32),
    u64 => Long(i64),
);

impl StateType for usize {
    #[inline]
    fn to_value(&self) -> Option<BundleValue> {
        Some(BundleValue::Long(*self as u64 as i64))
    }

    fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
        match value {
            BundleValue::Long(v) => usize::try_from(*v as u64).map_err(|_| BundleError::OutOfRange {
                value: *v,
                target: "usize",
            }),
            other => Err(mismatch(ValueKind::Long, other)),
        }
    }
}

impl StateType for isize {
    #[inline]
    fn to_value(&self) -> Option<BundleValue> {
        Some(BundleValue::Long(*self as i64))
    }

    fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
        match value {
            BundleValue::Long(v) => isize::try_from(*v).map_err(|_| BundleError::OutOfRange {
                value: *v,
                target: "isize",
            }),
            other => Err(mismatch(ValueKind::Long, other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Arrays

macro_rules! impl_array_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl ArrayElement for $ty {
            #[inline]
            fn array_to_value(items: &[Self]) -> BundleValue {
                BundleValue::$variant(items.to_vec())
            }

            fn array_from_value(value: &BundleValue) -> Result<Vec<Self>, BundleError> {
                match value {
                    BundleValue::$variant(v) => Ok(v.clone()),
                    other => Err(mismatch(ValueKind::$variant, other)),
                }
            }
        }
    )*};
}

impl_array_element!(
    bool => BoolArray,
    u8 => ByteArray,
    i16 => ShortArray,
    char => CharArray,
    i32 => IntArray,
    i64 => LongArray,
    f32 => FloatArray,
    f64 => DoubleArray,
    String => StringArray,
);

// Same-width reinterpretation of every element, as for the scalars.
macro_rules! impl_bitcast_array_element {
    ($($ty:ty => $variant:ident($native:ty)),* $(,)?) => {$(
        impl ArrayElement for $ty {
            fn array_to_value(items: &[Self]) -> BundleValue {
                BundleValue::$variant(items.iter().map(|v| *v as $native).collect())
            }

            fn array_from_value(value: &BundleValue) -> Result<Vec<Self>, BundleError> {
                match value {
                    BundleValue::$variant(v) => Ok(v.iter().map(|v| *v as $ty).collect()),
                    other => Err(mismatch(ValueKind::$variant, other)),
                }
            }
        }
    )*};
}

impl_bitcast_array_element!(
    i8 => ByteArray(u8),
    u16 => ShortArray(i16),
    u32 => IntArray(i32),
    u64 => LongArray(i64),
);

impl ArrayElement for Parcel {
    #[inline]
    fn array_to_value(items: &[Self]) -> BundleValue {
        BundleValue::ParcelableArray(items.to_vec())
    }

    fn array_from_value(value: &BundleValue) -> Result<Vec<Self>, BundleError> {
        match value {
            BundleValue::ParcelableArray(v) => Ok(v.clone()),
            other => Err(mismatch(ValueKind::ParcelableArray, other)),
        }
    }
}

impl<T: ArrayElement> StateType for Vec<T> {
    #[inline]
    fn to_value(&self) -> Option<BundleValue> {
        Some(T::array_to_value(self))
    }

    #[inline]
    fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
        T::array_from_value(value)
    }
}

/// Fixed-size arrays are stored like a `Vec`; restoring checks the length.
impl<T: ArrayElement, const N: usize> StateType for [T; N] {
    #[inline]
    fn to_value(&self) -> Option<BundleValue> {
        Some(T::array_to_value(self))
    }

    fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
        let items = T::array_from_value(value)?;
        <[T; N]>::try_from(items).map_err(|items| BundleError::LengthMismatch {
            expected: N,
            found: items.len(),
        })
    }
}

impl<P: Parcelable> StateType for BTreeMap<i32, P> {
    fn to_value(&self) -> Option<BundleValue> {
        let parcels = self.iter().map(|(k, v)| (*k, v.to_parcel())).collect();
        Some(BundleValue::SparseParcelableArray(parcels))
    }

    fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
        match value {
            BundleValue::SparseParcelableArray(parcels) => parcels
                .iter()
                .map(|(k, parcel)| P::from_parcel(parcel).map(|v| (*k, v)))
                .collect(),
            other => Err(mismatch(ValueKind::SparseParcelableArray, other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Option

impl<T: StateType> StateType for Option<T> {
    #[inline]
    fn to_value(&self) -> Option<BundleValue> {
        self.as_ref().and_then(T::to_value)
    }

    #[inline]
    fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
        T::from_value(value).map(Some)
    }

    #[inline]
    fn from_missing() -> Option<Self> {
        Some(None)
    }
}

#[cfg(test)]
mod tests {
    use super::StateType;
    use crate::{Bundle, BundleError, BundleValue, Parcelable, Size, ValueKind};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug, PartialEq)]
    struct Tag {
        name: String,
    }

    impl Parcelable for Tag {
        const CLASS: &'static str = "tests::Tag";

        fn write_to_parcel(&self, dest: &mut Bundle) {
            dest.put("name", &self.name);
        }

        fn create_from_parcel(source: &Bundle) -> Result<Self, BundleError> {
            Ok(Tag {
                name: source.read_required("name")?,
            })
        }
    }

    #[test]
    fn unsigned_keeps_bit_pattern() {
        let value = u32::MAX.to_value().unwrap();
        assert_eq!(value, BundleValue::Int(-1));
        assert_eq!(u32::from_value(&value), Ok(u32::MAX));
        assert_eq!(u8::from_value(&BundleValue::Byte(-1)), Ok(255));
    }

    #[test]
    fn signed_and_unsigned_share_kind() {
        assert_eq!(i16::from_value(&7_u16.to_value().unwrap()), Ok(7));
        assert_eq!(usize::from_value(&BundleValue::Long(42)), Ok(42));
    }

    #[test]
    fn scalar_rejects_other_kind() {
        let err = i32::from_value(&BundleValue::Long(1)).unwrap_err();
        assert_eq!(err.kind_error().unwrap().expected, ValueKind::Int);
        assert_eq!(err.kind_error().unwrap().found, ValueKind::Long);
    }

    #[test]
    fn arrays_use_native_kind() {
        assert_eq!(
            vec![1_i32, 2, 3].to_value(),
            Some(BundleValue::IntArray(vec![1, 2, 3]))
        );
        assert_eq!(
            Vec::<u8>::from_value(&BundleValue::ByteArray(vec![9])),
            Ok(vec![9])
        );
        assert!(Vec::<i64>::from_value(&BundleValue::IntArray(vec![])).is_err());
    }

    #[test]
    fn narrow_and_unsigned_arrays_bitcast() {
        assert_eq!(
            vec![-1_i8, 2].to_value(),
            Some(BundleValue::ByteArray(vec![255, 2]))
        );
        assert_eq!(
            vec![u32::MAX, 1].to_value(),
            Some(BundleValue::IntArray(vec![-1, 1]))
        );
        assert_eq!(
            Vec::<u64>::from_value(&BundleValue::LongArray(vec![-1])),
            Ok(vec![u64::MAX])
        );
        assert_eq!(
            Vec::<u16>::from_value(&BundleValue::ShortArray(vec![-2])),
            Ok(vec![u16::MAX - 1])
        );
        assert_eq!(
            Vec::<i8>::from_value(&BundleValue::ByteArray(vec![128])),
            Ok(vec![i8::MIN])
        );
    }

    #[test]
    fn fixed_arrays_check_length() {
        let value = [1_i32, 2, 3].to_value().unwrap();
        assert_eq!(value, BundleValue::IntArray(vec![1, 2, 3]));
        assert_eq!(<[i32; 3]>::from_value(&value), Ok([1, 2, 3]));

        assert_eq!(
            <[i32; 2]>::from_value(&value),
            Err(BundleError::LengthMismatch {
                expected: 2,
                found: 3
            })
        );
        assert!(<[i32; 3]>::from_value(&BundleValue::LongArray(vec![1, 2, 3])).is_err());
    }

    #[test]
    fn pointer_sized_range_is_checked() {
        let value = BundleValue::Long(i64::MIN);
        if isize::BITS < 64 {
            assert!(matches!(
                isize::from_value(&value),
                Err(BundleError::OutOfRange { target: "isize", .. })
            ));
        } else {
            assert_eq!(isize::from_value(&value), Ok(isize::MIN));
        }

        let value = BundleValue::Long(-1);
        if usize::BITS < 64 {
            assert!(matches!(
                usize::from_value(&value),
                Err(BundleError::OutOfRange { target: "usize", .. })
            ));
        } else {
            assert_eq!(usize::from_value(&value), Ok(usize::MAX));
        }
    }

    #[test]
    fn option_none_has_no_value() {
        assert_eq!(Option::<Size>::None.to_value(), None);
        assert_eq!(
            Option::<Size>::from_value(&BundleValue::Size(Size::new(1, 2))),
            Ok(Some(Size::new(1, 2)))
        );
    }

    #[test]
    fn parcel_class_is_checked() {
        let mut other = Bundle::new();
        other.put("name", &String::from("x"));
        let parcel = crate::Parcel::new("tests::Other", other);

        let err = Tag::from_parcel(&parcel).unwrap_err();
        assert!(matches!(err, BundleError::ClassMismatch { .. }));
    }

    #[test]
    fn sparse_parcel_array() {
        let mut map = BTreeMap::new();
        map.insert(3, Tag { name: "three".into() });
        map.insert(-1, Tag { name: "minus".into() });

        let value = map.to_value().unwrap();
        assert_eq!(value.kind(), ValueKind::SparseParcelableArray);
        assert_eq!(BTreeMap::<i32, Tag>::from_value(&value), Ok(map));
    }
}
