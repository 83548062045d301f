use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Bundle, BundleError, BundleValue, ValueKind, ValueKindError};

// -----------------------------------------------------------------------------
// Parcel

/// An opaque structured transfer object.
///
/// A parcel carries the class tag of the type that wrote it and the fields
/// that type flattened into a [`Bundle`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parcel {
    class: String,
    data: Bundle,
}

impl Parcel {
    #[inline]
    pub fn new(class: impl Into<String>, data: Bundle) -> Self {
        Self {
            class: class.into(),
            data,
        }
    }

    /// The class tag written by [`Parcelable::to_parcel`].
    #[inline]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[inline]
    pub fn data(&self) -> &Bundle {
        &self.data
    }

    #[inline]
    pub fn into_data(self) -> Bundle {
        self.data
    }
}

// -----------------------------------------------------------------------------
// Parcelable

/// A type that can flatten itself into a [`Parcel`].
///
/// Usually derived with `#[derive(Parcelable)]`, which also implements
/// [`StateType`](crate::StateType) and [`ArrayElement`](crate::ArrayElement)
/// for the type.
///
/// # Examples
///
/// ```
/// use autosave_bundle::{Bundle, BundleError, Parcelable};
///
/// #[derive(Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// impl Parcelable for Point {
///     const CLASS: &'static str = "demo::Point";
///
///     fn write_to_parcel(&self, dest: &mut Bundle) {
///         dest.put("x", &self.x);
///         dest.put("y", &self.y);
///     }
///
///     fn create_from_parcel(source: &Bundle) -> Result<Self, BundleError> {
///         Ok(Point { x: source.read_required("x")?, y: source.read_required("y")? })
///     }
/// }
///
/// let parcel = Point { x: 1, y: 2 }.to_parcel();
/// assert_eq!(parcel.class(), "demo::Point");
/// assert_eq!(Point::from_parcel(&parcel).unwrap(), Point { x: 1, y: 2 });
/// ```
pub trait Parcelable: Sized + 'static {
    /// The class tag stored in every parcel this type writes.
    const CLASS: &'static str;

    /// The tag actually written and checked, [`CLASS`](Self::CLASS) unless
    /// overridden.
    ///
    /// `#[derive(Parcelable)]` overrides it for generic types without an
    /// explicit class, so that `Wrapper<i32>` and `Wrapper<String>` write
    /// different tags.
    #[inline]
    fn class_tag() -> &'static str {
        Self::CLASS
    }

    fn write_to_parcel(&self, dest: &mut Bundle);

    fn create_from_parcel(source: &Bundle) -> Result<Self, BundleError>;

    fn to_parcel(&self) -> Parcel {
        let mut data = Bundle::new();
        self.write_to_parcel(&mut data);
        Parcel::new(Self::class_tag(), data)
    }

    /// Rebuilds the value, rejecting parcels written by another class.
    fn from_parcel(parcel: &Parcel) -> Result<Self, BundleError> {
        if parcel.class() != Self::class_tag() {
            return Err(BundleError::ClassMismatch {
                expected: Self::class_tag().into(),
                found: parcel.class().into(),
            });
        }
        Self::create_from_parcel(parcel.data())
    }
}

// -----------------------------------------------------------------------------
// Conversion helpers

/// `StateType::to_value` for a parcelable.
#[inline]
pub fn parcel_to_value<P: Parcelable>(value: &P) -> Option<BundleValue> {
    Some(BundleValue::Parcelable(value.to_parcel()))
}

/// `StateType::from_value` for a parcelable.
pub fn parcel_from_value<P: Parcelable>(value: &BundleValue) -> Result<P, BundleError> {
    match value {
        BundleValue::Parcelable(parcel) => P::from_parcel(parcel),
        other => Err(ValueKindError::new(ValueKind::Parcelable, other).into()),
    }
}

/// `ArrayElement::array_to_value` for a parcelable.
pub fn parcel_array_to_value<P: Parcelable>(items: &[P]) -> BundleValue {
    BundleValue::ParcelableArray(items.iter().map(P::to_parcel).collect())
}

/// `ArrayElement::array_from_value` for a parcelable.
pub fn parcel_array_from_value<P: Parcelable>(value: &BundleValue) -> Result<Vec<P>, BundleError> {
    match value {
        BundleValue::ParcelableArray(parcels) => parcels.iter().map(P::from_parcel).collect(),
        other => Err(ValueKindError::new(ValueKind::ParcelableArray, other).into()),
    }
}
