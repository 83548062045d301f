use core::any::{Any, TypeId, type_name};
use core::fmt;

use autosave_bundle::{BundleError, BundleValue, StateType};

use crate::registry::FromType;

/// Type-erased [`StateType`] conversions of one concrete type.
///
/// # Panics
///
/// [`save`](Self::save) and [`restore`](Self::restore) panic if the value is
/// not of the codec's type. The registry hands out codecs by the value's own
/// `TypeId`, which rules that out.
///
/// # Examples
///
/// ```
/// use autosave_state::registry::StateCodec;
/// use autosave_state::bundle::BundleValue;
///
/// let codec = StateCodec::of::<u16>();
/// assert_eq!(codec.save(&7_u16), Some(BundleValue::Short(7)));
///
/// let mut slot = 0_u16;
/// codec.restore(&BundleValue::Short(9), &mut slot).unwrap();
/// assert_eq!(slot, 9);
/// ```
#[derive(Clone, Copy)]
pub struct StateCodec {
    type_name: &'static str,
    type_id: TypeId,
    save: fn(&dyn Any) -> Option<BundleValue>,
    restore: fn(&BundleValue, &mut dyn Any) -> Result<(), BundleError>,
}

impl<T: StateType> FromType<T> for StateCodec {
    fn from_type() -> Self {
        Self {
            type_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            save: |value| match value.downcast_ref::<T>() {
                Some(value) => value.to_value(),
                None => panic!("StateCodec of `{}` saved a foreign value", type_name::<T>()),
            },
            restore: |value, target| match target.downcast_mut::<T>() {
                Some(target) => {
                    *target = T::from_value(value)?;
                    Ok(())
                }
                None => panic!("StateCodec of `{}` restored a foreign value", type_name::<T>()),
            },
        }
    }
}

impl StateCodec {
    #[inline]
    pub fn of<T: StateType>() -> Self {
        FromType::<T>::from_type()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Converts `value` into its stored form, `None` if nothing is stored.
    #[inline]
    pub fn save(&self, value: &dyn Any) -> Option<BundleValue> {
        (self.save)(value)
    }

    /// Converts `value` and assigns it to `target`.
    ///
    /// `target` is left untouched on error.
    #[inline]
    pub fn restore(&self, value: &BundleValue, target: &mut dyn Any) -> Result<(), BundleError> {
        (self.restore)(value, target)
    }
}

impl fmt::Debug for StateCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCodec")
            .field("type_name", &self.type_name)
            .finish()
    }
}
