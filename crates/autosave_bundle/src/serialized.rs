use alloc::string::ToString;
use core::fmt;
use core::ops::{Deref, DerefMut};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{BundleError, BundleValue, StateType, ValueKind, ValueKindError};

// -----------------------------------------------------------------------------
// Serialized

/// Stores any serde type as a [`BundleValue::Serialized`] entry.
///
/// This is the fallback for structured values that are neither a native
/// kind nor [`Parcelable`](crate::Parcelable). The value is kept as JSON
/// text, so it survives every format a [`Bundle`](crate::Bundle) is
/// persisted with.
///
/// A value that fails to serialize writes nothing and logs a warning.
///
/// # Examples
///
/// ```
/// use autosave_bundle::{Bundle, Serialized};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Filter { query: String, page: u32 }
///
/// let mut bundle = Bundle::new();
/// bundle.put("filter", &Serialized(Filter { query: "rust".into(), page: 2 }));
///
/// let filter: Serialized<Filter> = bundle.read_required("filter").unwrap();
/// assert_eq!(filter.into_inner(), Filter { query: "rust".into(), page: 2 });
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Serialized<T>(pub T);

impl<T> Serialized<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Serialized<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Serialized<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Serialized<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Serialized<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<T> StateType for Serialized<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn to_value(&self) -> Option<BundleValue> {
        match serde_json::to_string(&self.0) {
            Ok(text) => Some(BundleValue::Serialized(text)),
            Err(err) => {
                log::warn!(
                    "`{}` cannot be serialized: {err}",
                    core::any::type_name::<T>()
                );
                None
            }
        }
    }

    fn from_value(value: &BundleValue) -> Result<Self, BundleError> {
        match value {
            BundleValue::Serialized(text) => serde_json::from_str(text)
                .map(Self)
                .map_err(|err| BundleError::Deserialize(err.to_string())),
            other => Err(ValueKindError::new(ValueKind::Serialized, other).into()),
        }
    }
}
