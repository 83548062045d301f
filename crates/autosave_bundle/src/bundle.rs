use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BundleError, BundleValue, StateType};

// -----------------------------------------------------------------------------
// Bundle

/// An ordered key-value state container.
///
/// Keys are kept sorted, so two bundles with the same content iterate and
/// serialize identically regardless of insertion order.
///
/// # Examples
///
/// ```
/// use autosave_bundle::{Bundle, BundleValue};
///
/// let mut args = Bundle::new();
/// args.insert("user", BundleValue::String("ferris".into()));
///
/// let mut state = Bundle::new();
/// state.put("args", &args);
/// state.put("retries", &2_u8);
///
/// assert_eq!(state.keys().collect::<Vec<_>>(), ["args", "retries"]);
/// assert_eq!(state.get_bundle("args"), Some(&args));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Bundle {
    entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
    /// Creates an empty bundle.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the raw value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    /// Returns the nested bundle stored under `key`.
    ///
    /// `None` if the key is absent or holds another kind.
    pub fn get_bundle(&self, key: &str) -> Option<&Bundle> {
        match self.entries.get(key)? {
            BundleValue::Bundle(bundle) => Some(bundle),
            _ => None,
        }
    }

    /// Inserts a raw value, returning the previous one.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: BundleValue) -> Option<BundleValue> {
        self.entries.insert(key.into(), value)
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<BundleValue> {
        self.entries.remove(key)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copies every entry of `other` into `self`, overwriting equal keys.
    pub fn put_all(&mut self, other: &Bundle) {
        self.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Converts `value` and stores it under `key`.
    ///
    /// Values without a stored form (an empty `Option`) write nothing and
    /// leave a previous entry under `key` untouched. Returns `true` if an
    /// entry was written.
    pub fn put<T: StateType>(&mut self, key: impl Into<String>, value: &T) -> bool {
        match value.to_value() {
            Some(value) => {
                self.entries.insert(key.into(), value);
                true
            }
            None => false,
        }
    }

    /// Reads the value under `key` as `T`.
    ///
    /// Returns `Ok(None)` if the key is absent and an error if the stored
    /// kind cannot be converted into `T`.
    pub fn read<T: StateType>(&self, key: &str) -> Result<Option<T>, BundleError> {
        self.entries.get(key).map(T::from_value).transpose()
    }

    /// Reads a required entry, as used by derived [`Parcelable`](crate::Parcelable)
    /// implementations.
    ///
    /// An absent key falls back to [`StateType::from_missing`], errors are
    /// wrapped with the offending key.
    pub fn read_required<T: StateType>(&self, key: &str) -> Result<T, BundleError> {
        match self.entries.get(key) {
            Some(value) => T::from_value(value).map_err(|err| BundleError::Entry {
                key: key.into(),
                source: Box::new(err),
            }),
            None => T::from_missing().ok_or_else(|| BundleError::MissingKey(key.into())),
        }
    }

    /// Iterates the keys in ascending order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates the entries in ascending key order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &BundleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, BundleValue)> for Bundle {
    fn from_iter<I: IntoIterator<Item = (K, BundleValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Bundle {
    type Item = (String, BundleValue);
    type IntoIter = btree_map::IntoIter<String, BundleValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Bundle;
    use crate::{BundleError, BundleValue, ValueKind, ValueKindError};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn put_skips_empty_option() {
        let mut bundle = Bundle::new();
        bundle.put("name", &String::from("before"));

        assert!(!bundle.put("name", &Option::<String>::None));
        assert_eq!(
            bundle.read::<String>("name").unwrap().as_deref(),
            Some("before")
        );
    }

    #[test]
    fn read_reports_kind_mismatch() {
        let mut bundle = Bundle::new();
        bundle.put("count", &5_i32);

        let err = bundle.read::<String>("count").unwrap_err();
        assert_eq!(
            err,
            BundleError::Kind(ValueKindError {
                expected: ValueKind::String,
                found: ValueKind::Int,
            })
        );
        assert_eq!(bundle.read::<i64>("absent").unwrap(), None);
    }

    #[test]
    fn read_required_wraps_key() {
        let mut bundle = Bundle::new();
        bundle.insert("flag", BundleValue::Int(1));

        let err = bundle.read_required::<bool>("flag").unwrap_err();
        assert!(matches!(&err, BundleError::Entry { key, .. } if key == "flag"));
        assert_eq!(err.kind_error().map(|e| e.found), Some(ValueKind::Int));

        let missing = bundle.read_required::<bool>("other").unwrap_err();
        assert_eq!(missing, BundleError::MissingKey("other".into()));
        assert_eq!(bundle.read_required::<Option<bool>>("other"), Ok(None));
    }

    #[test]
    fn keys_are_sorted() {
        let bundle: Bundle = [
            ("b", BundleValue::Bool(true)),
            ("a", BundleValue::IntArray(vec![1, 2])),
        ]
        .into_iter()
        .collect();

        assert_eq!(bundle.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn put_all_overwrites() {
        let mut base = Bundle::new();
        base.put("a", &1_i32);
        base.put("b", &2_i32);

        let mut patch = Bundle::new();
        patch.put("b", &20_i32);

        base.put_all(&patch);
        assert_eq!(base.read::<i32>("b").unwrap(), Some(20));
        assert_eq!(base.len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialization_is_order_independent() {
        let mut first = Bundle::new();
        first.put("x", &1.5_f64);
        first.put("y", &'c');

        let mut second = Bundle::new();
        second.put("y", &'c');
        second.put("x", &1.5_f64);

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        let text = ron::to_string(&first).unwrap();
        let back: Bundle = ron::from_str(&text).unwrap();
        assert_eq!(back, first);
    }
}
