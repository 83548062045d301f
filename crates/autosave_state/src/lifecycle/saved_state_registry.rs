use alloc::collections::BTreeMap;
use alloc::string::String;

use autosave_bundle::{Bundle, BundleValue};

use crate::lifecycle::LifecycleError;

/// Host-owned store of component states across recreation.
///
/// The host passes the bundle saved by the previous incarnation to
/// [`perform_restore`](Self::perform_restore) once. Components then take
/// their part out with
/// [`consume_restored_state_for_key`](Self::consume_restored_state_for_key).
/// Before destruction, registered providers hand in their state with
/// [`provide`](Self::provide) and the host collects everything with
/// [`perform_save`](Self::perform_save).
#[derive(Debug, Default)]
pub struct SavedStateRegistry {
    restored_state: Option<Bundle>,
    is_restored: bool,
    providers: BTreeMap<String, Option<Bundle>>,
}

impl SavedStateRegistry {
    #[inline]
    pub const fn new() -> Self {
        Self {
            restored_state: None,
            is_restored: false,
            providers: BTreeMap::new(),
        }
    }

    /// Hands over the state saved by the previous incarnation, `None` on
    /// first creation. Only allowed once.
    pub fn perform_restore(&mut self, saved_state: Option<Bundle>) -> Result<(), LifecycleError> {
        if self.is_restored {
            return Err(LifecycleError::AlreadyRestored);
        }
        self.restored_state = saved_state.filter(|state| !state.is_empty());
        self.is_restored = true;
        Ok(())
    }

    #[inline]
    pub fn is_restored(&self) -> bool {
        self.is_restored
    }

    /// Removes and returns the state restored under `key`.
    ///
    /// A second call for the same key returns `Ok(None)`.
    pub fn consume_restored_state_for_key(
        &mut self,
        key: &str,
    ) -> Result<Option<Bundle>, LifecycleError> {
        if !self.is_restored {
            return Err(LifecycleError::NotRestored);
        }
        let Some(state) = self.restored_state.as_mut() else {
            return Ok(None);
        };

        let consumed = match state.remove(key) {
            Some(BundleValue::Bundle(bundle)) => Some(bundle),
            Some(other) => {
                log::warn!(
                    "restored state under `{key}` is `{}`, expected a bundle",
                    other.kind()
                );
                None
            }
            None => None,
        };

        if state.is_empty() {
            self.restored_state = None;
        }
        Ok(consumed)
    }

    /// Registers a provider under `key`.
    pub fn register_provider(&mut self, key: impl Into<String>) -> Result<(), LifecycleError> {
        let key = key.into();
        if self.providers.contains_key(&key) {
            return Err(LifecycleError::DuplicateProvider(key));
        }
        self.providers.insert(key, None);
        Ok(())
    }

    /// Unregisters the provider under `key`, dropping the state it provided.
    #[inline]
    pub fn unregister_provider(&mut self, key: &str) -> bool {
        self.providers.remove(key).is_some()
    }

    #[inline]
    pub fn is_registered(&self, key: &str) -> bool {
        self.providers.contains_key(key)
    }

    /// Replaces the state provided under `key`.
    pub fn provide(&mut self, key: &str, state: Bundle) -> Result<(), LifecycleError> {
        match self.providers.get_mut(key) {
            Some(slot) => {
                *slot = Some(state);
                Ok(())
            }
            None => Err(LifecycleError::UnknownProvider(key.into())),
        }
    }

    /// Writes the collected state into `out`.
    ///
    /// Restored entries nobody consumed are carried over, provided states
    /// overwrite them.
    pub fn perform_save(&self, out: &mut Bundle) {
        if let Some(restored) = &self.restored_state {
            out.put_all(restored);
        }
        for (key, state) in &self.providers {
            if let Some(state) = state {
                out.insert(key.clone(), BundleValue::Bundle(state.clone()));
            }
        }
    }
}
