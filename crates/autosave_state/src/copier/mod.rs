//! Copies participating fields between an object and a [`Bundle`].

// -----------------------------------------------------------------------------
// Modules

mod restore;
mod save;

use core::any::Any;

use autosave_bundle::Bundle;

use crate::info::{AutoSave, DynamicAutoSave, StateInfo};
use crate::registry::{CodecRegistry, CodecRegistryArc};
use crate::{StateError, scan};

// -----------------------------------------------------------------------------
// StateCopier

/// Saves and restores objects using the codecs of one registry.
///
/// A field uses the codec fixed by `#[derive(AutoSave)]` when its declared
/// type implements [`StateType`](autosave_bundle::StateType). Other fields
/// look a codec up in the registry by the runtime type of their value.
///
/// # Examples
///
/// ```
/// use autosave_state::copier::StateCopier;
/// use autosave_state::derive::AutoSave;
/// use autosave_state::registry::CodecRegistry;
///
/// #[derive(AutoSave)]
/// struct Volume {
///     #[auto_save]
///     level: u8,
/// }
///
/// let registry = CodecRegistry::new();
/// let copier = StateCopier::new(&registry);
/// let info = autosave_state::scan::<Volume>().unwrap();
///
/// let saved = copier.save(&Volume { level: 7 }, info).unwrap();
///
/// let mut volume = Volume { level: 0 };
/// assert_eq!(copier.restore(&mut volume, info, Some(&saved), None).unwrap(), 1);
/// assert_eq!(volume.level, 7);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StateCopier<'r> {
    registry: &'r CodecRegistry,
}

impl<'r> StateCopier<'r> {
    #[inline]
    pub const fn new(registry: &'r CodecRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub fn registry(&self) -> &'r CodecRegistry {
        self.registry
    }

    /// Saves a type-erased component, scanning its concrete type on demand.
    pub fn save_object(&self, object: &dyn DynamicAutoSave) -> Result<Bundle, StateError> {
        let info = object.dyn_state_info()?;
        self.save(object, info)
    }

    /// Restores a type-erased component, see [`restore`](Self::restore).
    pub fn restore_object(
        &self,
        object: &mut dyn DynamicAutoSave,
        restore_state: Option<&Bundle>,
        fallback_args: Option<&Bundle>,
    ) -> Result<usize, StateError> {
        let info = object.dyn_state_info()?;
        self.restore(object, info, restore_state, fallback_args)
    }

    #[inline]
    fn check_target(target: &dyn Any, info: &StateInfo) -> Result<(), StateError> {
        if target.type_id() == info.type_id() {
            Ok(())
        } else {
            Err(StateError::TargetMismatch {
                expected: info.type_name(),
            })
        }
    }
}

// -----------------------------------------------------------------------------
// Entry points

/// Saves the participating fields of `object` into a new [`Bundle`].
///
/// Uses the [global registry](CodecRegistryArc::global). Saving an unchanged
/// object again yields an equal bundle.
///
/// # Errors
///
/// - [`StateError::Configuration`] if `T` declares a storage key twice.
/// - [`StateError::UnsupportedFieldType`] if a field without
///   `ignore_invalid_type` has no codec.
pub fn register_save<T: AutoSave>(object: &T) -> Result<Bundle, StateError> {
    let info = scan::<T>()?;
    let registry = CodecRegistryArc::global().read();
    StateCopier::new(&registry).save(object, info)
}

/// Restores the participating fields of `object`.
///
/// Each key is read from `restore_state` first and from `fallback_args`
/// second. Fields whose key is in neither keep their value.
///
/// # Errors
///
/// - [`StateError::Configuration`] if `T` declares a storage key twice.
/// - [`StateError::TypeMismatch`] if a stored value does not fit a field
///   without `ignore_invalid_type`.
/// - [`StateError::UnsupportedFieldType`] if a value is found for a field
///   without codec and without `ignore_invalid_type`.
///
/// Fields restored before the error keep their new value.
pub fn register_restore<T: AutoSave>(
    object: &mut T,
    restore_state: Option<&Bundle>,
    fallback_args: Option<&Bundle>,
) -> Result<(), StateError> {
    let info = scan::<T>()?;
    let registry = CodecRegistryArc::global().read();
    StateCopier::new(&registry).restore(object, info, restore_state, fallback_args)?;
    Ok(())
}

#[cfg(test)]
mod tests;
