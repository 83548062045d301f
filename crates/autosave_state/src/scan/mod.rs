//! The field metadata scanner and its process-wide cache.

// -----------------------------------------------------------------------------
// Modules

mod cell;

// -----------------------------------------------------------------------------
// Exports

pub use cell::StateInfoCell;

use crate::ConfigurationError;
use crate::info::{AutoSave, StateInfo};

static STATE_INFOS: StateInfoCell = StateInfoCell::new();

/// Returns the participating fields of `T`, ancestors first.
///
/// The first successful scan of a type is cached for the rest of the
/// process; later calls return the same `&'static` value. A type with a
/// duplicate storage key fails with [`ConfigurationError`] on every call.
///
/// # Examples
///
/// ```
/// use autosave_state::derive::AutoSave;
///
/// #[derive(AutoSave)]
/// struct Player {
///     #[auto_save]
///     name: String,
///     #[auto_save(key = "hp", ignore_invalid_type)]
///     health: u16,
/// }
///
/// let info = autosave_state::scan::<Player>().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert!(info.field("hp").unwrap().ignore_invalid_type());
/// assert!(core::ptr::eq(info, autosave_state::scan::<Player>().unwrap()));
/// ```
pub fn scan<T: AutoSave>() -> Result<&'static StateInfo, ConfigurationError> {
    STATE_INFOS.get_or_try_insert::<T, _>(|| {
        let info = StateInfo::build::<T>()?;
        log::debug!(
            "scanned {} participating field(s) of `{}`",
            info.field_len(),
            info.type_name(),
        );
        #[cfg(all(debug_assertions, feature = "debug"))]
        for field in info.iter() {
            log::trace!(
                "  `{}` <- {}::{} (`{}`, ignore_invalid_type = {})",
                field.key(),
                field.owner(),
                field.name(),
                field.type_name(),
                field.ignore_invalid_type(),
            );
        }
        Ok(info)
    })
}

/// Returns `true` if `T` has been scanned successfully.
#[inline]
pub fn is_cached<T: AutoSave>() -> bool {
    STATE_INFOS.get::<T>().is_some()
}

/// The number of types in the process-wide cache.
#[inline]
pub fn cached_len() -> usize {
    STATE_INFOS.len()
}
