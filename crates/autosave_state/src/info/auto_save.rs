use core::any::Any;

use crate::ConfigurationError;
use crate::info::{StateInfo, StateInfoBuilder};

/// A component whose marked fields can be saved and restored.
///
/// Implemented by `#[derive(AutoSave)]`. The implementation declares the
/// marked fields in order, after the fields of an embedded ancestor.
///
/// # Examples
///
/// ```
/// use autosave_state::AutoSave;
/// use autosave_state::derive::AutoSave;
///
/// #[derive(AutoSave)]
/// struct Base {
///     #[auto_save]
///     a: i32,
/// }
///
/// #[derive(AutoSave)]
/// struct Page {
///     #[auto_save(parent)]
///     base: Base,
///     #[auto_save("page_b")]
///     b: i32,
/// }
///
/// let info = Page::state_info().unwrap();
/// let keys: Vec<_> = info.keys().collect();
/// assert_eq!(keys, ["a", "page_b"]);
/// assert!(info.field("a").unwrap().is_inherited());
/// ```
pub trait AutoSave: Any {
    /// Declares every participating field of `Self`.
    fn declare_fields(builder: &mut StateInfoBuilder);

    /// The cached [`StateInfo`] of `Self`, see [`scan`](crate::scan()).
    #[inline]
    fn state_info() -> Result<&'static StateInfo, ConfigurationError>
    where
        Self: Sized,
    {
        crate::scan::<Self>()
    }
}

/// Object-safe counterpart of [`AutoSave`], implemented for every `AutoSave` type.
///
/// Lets a host keep heterogeneous components as `Box<dyn DynamicAutoSave>`
/// and still save and restore them, see
/// [`StateCopier::save_object`](crate::copier::StateCopier::save_object).
pub trait DynamicAutoSave: Any {
    /// The cached [`StateInfo`] of the concrete type.
    fn dyn_state_info(&self) -> Result<&'static StateInfo, ConfigurationError>;
}

impl<T: AutoSave> DynamicAutoSave for T {
    #[inline]
    fn dyn_state_info(&self) -> Result<&'static StateInfo, ConfigurationError> {
        crate::scan::<T>()
    }
}
