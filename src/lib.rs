#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use autosave_bundle as bundle;
pub use autosave_state as state;
pub use autosave_utils as utils;

/// The items most programs need.
pub mod prelude {
    pub use autosave_bundle::{Bundle, Parcelable, StateType};
    #[cfg(feature = "serde")]
    pub use autosave_bundle::Serialized;
    pub use autosave_state::derive::{AutoSave, Parcelable};
    pub use autosave_state::lifecycle::{AutoSaveBinding, SavedStateRegistry};
    pub use autosave_state::{AutoSave, StateError, register_restore, register_save};
}
