#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `::autosave_state`, which must also
// resolve inside the crate's own tests.
extern crate self as autosave_state;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod copier;
pub mod info;
pub mod lifecycle;
pub mod registry;
pub mod scan;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use autosave_bundle as bundle;
pub use autosave_state_derive as derive;

pub use copier::{register_restore, register_save};
pub use error::{ConfigurationError, StateError};
pub use error::{TypeMismatchError, UnsupportedFieldTypeError};
pub use info::{AutoSave, DynamicAutoSave};
pub use scan::scan;
