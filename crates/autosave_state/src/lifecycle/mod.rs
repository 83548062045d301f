//! Host lifecycle integration.
//!
//! A host (screen, page, component tree node...) owns a
//! [`SavedStateRegistry`] that receives the bundle saved by the previous
//! incarnation. Each component gets an [`AutoSaveBinding`] which restores
//! the component after creation and provides its state before destruction.
//!
//! ```
//! use autosave_state::bundle::Bundle;
//! use autosave_state::derive::AutoSave;
//! use autosave_state::lifecycle::{AutoSaveBinding, SavedStateRegistry};
//!
//! #[derive(AutoSave, Default)]
//! struct Search {
//!     #[auto_save]
//!     query: String,
//! }
//!
//! // First incarnation, started with launch arguments.
//! let mut args = Bundle::new();
//! args.put("query", &String::from("rust"));
//!
//! let mut registry = SavedStateRegistry::new();
//! registry.perform_restore(None).unwrap();
//!
//! let mut search = Search::default();
//! let mut binding = AutoSaveBinding::new();
//! binding.on_create(&mut search, &mut registry, Some(&args)).unwrap();
//! assert_eq!(search.query, "rust");
//!
//! search.query.push_str(" lifetimes");
//! binding.on_save_instance_state(&search, &mut registry).unwrap();
//! let mut out = Bundle::new();
//! registry.perform_save(&mut out);
//! binding.on_destroy(&mut registry).unwrap();
//!
//! // Recreated: the saved state wins over the launch arguments.
//! let mut registry = SavedStateRegistry::new();
//! registry.perform_restore(Some(out)).unwrap();
//!
//! let mut search = Search::default();
//! AutoSaveBinding::new()
//!     .on_create(&mut search, &mut registry, Some(&args))
//!     .unwrap();
//! assert_eq!(search.query, "rust lifetimes");
//! ```

// -----------------------------------------------------------------------------
// Modules

mod binding;
mod saved_state_registry;

// -----------------------------------------------------------------------------
// Exports

pub use binding::AutoSaveBinding;
pub use saved_state_registry::SavedStateRegistry;

use alloc::string::String;

use thiserror::Error;

use crate::StateError;

/// The key an [`AutoSaveBinding`] provides its state under by default.
pub const AUTO_SAVE_KEY: &str = "autosave.AutoSave";

/// Errors of [`SavedStateRegistry`] and [`AutoSaveBinding`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("saved state registry was already restored")]
    AlreadyRestored,
    #[error("restored state can only be consumed after the registry is restored")]
    NotRestored,
    #[error("a saved state provider is already registered under `{0}`")]
    DuplicateProvider(String),
    #[error("no saved state provider is registered under `{0}`")]
    UnknownProvider(String),
    #[error("binding `{0}` was destroyed")]
    Destroyed(String),
    #[error(transparent)]
    State(#[from] StateError),
}
