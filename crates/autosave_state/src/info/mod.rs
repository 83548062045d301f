//! Descriptors of participating fields.
//!
//! - [`FieldAccess`]: projection from an object onto one of its fields.
//! - [`FieldDeclaration`]: one marked field as declared by generated code.
//! - [`FieldDescriptor`]: a resolved field of a concrete type, including
//!   fields inherited from embedded ancestors.
//! - [`StateInfo`]: the flattened, key-checked descriptor set of a type.
//! - [`AutoSave`]: implemented by `#[derive(AutoSave)]`.
//! - [`DynamicAutoSave`]: its object-safe form.

// -----------------------------------------------------------------------------
// Modules

mod auto_save;
mod field;
mod state_info;

// -----------------------------------------------------------------------------
// Exports

pub use auto_save::{AutoSave, DynamicAutoSave};
pub use field::{FieldAccess, FieldDeclaration, FieldDescriptor};
pub use state_info::{StateInfo, StateInfoBuilder};
