//! Code generation, one file per generated impl.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod auto_save;
mod parcelable;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use auto_save::impl_auto_save;
pub(crate) use parcelable::impl_parcelable;
