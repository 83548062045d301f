//! Runtime conversion of field values by type.
//!
//! The copier looks up a [`StateCodec`] by the [`TypeId`](core::any::TypeId)
//! of the value it reached, so a field is only as supported as the registry
//! it is copied with.

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod codec_registry;
mod from_type;

// -----------------------------------------------------------------------------
// Exports

pub use codec::StateCodec;
pub use codec_registry::{CodecRegistry, CodecRegistryArc};
pub use from_type::FromType;
