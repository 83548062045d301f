#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bundle;
mod error;
mod geometry;
mod parcel;
#[cfg(feature = "serde")]
mod serialized;
mod state_type;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use bundle::Bundle;
pub use error::{BundleError, ValueKindError};
pub use geometry::{Size, SizeF};
pub use parcel::{Parcel, Parcelable};
pub use parcel::{parcel_array_from_value, parcel_array_to_value};
pub use parcel::{parcel_from_value, parcel_to_value};
#[cfg(feature = "serde")]
pub use serialized::Serialized;
pub use state_type::{ArrayElement, StateType};
pub use value::{BundleValue, ValueKind};
