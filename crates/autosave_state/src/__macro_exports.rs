//! Items referenced by generated code. Not public API.

pub use alloc::vec::Vec;

use core::marker::PhantomData;

use autosave_bundle::StateType;

use crate::registry::StateCodec;

// -----------------------------------------------------------------------------
// Codec resolution

/// Resolves the codec of a field type at compile time.
///
/// `(&CodecOf::<T>::new()).__codec()` picks [`__KnownCodec`] when
/// `T: StateType` and falls back to [`__UnknownCodec`] through one more
/// auto-reference otherwise. Generic field types whose bounds do not prove
/// `StateType` take the fallback and use the registry at runtime.
pub struct CodecOf<T>(PhantomData<fn() -> T>);

impl<T> CodecOf<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

pub trait __KnownCodec {
    fn __codec(&self) -> Option<StateCodec>;
}

impl<T: StateType> __KnownCodec for CodecOf<T> {
    #[inline]
    fn __codec(&self) -> Option<StateCodec> {
        Some(StateCodec::of::<T>())
    }
}

pub trait __UnknownCodec {
    fn __codec(&self) -> Option<StateCodec>;
}

impl<T> __UnknownCodec for &CodecOf<T> {
    #[inline]
    fn __codec(&self) -> Option<StateCodec> {
        None
    }
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use autosave_bundle::{ArrayElement, Parcelable, StateType};

    use crate::registry::CodecRegistry;

    pub use inventory;

    /// A registration function submitted by generated code.
    pub struct __AutoRegisterFunc(pub fn(&mut CodecRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Used by `impl_auto_register!`.
    pub trait __RegisterType {
        fn __register(registry: &mut CodecRegistry);
    }

    impl<T: StateType> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut CodecRegistry) {
            registry.register_with_option::<T>();
        }
    }

    /// Used by `#[parcel(auto_register)]`.
    pub trait __RegisterParcelable {
        fn __register(registry: &mut CodecRegistry);
    }

    impl<P: Parcelable + StateType + ArrayElement> __RegisterParcelable for P {
        #[inline]
        fn __register(registry: &mut CodecRegistry) {
            registry.register_parcelable::<P>();
        }
    }

    // Only runs where `inventory` works, so it doubles as the support flag.
    fn __mark_available(registry: &mut CodecRegistry) {
        registry.mark_auto_registered();
    }

    inventory::submit! {
        __AutoRegisterFunc(__mark_available)
    }

    pub(crate) fn __register_types(registry: &mut CodecRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
