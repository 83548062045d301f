use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use autosave_bundle::{ArrayElement, Bundle, Parcel, Parcelable, Size, SizeF, StateType};
use autosave_utils::TypeIdMap;
use autosave_utils::hash::{FixedHashState, HashMap};

use crate::registry::StateCodec;

// -----------------------------------------------------------------------------
// CodecRegistry

/// A registry of [`StateCodec`]s keyed by type.
///
/// A field type without a codec is unsupported: saving it fails unless the
/// field ignores invalid types.
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use autosave_state::registry::CodecRegistry;
///
/// let registry = CodecRegistry::new();
/// assert!(registry.contains(TypeId::of::<Option<Vec<i32>>>()));
/// assert!(registry.contains(TypeId::of::<Vec<u32>>()));
/// assert!(!registry.contains(TypeId::of::<Vec<isize>>()));
///
/// let codec = registry.get_with_type_name("alloc::string::String").unwrap();
/// assert_eq!(codec.type_id(), TypeId::of::<String>());
/// ```
pub struct CodecRegistry {
    codecs: TypeIdMap<StateCodec>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    auto_registered: bool,
}

impl Default for CodecRegistry {
    /// See [`CodecRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// Creates an empty [`CodecRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            codecs: TypeIdMap::new(),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            auto_registered: false,
        }
    }

    /// Creates a registry with codecs for every built-in [`StateType`].
    ///
    /// - scalars: `bool` `char` `i8`-`i64` `u8`-`u64` `isize` `usize`
    ///   `f32` `f64` `String` `Size` `SizeF` `Bundle` `Parcel`
    /// - arrays: `Vec<E>` for `bool` `i8`-`i64` `u8`-`u64` `char` `f32`
    ///   `f64` `String` `Parcel`
    /// - `Option<T>` of each of the above
    ///
    /// Fixed-size arrays `[E; N]` have no entry here, one per length would be
    /// needed. Fields declared through `#[derive(AutoSave)]` carry their own
    /// codec and do not depend on this table.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        macro_rules! register_scalars {
            ($($ty:ty),* $(,)?) => {$(
                registry.register_with_option::<$ty>();
            )*};
        }

        macro_rules! register_arrays {
            ($($ty:ty),* $(,)?) => {$(
                registry.register_array::<$ty>();
            )*};
        }

        register_scalars!(
            bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
            String, Size, SizeF, Bundle, Parcel,
        );
        register_arrays!(
            bool, i8, i16, i32, i64, u8, u16, u32, u64, char, f32, f64, String, Parcel,
        );

        registry
    }

    /// Registers the codec of `T`.
    ///
    /// Returns `false` if `T` was already registered.
    pub fn register<T: StateType>(&mut self) -> bool {
        let inserted = self
            .codecs
            .try_insert(TypeId::of::<T>(), StateCodec::of::<T>);
        if inserted {
            let codec = StateCodec::of::<T>();
            self.type_name_to_id
                .insert(codec.type_name(), codec.type_id());
        }
        inserted
    }

    /// Registers `T` and `Option<T>`.
    pub fn register_with_option<T: StateType>(&mut self) {
        self.register::<T>();
        self.register::<Option<T>>();
    }

    /// Registers `Vec<E>` and `Option<Vec<E>>`.
    pub fn register_array<E: ArrayElement>(&mut self) {
        self.register_with_option::<Vec<E>>();
    }

    /// Registers a parcelable together with its containers: `P`,
    /// `Vec<P>` and `BTreeMap<i32, P>`, each with its `Option`.
    ///
    /// `P` must implement [`StateType`] and [`ArrayElement`], which
    /// `#[derive(Parcelable)]` provides.
    pub fn register_parcelable<P>(&mut self)
    where
        P: Parcelable + StateType + ArrayElement,
    {
        self.register_with_option::<P>();
        self.register_array::<P>();
        self.register_with_option::<BTreeMap<i32, P>>();
    }

    /// Registers [`Serialized<T>`](autosave_bundle::Serialized) and its
    /// `Option`.
    #[cfg(feature = "serde")]
    pub fn register_serialized<T>(&mut self)
    where
        T: serde::Serialize + serde::de::DeserializeOwned + 'static,
    {
        self.register_with_option::<autosave_bundle::Serialized<T>>();
    }

    /// Registers every parcelable marked `#[parcel(auto_register)]` and every
    /// type passed to `impl_auto_register!`.
    ///
    /// Repeated calls are cheap. Returns `true` if automatic registration is
    /// available on the current platform, which requires the `auto_register`
    /// feature and a platform supported by `inventory`.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        if !self.auto_registered {
            crate::__macro_exports::auto_register::__register_types(self);
            log::debug!(
                "auto registration finished with {} codec(s), available: {}",
                self.len(),
                self.auto_registered,
            );
        }
        self.auto_registered
    }

    #[cfg(feature = "auto_register")]
    #[inline]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.codecs.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&StateCodec> {
        self.codecs.get(&type_id)
    }

    /// Looks a codec up by [`core::any::type_name`].
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&StateCodec> {
        let type_id = self.type_name_to_id.get(type_name)?;
        self.codecs.get(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Visits all codecs in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &StateCodec> {
        self.codecs.values()
    }
}

// -----------------------------------------------------------------------------
// CodecRegistryArc

/// A shared handle to a [`CodecRegistry`].
#[derive(Clone, Default)]
pub struct CodecRegistryArc {
    /// The wrapped [`CodecRegistry`].
    pub internal: Arc<RwLock<CodecRegistry>>,
}

static GLOBAL: LazyLock<CodecRegistryArc> = LazyLock::new(|| {
    let mut registry = CodecRegistry::new();
    registry.auto_register();
    CodecRegistryArc::new(registry)
});

impl CodecRegistryArc {
    #[inline]
    pub fn new(registry: CodecRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// The registry used by [`register_save`](crate::register_save) and
    /// [`register_restore`](crate::register_restore).
    ///
    /// Built on first use from [`CodecRegistry::new`] plus
    /// [`CodecRegistry::auto_register`].
    #[inline]
    pub fn global() -> &'static CodecRegistryArc {
        &GLOBAL
    }

    /// Takes a read lock on the underlying [`CodecRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, CodecRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`CodecRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, CodecRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.type_name_to_id.keys())
            .finish()
    }
}

impl fmt::Debug for CodecRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}
