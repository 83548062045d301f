use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{PoisonError, RwLock};

use autosave_utils::TypeIdMap;

use crate::info::StateInfo;

/// Process-wide storage of [`StateInfo`] keyed by type.
///
/// Lookups take the read lock only. On a miss the info is built outside
/// the lock and published under the write lock; if another thread won the
/// race, its value is kept and the freshly built one is dropped. Published
/// entries are leaked and live for the rest of the process.
pub struct StateInfoCell(RwLock<TypeIdMap<&'static StateInfo>>);

impl StateInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info cached for `G`, building it with `f` on a miss.
    ///
    /// Errors returned by `f` are passed through and nothing is cached.
    #[inline(always)]
    pub fn get_or_try_insert<G: Any + ?Sized, E>(
        &self,
        f: impl FnOnce() -> Result<StateInfo, E>,
    ) -> Result<&'static StateInfo, E> {
        let type_id = TypeId::of::<G>();
        match self.get_by_type_id(type_id) {
            Some(info) => Ok(info),
            None => Ok(self.insert_by_type_id(type_id, f()?)),
        }
    }

    #[inline]
    pub fn get<G: Any + ?Sized>(&self) -> Option<&'static StateInfo> {
        self.get_by_type_id(TypeId::of::<G>())
    }

    /// The number of cached types.
    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static StateInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: StateInfo) -> &'static StateInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl Default for StateInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
