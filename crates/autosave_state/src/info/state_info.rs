use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use autosave_utils::hash::{FixedHashState, HashMap};

use crate::ConfigurationError;
use crate::info::{AutoSave, FieldAccess, FieldDeclaration, FieldDescriptor};

// -----------------------------------------------------------------------------
// StateInfoBuilder

/// Collects the field declarations of a type and its embedded ancestors.
#[derive(Debug, Default)]
pub struct StateInfoBuilder {
    prefix: Vec<FieldAccess>,
    fields: Vec<FieldDescriptor>,
}

impl StateInfoBuilder {
    #[inline]
    pub const fn new() -> Self {
        Self {
            prefix: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Adds a marked field of the type currently being declared.
    pub fn field(&mut self, declaration: FieldDeclaration) -> &mut Self {
        self.fields.push(declaration.into_descriptor(&self.prefix));
        self
    }

    /// Flattens the declarations of ancestor `P`, reached through `access`.
    pub fn parent<P: AutoSave>(&mut self, access: FieldAccess) -> &mut Self {
        self.prefix.push(access);
        P::declare_fields(self);
        self.prefix.pop();
        self
    }

    /// Builds the [`StateInfo`] of `T`, rejecting duplicate storage keys.
    pub fn finish<T: Any>(self) -> Result<StateInfo, ConfigurationError> {
        let mut key_to_index = HashMap::with_capacity_and_hasher(self.fields.len(), FixedHashState);

        for (index, field) in self.fields.iter().enumerate() {
            if let Some(&first) = key_to_index.get(field.key()) {
                let first: &FieldDescriptor = &self.fields[first];
                return Err(ConfigurationError {
                    type_name: type_name::<T>(),
                    key: field.key(),
                    first: format!("{}::{}", first.owner(), first.name()),
                    second: format!("{}::{}", field.owner(), field.name()),
                });
            }
            key_to_index.insert(field.key(), index);
        }

        Ok(StateInfo {
            type_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            fields: self.fields.into_boxed_slice(),
            key_to_index,
        })
    }
}

// -----------------------------------------------------------------------------
// StateInfo

/// The flattened participating fields of a concrete type.
///
/// Ancestor fields come first, in declaration order. Storage keys are unique.
#[derive(Debug)]
pub struct StateInfo {
    type_name: &'static str,
    type_id: TypeId,
    fields: Box<[FieldDescriptor]>,
    key_to_index: HashMap<&'static str, usize>,
}

impl StateInfo {
    /// Builds the descriptor set of `T` without touching the cache.
    pub fn build<T: AutoSave>() -> Result<Self, ConfigurationError> {
        let mut builder = StateInfoBuilder::new();
        T::declare_fields(&mut builder);
        builder.finish::<T>()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Returns the field stored under `key`.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.index_of(key).map(|index| &self.fields[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    #[inline]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.key_to_index.get(key).copied()
    }

    /// Iterates the storage keys in field order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldDescriptor::key)
    }
}

impl<'a> IntoIterator for &'a StateInfo {
    type Item = &'a FieldDescriptor;
    type IntoIter = core::slice::Iter<'a, FieldDescriptor>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
