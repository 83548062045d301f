use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::registry::StateCodec;

// -----------------------------------------------------------------------------
// FieldAccess

/// A pair of projections from an object onto one of its fields.
///
/// Both functions return `None` if the object is not of the type the
/// projection was generated for.
#[derive(Clone, Copy)]
pub struct FieldAccess {
    get: fn(&dyn Any) -> Option<&dyn Any>,
    get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
}

impl FieldAccess {
    #[inline]
    pub const fn new(
        get: fn(&dyn Any) -> Option<&dyn Any>,
        get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    ) -> Self {
        Self { get, get_mut }
    }
}

impl fmt::Debug for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldAccess")
    }
}

// -----------------------------------------------------------------------------
// FieldDeclaration

/// A marked field as declared by `#[derive(AutoSave)]`.
///
/// # Examples
///
/// ```
/// use core::any::Any;
/// use autosave_state::info::{FieldAccess, FieldDeclaration};
///
/// struct Counter { hits: u32 }
///
/// let decl = FieldDeclaration::new::<Counter, u32>(
///     "hits",
///     FieldAccess::new(
///         |obj| Some(&obj.downcast_ref::<Counter>()?.hits as &dyn Any),
///         |obj| Some(&mut obj.downcast_mut::<Counter>()?.hits as &mut dyn Any),
///     ),
/// )
/// .with_key("counter_hits");
///
/// assert_eq!(decl.key(), "counter_hits");
/// ```
#[derive(Clone, Debug)]
pub struct FieldDeclaration {
    owner: &'static str,
    name: &'static str,
    key: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    ignore_invalid_type: bool,
    codec: Option<StateCodec>,
    access: FieldAccess,
}

impl FieldDeclaration {
    /// Declares field `name` of type `T` on `Owner`.
    ///
    /// The storage key defaults to the field name.
    pub fn new<Owner: ?Sized + 'static, T: Any>(name: &'static str, access: FieldAccess) -> Self {
        Self {
            owner: type_name::<Owner>(),
            name,
            key: name,
            type_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            ignore_invalid_type: false,
            codec: None,
            access,
        }
    }

    /// Overrides the storage key, an empty key keeps the field name.
    #[inline]
    pub fn with_key(mut self, key: &'static str) -> Self {
        if !key.is_empty() {
            self.key = key;
        }
        self
    }

    #[inline]
    pub fn with_ignore_invalid_type(mut self, ignore: bool) -> Self {
        self.ignore_invalid_type = ignore;
        self
    }

    /// Attaches the codec of the declared type.
    ///
    /// A field with a codec does not depend on the registry. The derive
    /// passes one whenever the field type implements
    /// [`StateType`](autosave_bundle::StateType).
    #[inline]
    pub fn with_codec(mut self, codec: Option<StateCodec>) -> Self {
        self.codec = codec;
        self
    }

    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }

    #[inline]
    pub(super) fn into_descriptor(self, prefix: &[FieldAccess]) -> FieldDescriptor {
        let mut path = prefix.to_vec();
        path.push(self.access);
        FieldDescriptor {
            owner: self.owner,
            name: self.name,
            key: self.key,
            type_name: self.type_name,
            type_id: self.type_id,
            ignore_invalid_type: self.ignore_invalid_type,
            codec: self.codec,
            path: path.into_boxed_slice(),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A participating field of a concrete type.
///
/// The descriptor reaches the field from the root object through a chain of
/// projections; fields declared by an embedded ancestor have a longer chain.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    owner: &'static str,
    name: &'static str,
    key: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    ignore_invalid_type: bool,
    codec: Option<StateCodec>,
    path: Box<[FieldAccess]>,
}

impl FieldDescriptor {
    /// The type that declares the field.
    #[inline]
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// The field identifier.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The storage key, an explicit override or the field identifier.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The declared type name of the field.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The declared [`TypeId`] of the field.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn ignore_invalid_type(&self) -> bool {
        self.ignore_invalid_type
    }

    /// The codec fixed at declaration, if any.
    #[inline]
    pub fn codec(&self) -> Option<&StateCodec> {
        self.codec.as_ref()
    }

    /// Returns `true` if the field is declared by an embedded ancestor.
    #[inline]
    pub fn is_inherited(&self) -> bool {
        self.path.len() > 1
    }

    /// Projects `root` onto this field.
    pub fn get<'a>(&self, root: &'a dyn Any) -> Option<&'a dyn Any> {
        self.path
            .iter()
            .try_fold(root, |current, access| (access.get)(current))
    }

    /// Projects `root` mutably onto this field.
    pub fn get_mut<'a>(&self, root: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let mut current = root;
        for access in &self.path {
            current = (access.get_mut)(current)?;
        }
        Some(current)
    }
}
