/// Builds a type-erased helper for the concrete type `T`.
///
/// # Example
///
/// ```
/// # use autosave_state::registry::{FromType, StateCodec};
/// let codec: StateCodec = FromType::<String>::from_type();
/// assert_eq!(codec.type_name(), "alloc::string::String");
/// ```
pub trait FromType<T> {
    fn from_type() -> Self;
}
