use core::any::Any;

use autosave_bundle::{Bundle, BundleValue};

use super::StateCopier;
use crate::info::StateInfo;
use crate::{StateError, TypeMismatchError, UnsupportedFieldTypeError};

#[inline]
fn lookup<'a>(
    key: &str,
    restore_state: Option<&'a Bundle>,
    fallback_args: Option<&'a Bundle>,
) -> Option<&'a BundleValue> {
    restore_state
        .and_then(|state| state.get(key))
        .or_else(|| fallback_args.and_then(|args| args.get(key)))
}

impl StateCopier<'_> {
    /// Restores the fields described by `info` from `restore_state`, then
    /// `fallback_args`.
    ///
    /// Returns the number of fields assigned.
    pub fn restore(
        &self,
        target: &mut dyn Any,
        info: &StateInfo,
        restore_state: Option<&Bundle>,
        fallback_args: Option<&Bundle>,
    ) -> Result<usize, StateError> {
        Self::check_target(target, info)?;

        let mut restored = 0;

        for field in info {
            let Some(value) = lookup(field.key(), restore_state, fallback_args) else {
                log::trace!("keep `{}`: no stored value", field.key());
                continue;
            };

            let slot = field
                .get_mut(&mut *target)
                .ok_or(StateError::TargetMismatch {
                    expected: info.type_name(),
                })?;

            let codec = field.codec().or_else(|| self.registry.get((*slot).type_id()));
            let Some(codec) = codec else {
                if field.ignore_invalid_type() {
                    log::trace!(
                        "skip `{}`: unsupported type `{}`",
                        field.key(),
                        field.type_name()
                    );
                    continue;
                }
                return Err(UnsupportedFieldTypeError::new(field).into());
            };

            match codec.restore(value, slot) {
                Ok(()) => restored += 1,
                Err(err) if field.ignore_invalid_type() => {
                    log::debug!("skip `{}`: {err}", field.key());
                }
                Err(err) => {
                    return Err(TypeMismatchError::new(field, value.kind(), err).into());
                }
            }
        }

        Ok(restored)
    }
}
