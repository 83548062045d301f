use core::any::Any;

use autosave_bundle::Bundle;

use super::StateCopier;
use crate::info::StateInfo;
use crate::{StateError, UnsupportedFieldTypeError};

impl StateCopier<'_> {
    /// Saves the fields described by `info` into a new [`Bundle`].
    pub fn save(&self, target: &dyn Any, info: &StateInfo) -> Result<Bundle, StateError> {
        let mut out = Bundle::new();
        self.save_into(target, info, &mut out)?;
        Ok(out)
    }

    /// Saves the fields described by `info` into `out`.
    ///
    /// Entries of `out` under other keys are kept.
    pub fn save_into(
        &self,
        target: &dyn Any,
        info: &StateInfo,
        out: &mut Bundle,
    ) -> Result<(), StateError> {
        Self::check_target(target, info)?;

        for field in info {
            let value = field.get(target).ok_or(StateError::TargetMismatch {
                expected: info.type_name(),
            })?;

            let codec = field.codec().or_else(|| self.registry.get(value.type_id()));
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

            match codec.save(value) {
                Some(value) => {
                    log::trace!("save `{}` as `{}`", field.key(), value.kind());
                    out.insert(field.key(), value);
                }
                None => log::trace!("skip `{}`: no value", field.key()),
            }
        }

        Ok(())
    }
}
