use alloc::string::String;

use autosave_bundle::Bundle;

use crate::info::AutoSave;
use crate::lifecycle::{AUTO_SAVE_KEY, LifecycleError, SavedStateRegistry};
use crate::{register_restore, register_save};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Detached,
    Attached,
    Destroyed,
}

/// Connects one component instance to its host's [`SavedStateRegistry`].
///
/// - [`on_create`](Self::on_create) restores the component at most once.
/// - [`on_save_instance_state`](Self::on_save_instance_state) provides the
///   component's current state to the registry.
/// - [`on_destroy`](Self::on_destroy) detaches the binding for good.
///
/// The state restored for this binding is consumed from the registry on
/// first use and cached until the next save.
#[derive(Debug)]
pub struct AutoSaveBinding {
    key: String,
    phase: Phase,
    restored: bool,
    consumed: bool,
    cached: Option<Bundle>,
}

impl Default for AutoSaveBinding {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AutoSaveBinding {
    /// A binding providing its state under [`AUTO_SAVE_KEY`].
    #[inline]
    pub fn new() -> Self {
        Self::with_key(AUTO_SAVE_KEY)
    }

    /// A binding providing its state under `key`.
    ///
    /// Components sharing a host need distinct keys.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            phase: Phase::Detached,
            restored: false,
            consumed: false,
            cached: None,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns `true` once [`on_create`](Self::on_create) restored the component.
    #[inline]
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    /// Post-create hook.
    ///
    /// Registers the binding as a provider and restores `target` from the
    /// state saved under this binding's key, falling back to
    /// `fallback_args`. Returns `false` without touching `target` if the
    /// component was already restored.
    pub fn on_create<T: AutoSave>(
        &mut self,
        target: &mut T,
        registry: &mut SavedStateRegistry,
        fallback_args: Option<&Bundle>,
    ) -> Result<bool, LifecycleError> {
        self.attach(registry)?;

        if self.restored {
            log::warn!("`{}` was already restored, on_create ignored", self.key);
            return Ok(false);
        }

        let restore_state = self.saved_bundle(registry)?;
        register_restore(target, restore_state, fallback_args)?;
        self.restored = true;
        Ok(true)
    }

    /// Pre-destroy hook, saves `target` and provides the result.
    pub fn on_save_instance_state<T: AutoSave>(
        &mut self,
        target: &T,
        registry: &mut SavedStateRegistry,
    ) -> Result<(), LifecycleError> {
        self.attach(registry)?;

        let state = register_save(target)?;
        registry.provide(&self.key, state)?;
        self.cached = None;
        Ok(())
    }

    /// Unregisters the binding. Later calls fail with
    /// [`LifecycleError::Destroyed`].
    pub fn on_destroy(&mut self, registry: &mut SavedStateRegistry) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Destroyed => return Err(LifecycleError::Destroyed(self.key.clone())),
            Phase::Attached => {
                registry.unregister_provider(&self.key);
            }
            Phase::Detached => {}
        }
        self.phase = Phase::Destroyed;
        self.cached = None;
        Ok(())
    }

    fn attach(&mut self, registry: &mut SavedStateRegistry) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Attached => Ok(()),
            Phase::Destroyed => Err(LifecycleError::Destroyed(self.key.clone())),
            Phase::Detached => {
                registry.register_provider(self.key.as_str())?;
                self.phase = Phase::Attached;
                Ok(())
            }
        }
    }

    // Consuming removes the entry from the registry, so keep it around.
    fn saved_bundle(
        &mut self,
        registry: &mut SavedStateRegistry,
    ) -> Result<Option<&Bundle>, LifecycleError> {
        if !self.consumed {
            self.cached = registry.consume_restored_state_for_key(&self.key)?;
            self.consumed = true;
        }
        Ok(self.cached.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::AutoSaveBinding;
    use crate::derive::AutoSave;
    use crate::lifecycle::{AUTO_SAVE_KEY, LifecycleError, SavedStateRegistry};
    use crate::{StateError, TypeMismatchError};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use autosave_bundle::Bundle;

    #[derive(AutoSave, Debug, Default, PartialEq)]
    struct Page {
        #[auto_save]
        a: i32,
        #[auto_save]
        b: String,
        #[auto_save]
        d: Vec<i32>,
    }

    fn launch_args() -> Bundle {
        let mut args = Bundle::new();
        args.put("a", &10_i32);
        args.put("b", &String::from("hahah"));
        args
    }

    fn restored_registry(saved: Option<Bundle>) -> SavedStateRegistry {
        let mut registry = SavedStateRegistry::new();
        registry.perform_restore(saved).unwrap();
        registry
    }

    #[test]
    fn first_creation_reads_launch_args() {
        let mut registry = restored_registry(None);
        let mut page = Page::default();
        let mut binding = AutoSaveBinding::new();

        assert!(binding.on_create(&mut page, &mut registry, Some(&launch_args())).unwrap());
        assert_eq!(page.a, 10);
        assert_eq!(page.b, "hahah");
        assert!(page.d.is_empty());
        assert!(registry.is_registered(AUTO_SAVE_KEY));
    }

    #[test]
    fn recreation_restores_saved_state() {
        let args = launch_args();

        let mut registry = restored_registry(None);
        let mut page = Page::default();
        let mut binding = AutoSaveBinding::new();
        binding.on_create(&mut page, &mut registry, Some(&args)).unwrap();

        page.a = 20;
        page.d = vec![1, 2, 3];
        binding.on_save_instance_state(&page, &mut registry).unwrap();

        let mut out = Bundle::new();
        registry.perform_save(&mut out);
        binding.on_destroy(&mut registry).unwrap();
        assert!(!registry.is_registered(AUTO_SAVE_KEY));

        let mut registry = restored_registry(Some(out));
        let mut recreated = Page::default();
        AutoSaveBinding::new()
            .on_create(&mut recreated, &mut registry, Some(&args))
            .unwrap();

        assert_eq!(recreated, page);
    }

    #[test]
    fn restore_runs_once_per_instance() {
        let mut registry = restored_registry(None);
        let mut page = Page::default();
        let mut binding = AutoSaveBinding::new();

        binding.on_create(&mut page, &mut registry, Some(&launch_args())).unwrap();
        page.a = 1;

        assert!(!binding.on_create(&mut page, &mut registry, Some(&launch_args())).unwrap());
        assert_eq!(page.a, 1);
        assert!(binding.is_restored());
    }

    #[test]
    fn destroyed_binding_rejects_hooks() {
        let mut registry = restored_registry(None);
        let mut page = Page::default();
        let mut binding = AutoSaveBinding::with_key("page");

        binding.on_destroy(&mut registry).unwrap();
        assert!(binding.is_destroyed());
        assert_eq!(
            binding.on_create(&mut page, &mut registry, None),
            Err(LifecycleError::Destroyed("page".into()))
        );
        assert!(binding.on_destroy(&mut registry).is_err());
    }

    #[test]
    fn bindings_sharing_a_key_conflict() {
        let mut registry = restored_registry(None);
        let mut first = Page::default();
        let mut second = Page::default();

        AutoSaveBinding::new()
            .on_create(&mut first, &mut registry, None)
            .unwrap();
        assert_eq!(
            AutoSaveBinding::new().on_create(&mut second, &mut registry, None),
            Err(LifecycleError::DuplicateProvider(AUTO_SAVE_KEY.into()))
        );
    }

    #[test]
    fn state_errors_are_forwarded() {
        let mut args = Bundle::new();
        args.put("a", &String::from("ten"));

        let mut registry = restored_registry(None);
        let mut page = Page::default();
        let mut binding = AutoSaveBinding::new();

        let err = binding
            .on_create(&mut page, &mut registry, Some(&args))
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::State(StateError::TypeMismatch(TypeMismatchError { key: "a", .. }))
        ));
        assert!(!binding.is_restored());
    }
}
