//! Script modules
//!
//! A module is built independently of the engine: a name, the stub
//! declarations it was compiled against, and its script classes. Loading a
//! module binds every declaration against the native call table. If any
//! declaration fails, the module is rejected as a whole and none of its
//! classes can be instantiated.

use std::collections::BTreeMap;

use rune_core::EntityId;

use crate::call_table::NativeCallTable;
use crate::error::{BindingError, ModuleLoadError};
use crate::internal_calls::{InternalCalls, CORE_STUBS};
use crate::lifecycle::{Hooks, ScriptBehaviour, ScriptInstance};
use crate::signature::StubDecl;

/// Constructs a fresh script object.
pub type ScriptFactory = fn() -> Box<dyn ScriptBehaviour>;

#[derive(Debug, Clone)]
pub struct ScriptClass {
    /// Qualified `<Module>.<Class>` name.
    pub name: String,
    pub hooks: Hooks,
    pub factory: ScriptFactory,
}

/// An unloaded script module.
#[derive(Debug, Clone)]
pub struct ScriptModule {
    name: String,
    stubs: Vec<StubDecl>,
    classes: Vec<ScriptClass>,
}

impl ScriptModule {
    /// A module carrying the core call declarations and no classes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stubs: CORE_STUBS.to_vec(),
            classes: Vec::new(),
        }
    }

    /// Add a declaration, replacing any earlier one with the same name.
    pub fn declare(mut self, stub: StubDecl) -> Self {
        match self.stubs.iter_mut().find(|s| s.name == stub.name) {
            Some(existing) => *existing = stub,
            None => self.stubs.push(stub),
        }
        self
    }

    /// Add a class. `class` is the unqualified name.
    pub fn class(mut self, class: &str, hooks: Hooks, factory: ScriptFactory) -> Self {
        self.classes.push(ScriptClass {
            name: format!("{}.{}", self.name, class),
            hooks,
            factory,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stubs(&self) -> &[StubDecl] {
        &self.stubs
    }

    pub fn classes(&self) -> &[ScriptClass] {
        &self.classes
    }

    /// Bind every declaration. All-or-nothing.
    pub fn load(self, table: &NativeCallTable) -> Result<LoadedModule, ModuleLoadError> {
        let mut classes = BTreeMap::new();
        for class in self.classes {
            if classes.contains_key(&class.name) {
                return Err(ModuleLoadError::DuplicateClass {
                    module: self.name,
                    class: class.name,
                });
            }
            classes.insert(class.name.clone(), class);
        }

        let bound = table.bind(&self.stubs).map_err(|errors| ModuleLoadError::Binding {
            module: self.name.clone(),
            errors,
        })?;

        let calls = InternalCalls::resolve(&bound).ok_or_else(|| ModuleLoadError::Binding {
            module: self.name.clone(),
            errors: CORE_STUBS
                .iter()
                .filter(|stub| bound.get(stub.name).map(|f| f.signature()) != Some(stub.signature))
                .map(|stub| BindingError::Unresolved {
                    name: stub.name,
                    expected: stub.signature,
                })
                .collect(),
        })?;

        tracing::info!(module = %self.name, classes = classes.len(), calls = bound.len(), "loaded script module");
        Ok(LoadedModule {
            name: self.name,
            calls,
            classes,
        })
    }
}

/// A module whose declarations are all bound.
#[derive(Debug)]
pub struct LoadedModule {
    name: String,
    calls: InternalCalls,
    classes: BTreeMap<String, ScriptClass>,
}

impl LoadedModule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self, name: &str) -> Option<&ScriptClass> {
        self.classes.get(name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Construct a script object bound to `entity`, in `Uninitialized`.
    pub fn instantiate(&self, class: &str, entity: EntityId) -> Option<ScriptInstance> {
        let class = self.classes.get(class)?;
        Some(ScriptInstance::new(
            class.name.clone(),
            class.hooks,
            entity,
            self.calls,
            (class.factory)(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal_calls::INPUT_IS_KEY_HELD;
    use crate::lifecycle::LifecycleState;
    use crate::signature::{ParamKind, ReturnKind, Signature};

    struct Idle;

    impl ScriptBehaviour for Idle {}

    fn idle() -> Box<dyn ScriptBehaviour> {
        Box::new(Idle)
    }

    #[test]
    fn load_and_instantiate() {
        let table = NativeCallTable::with_engine_functions();
        let module = ScriptModule::new("Test").class("Idle", Hooks::empty(), idle);
        assert_eq!(module.stubs().len(), CORE_STUBS.len());

        let loaded = module.load(&table).unwrap();
        assert_eq!(loaded.class_names().collect::<Vec<_>>(), vec!["Test.Idle"]);
        let instance = loaded.instantiate("Test.Idle", EntityId::from_bits(42)).unwrap();
        assert_eq!(instance.class(), "Test.Idle");
        assert_eq!(instance.entity().id(), EntityId::from_bits(42));
        assert_eq!(instance.state(), LifecycleState::Uninitialized);
        assert!(loaded.instantiate("Test.Missing", EntityId::from_bits(42)).is_none());
    }

    #[test]
    fn void_key_query_stub_fails_the_whole_load() {
        let table = NativeCallTable::with_engine_functions();
        let void_key = Signature {
            params: &[ParamKind::Keycode],
            ret: ReturnKind::Void,
        };
        let module = ScriptModule::new("Test")
            .declare(StubDecl::new(INPUT_IS_KEY_HELD.name, void_key))
            .class("Idle", Hooks::empty(), idle);
        assert_eq!(module.stubs().len(), CORE_STUBS.len());

        match module.load(&table) {
            Err(ModuleLoadError::Binding { module, errors }) => {
                assert_eq!(module, "Test");
                assert_eq!(
                    errors,
                    vec![BindingError::SignatureMismatch {
                        name: INPUT_IS_KEY_HELD.name,
                        declared: void_key,
                        native: Signature::KEY_QUERY,
                    }]
                );
            }
            other => panic!("expected binding failure, got {other:?}"),
        }
    }

    #[test]
    fn undeclared_native_fails_the_load() {
        let module = ScriptModule::new("Test").declare(StubDecl::new("Test.Native::Teleport", Signature::HANDLE_VECTOR_MUTATION));
        let err = module.load(&NativeCallTable::with_engine_functions()).unwrap_err();
        assert!(err.to_string().contains("unresolved native binding 'Test.Native::Teleport'"));
    }

    #[test]
    fn duplicate_classes_are_rejected() {
        let module = ScriptModule::new("Test")
            .class("Idle", Hooks::empty(), idle)
            .class("Idle", Hooks::ON_UPDATE, idle);
        assert_eq!(
            module.load(&NativeCallTable::with_engine_functions()).unwrap_err(),
            ModuleLoadError::DuplicateClass {
                module: "Test".into(),
                class: "Test.Idle".into(),
            }
        );
    }
}
