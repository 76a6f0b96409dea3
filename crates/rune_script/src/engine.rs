//! Script engine host
//!
//! Owns the native call table, the loaded modules and one script instance
//! per scripted entity, and drives their lifecycle frame by frame.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use rune_core::{EntityId, World};
use rune_services::InputSystem;

use crate::call_table::NativeCallTable;
use crate::context::NativeContext;
use crate::diagnostics::{DiagnosticsSink, Level};
use crate::error::{LifecycleError, ModuleLoadError, ScriptEngineError};
use crate::lifecycle::{Hooks, LifecycleState, ScriptInstance};
use crate::module::{LoadedModule, ScriptModule};

/// What happened during one [`ScriptEngine::update`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    /// Instances that left `Uninitialized` this frame.
    pub created: usize,
    /// `OnUpdate` hooks that ran and returned without error.
    pub updated: usize,
    pub destroyed: usize,
    /// Hook failures. The instances involved keep running.
    pub errors: Vec<LifecycleError>,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Drives script instances against the native world.
///
/// Single-threaded: hooks are dispatched one at a time through `&mut self`,
/// and native state is shared between instances without locking. Running
/// scripts on more than one thread would need a synchronization layer over
/// the world and input state that does not exist here.
pub struct ScriptEngine {
    calls: NativeCallTable,
    diagnostics: Rc<dyn DiagnosticsSink>,
    modules: HashMap<String, LoadedModule>,
    instances: BTreeMap<EntityId, ScriptInstance>,
}

impl ScriptEngine {
    /// An engine with every engine-provided native call registered.
    pub fn new(diagnostics: Rc<dyn DiagnosticsSink>) -> Self {
        Self::with_call_table(NativeCallTable::with_engine_functions(), diagnostics)
    }

    pub fn with_call_table(calls: NativeCallTable, diagnostics: Rc<dyn DiagnosticsSink>) -> Self {
        Self {
            calls,
            diagnostics,
            modules: HashMap::new(),
            instances: BTreeMap::new(),
        }
    }

    pub fn call_table(&self) -> &NativeCallTable {
        &self.calls
    }

    pub fn diagnostics(&self) -> &dyn DiagnosticsSink {
        &*self.diagnostics
    }

    /// Bind and register a module. A failed load registers nothing.
    pub fn load_module(&mut self, module: ScriptModule) -> Result<(), ModuleLoadError> {
        if self.modules.contains_key(module.name()) {
            return Err(ModuleLoadError::AlreadyLoaded(module.name().to_string()));
        }
        match module.load(&self.calls) {
            Ok(loaded) => {
                self.modules.insert(loaded.name().to_string(), loaded);
                Ok(())
            }
            Err(err) => {
                tracing::error!("{err}");
                Err(err)
            }
        }
    }

    pub fn module(&self, name: &str) -> Option<&LoadedModule> {
        self.modules.get(name)
    }

    /// Attach a new instance of `class` to `entity`.
    ///
    /// The instance is created on the next [`update`](Self::update).
    pub fn instantiate(
        &mut self,
        world: &World,
        module: &str,
        class: &str,
        entity: EntityId,
    ) -> Result<(), ScriptEngineError> {
        if entity.is_none() {
            return Err(ScriptEngineError::NullHandle);
        }
        if !world.contains(entity) {
            return Err(ScriptEngineError::DeadEntity(entity));
        }
        if self.instances.contains_key(&entity) {
            return Err(ScriptEngineError::AlreadyScripted(entity));
        }
        let loaded = self
            .modules
            .get(module)
            .ok_or_else(|| ScriptEngineError::UnknownModule(module.to_string()))?;
        let instance = loaded
            .instantiate(class, entity)
            .ok_or_else(|| ScriptEngineError::UnknownClass {
                module: module.to_string(),
                class: class.to_string(),
            })?;

        tracing::debug!(entity = %entity, class, "instantiated script");
        self.instances.insert(entity, instance);
        Ok(())
    }

    /// Run one frame.
    ///
    /// Instances whose entity no longer exists are destroyed first and get no
    /// further hook calls. Remaining instances are dispatched in ascending
    /// entity id order; new ones run `OnCreate` and then their first
    /// `OnUpdate` in the same frame.
    pub fn update(
        &mut self,
        world: &mut World,
        input: &InputSystem,
        delta: f32,
    ) -> Result<FrameReport, ScriptEngineError> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(LifecycleError::InvalidDelta(delta).into());
        }
        let mut report = FrameReport::default();

        let dead: Vec<EntityId> = self
            .instances
            .keys()
            .copied()
            .filter(|id| !world.contains(*id))
            .collect();
        for id in dead {
            if let Some(mut instance) = self.instances.remove(&id) {
                instance.destroy()?;
                tracing::debug!(entity = %id, class = instance.class(), "entity gone, script destroyed");
                report.destroyed += 1;
            }
        }

        let diagnostics = &*self.diagnostics;
        let mut native = NativeContext::new(world, input, diagnostics);
        for instance in self.instances.values_mut() {
            if instance.state() == LifecycleState::Uninitialized {
                if let Err(err) = instance.create(&mut native) {
                    report_hook_error(diagnostics, instance, &err);
                    report.errors.push(err);
                }
                report.created += 1;
            }
            match instance.update(&mut native, delta) {
                Ok(()) if instance.hooks().contains(Hooks::ON_UPDATE) => report.updated += 1,
                Ok(()) => {}
                Err(err) => {
                    report_hook_error(diagnostics, instance, &err);
                    report.errors.push(err);
                }
            }
        }

        Ok(report)
    }

    /// Detach and destroy the instance bound to `entity`.
    pub fn destroy(&mut self, entity: EntityId) -> Result<(), ScriptEngineError> {
        let mut instance = self
            .instances
            .remove(&entity)
            .ok_or(ScriptEngineError::NotScripted(entity))?;
        instance.destroy()?;
        tracing::debug!(entity = %entity, class = instance.class(), "script destroyed");
        Ok(())
    }

    pub fn instance_state(&self, entity: EntityId) -> Option<LifecycleState> {
        self.instances.get(&entity).map(ScriptInstance::state)
    }

    pub fn instance(&self, entity: EntityId) -> Option<&ScriptInstance> {
        self.instances.get(&entity)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

fn report_hook_error(diagnostics: &dyn DiagnosticsSink, instance: &ScriptInstance, err: &LifecycleError) {
    diagnostics.record(Level::ERROR, instance.class(), &err.to_string());
}
