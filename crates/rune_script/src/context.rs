//! Call contexts
//!
//! [`NativeContext`] is what native glue sees: the world, the input system
//! and the diagnostics sink. [`ScriptContext`] is what a script hook sees: its
//! own entity, a sink, and the module's bound call table. Scripts never reach
//! the native context directly; the façades pass it through.

use rune_core::World;
use rune_services::InputSystem;

use crate::diagnostics::{DiagnosticsSink, Level};
use crate::entity::Entity;
use crate::internal_calls::InternalCalls;

/// Native state reachable from call-table implementations.
pub struct NativeContext<'a> {
    world: &'a mut World,
    input: &'a InputSystem,
    diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a> NativeContext<'a> {
    pub fn new(world: &'a mut World, input: &'a InputSystem, diagnostics: &'a dyn DiagnosticsSink) -> Self {
        Self {
            world,
            input,
            diagnostics,
        }
    }

    pub fn world(&self) -> &World {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut *self.world
    }

    pub fn input(&self) -> &InputSystem {
        self.input
    }

    pub fn diagnostics(&self) -> &dyn DiagnosticsSink {
        self.diagnostics
    }
}

/// What a script hook is given for the duration of one call.
pub struct ScriptContext<'c, 'n> {
    calls: &'c InternalCalls,
    native: &'c mut NativeContext<'n>,
    entity: Entity,
    class: &'c str,
}

impl<'c, 'n> ScriptContext<'c, 'n> {
    pub(crate) fn new(
        calls: &'c InternalCalls,
        native: &'c mut NativeContext<'n>,
        entity: Entity,
        class: &'c str,
    ) -> Self {
        Self {
            calls,
            native,
            entity,
            class,
        }
    }

    /// The entity this script object is bound to.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Fully qualified class name of the running script.
    pub fn class(&self) -> &str {
        self.class
    }

    pub fn log(&self, level: Level, message: &str) {
        self.native.diagnostics().record(level, self.class, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    pub(crate) fn calls(&self) -> &InternalCalls {
        self.calls
    }

    pub(crate) fn native(&self) -> &NativeContext<'n> {
        &*self.native
    }

    pub(crate) fn native_mut(&mut self) -> &mut NativeContext<'n> {
        &mut *self.native
    }
}
