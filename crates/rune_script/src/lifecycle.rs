//! Script lifecycle
//!
//! A script object is a [`ScriptBehaviour`] held by a [`ScriptInstance`]
//! that binds it to one entity. The instance owns the state machine
//!
//! ```text
//! Uninitialized -> Created -> Updating (repeated) -> Destroyed
//! ```
//!
//! and only dispatches the hooks its class declared in [`Hooks`].

use bitflags::bitflags;
use rune_core::EntityId;

use crate::context::{NativeContext, ScriptContext};
use crate::entity::Entity;
use crate::error::{LifecycleError, ScriptError};
use crate::internal_calls::InternalCalls;

bitflags! {
    /// Hooks a script class implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Hooks: u8 {
        const ON_CREATE = 1 << 0;
        const ON_UPDATE = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Uninitialized,
    Created,
    Updating,
    Destroyed,
}

/// Game logic attached to an entity.
///
/// Hooks run synchronously on the host thread; every call a hook makes
/// through `ctx` completes before the next statement runs.
pub trait ScriptBehaviour {
    /// Runs once, after the handle is bound and before the first update.
    fn on_create(&mut self, _ctx: &mut ScriptContext<'_, '_>) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Runs once per frame. `delta` is the host's elapsed time in seconds; it
    /// may be zero or large after a stall.
    fn on_update(&mut self, _ctx: &mut ScriptContext<'_, '_>, _delta: f32) -> Result<(), ScriptError> {
        Ok(())
    }
}

/// A script object bound to one entity.
pub struct ScriptInstance {
    class: String,
    hooks: Hooks,
    entity: Entity,
    calls: InternalCalls,
    state: LifecycleState,
    behaviour: Box<dyn ScriptBehaviour>,
}

impl ScriptInstance {
    pub(crate) fn new(
        class: String,
        hooks: Hooks,
        entity: EntityId,
        calls: InternalCalls,
        behaviour: Box<dyn ScriptBehaviour>,
    ) -> Self {
        Self {
            class,
            hooks,
            entity: Entity::from(entity),
            calls,
            state: LifecycleState::Uninitialized,
            behaviour,
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn hooks(&self) -> Hooks {
        self.hooks
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Run `OnCreate`. Valid only once, from `Uninitialized`.
    ///
    /// A failing hook still leaves the instance `Created`; the error is
    /// returned for the host to report.
    pub fn create(&mut self, native: &mut NativeContext<'_>) -> Result<(), LifecycleError> {
        if self.state != LifecycleState::Uninitialized {
            return Err(self.invalid("create"));
        }
        self.state = LifecycleState::Created;

        if !self.hooks.contains(Hooks::ON_CREATE) {
            return Ok(());
        }
        let mut ctx = ScriptContext::new(&self.calls, native, self.entity, &self.class);
        self.behaviour
            .on_create(&mut ctx)
            .map_err(|source| hook_error(&self.class, "OnCreate", source))
    }

    /// Run `OnUpdate(delta)`. Valid after `create` and before `destroy`.
    pub fn update(&mut self, native: &mut NativeContext<'_>, delta: f32) -> Result<(), LifecycleError> {
        match self.state {
            LifecycleState::Created | LifecycleState::Updating => {}
            _ => return Err(self.invalid("update")),
        }
        if !delta.is_finite() || delta < 0.0 {
            return Err(LifecycleError::InvalidDelta(delta));
        }
        self.state = LifecycleState::Updating;

        if !self.hooks.contains(Hooks::ON_UPDATE) {
            return Ok(());
        }
        let mut ctx = ScriptContext::new(&self.calls, native, self.entity, &self.class);
        self.behaviour
            .on_update(&mut ctx, delta)
            .map_err(|source| hook_error(&self.class, "OnUpdate", source))
    }

    /// Move to `Destroyed`. No hook runs after this.
    pub fn destroy(&mut self) -> Result<(), LifecycleError> {
        if self.state == LifecycleState::Destroyed {
            return Err(self.invalid("destroy"));
        }
        self.state = LifecycleState::Destroyed;
        Ok(())
    }

    fn invalid(&self, op: &'static str) -> LifecycleError {
        LifecycleError::InvalidTransition { op, state: self.state }
    }
}

impl std::fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("class", &self.class)
            .field("entity", &self.entity)
            .field("hooks", &self.hooks)
            .field("state", &self.state)
            .finish()
    }
}

fn hook_error(class: &str, hook: &'static str, source: ScriptError) -> LifecycleError {
    LifecycleError::Hook {
        class: class.to_string(),
        hook,
        source,
    }
}
