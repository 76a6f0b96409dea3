//! Entity façade
//!
//! A script's view of a native entity: a handle and property accessors that
//! round-trip through the bound call table. Nothing is cached on the script
//! side; every read observes the native state at that moment.

use rune_core::{EntityId, Vector3};

use crate::call_table::{CallResult, HandleVectorQueryFn};
use crate::context::ScriptContext;
use crate::error::CallError;
use crate::ffi::{Out, ScriptHandle};

/// Handle to a native entity as seen from script code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Entity {
    handle: ScriptHandle,
}

impl Entity {
    pub fn from_handle(handle: ScriptHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> ScriptHandle {
        self.handle
    }

    pub fn id(&self) -> EntityId {
        EntityId::from(self.handle)
    }

    pub fn translation(&self, ctx: &ScriptContext<'_, '_>) -> CallResult<Vector3> {
        self.query(ctx, ctx.calls().entity_get_translation, "Entity_GetTranslation")
    }

    pub fn set_translation(&self, ctx: &mut ScriptContext<'_, '_>, translation: Vector3) -> CallResult {
        let set = ctx.calls().entity_set_translation;
        set(ctx.native_mut(), self.handle, &translation)
    }

    pub fn scale(&self, ctx: &ScriptContext<'_, '_>) -> CallResult<Vector3> {
        self.query(ctx, ctx.calls().entity_get_scale, "Entity_GetScale")
    }

    pub fn set_scale(&self, ctx: &mut ScriptContext<'_, '_>, scale: Vector3) -> CallResult {
        let set = ctx.calls().entity_set_scale;
        set(ctx.native_mut(), self.handle, &scale)
    }

    fn query(&self, ctx: &ScriptContext<'_, '_>, get: HandleVectorQueryFn, call: &'static str) -> CallResult<Vector3> {
        let mut slot = None;
        get(ctx.native(), self.handle, &mut Out::new(&mut slot))?;
        slot.ok_or(CallError::IncompleteOut(call))
    }
}

impl From<EntityId> for Entity {
    fn from(id: EntityId) -> Self {
        Self::from_handle(ScriptHandle::from(id))
    }
}
