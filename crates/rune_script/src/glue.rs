// glue.rs - Native implementations behind the internal calls
//
// Each function validates its inputs before touching state: a stale handle
// or an unknown keycode is reported to the caller and nothing changes.

use rune_core::{EntityId, Vector3, WorldError};
use rune_services::Keycode;

use crate::call_table::{CallResult, NativeCallTable, NativeFn};
use crate::context::NativeContext;
use crate::diagnostics::Level;
use crate::error::CallError;
use crate::ffi::{Out, ScriptHandle};
use crate::internal_calls as calls;

macro_rules! add_internal_call {
    ($table:expr, $stub:expr, $shape:ident($func:path)) => {
        $table.register($stub.name, NativeFn::$shape($func));
    };
}

/// Register every engine-provided native call.
pub fn register_functions(table: &mut NativeCallTable) {
    add_internal_call!(table, calls::NATIVE_LOG, Log(native_log));
    add_internal_call!(table, calls::NATIVE_LOG_VECTOR3, VectorMap(native_log_vector3));
    add_internal_call!(table, calls::NATIVE_LOG_VECTOR3_DOT, VectorReduce(native_log_vector3_dot));

    add_internal_call!(table, calls::ENTITY_GET_TRANSLATION, HandleVectorQuery(entity_get_translation));
    add_internal_call!(table, calls::ENTITY_SET_TRANSLATION, HandleVectorMutation(entity_set_translation));
    add_internal_call!(table, calls::ENTITY_GET_SCALE, HandleVectorQuery(entity_get_scale));
    add_internal_call!(table, calls::ENTITY_SET_SCALE, HandleVectorMutation(entity_set_scale));

    add_internal_call!(table, calls::INPUT_IS_KEY_HELD, KeyQuery(input_is_key_held));
    add_internal_call!(table, calls::INPUT_IS_KEY_DOWN, KeyQuery(input_is_key_down));
    add_internal_call!(table, calls::INPUT_IS_KEY_UP, KeyQuery(input_is_key_up));

    tracing::debug!(count = table.len(), "registered engine internal calls");
}

fn invalid(handle: ScriptHandle) -> impl FnOnce(WorldError) -> CallError {
    move |_| CallError::InvalidHandle(handle)
}

fn entity(handle: ScriptHandle) -> CallResult<EntityId> {
    if handle.is_none() {
        return Err(CallError::InvalidHandle(handle));
    }
    Ok(EntityId::from(handle))
}

fn keycode(raw: i32) -> CallResult<Keycode> {
    Keycode::from_raw(raw).ok_or(CallError::UnknownKeycode(raw))
}

// NativeLog

fn native_log(ctx: &NativeContext<'_>, text: &str, parameter: i32) {
    ctx.diagnostics()
        .record(Level::INFO, "NativeLog", &format!("{text}: {parameter}"));
}

fn native_log_vector3(ctx: &NativeContext<'_>, value: &Vector3, out: &mut Out<'_, Vector3>) -> CallResult {
    ctx.diagnostics().record(
        Level::INFO,
        "NativeLog_Vector3",
        &format!("Value: {}, {}, {}", value.x, value.y, value.z),
    );
    out.write(value.normalize_or_zero());
    Ok(())
}

fn native_log_vector3_dot(ctx: &NativeContext<'_>, value: &Vector3) -> f32 {
    ctx.diagnostics().record(
        Level::INFO,
        "NativeLog_Vector3Dot",
        &format!("Value: {}, {}, {}", value.x, value.y, value.z),
    );
    value.dot(*value)
}

// Entity

fn entity_get_translation(ctx: &NativeContext<'_>, handle: ScriptHandle, out: &mut Out<'_, Vector3>) -> CallResult {
    let translation = ctx.world().translation(entity(handle)?).map_err(invalid(handle))?;
    out.write(translation);
    Ok(())
}

fn entity_set_translation(ctx: &mut NativeContext<'_>, handle: ScriptHandle, value: &Vector3) -> CallResult {
    let id = entity(handle)?;
    ctx.world_mut().set_translation(id, *value).map_err(invalid(handle))
}

fn entity_get_scale(ctx: &NativeContext<'_>, handle: ScriptHandle, out: &mut Out<'_, Vector3>) -> CallResult {
    let scale = ctx.world().scale(entity(handle)?).map_err(invalid(handle))?;
    out.write(scale);
    Ok(())
}

fn entity_set_scale(ctx: &mut NativeContext<'_>, handle: ScriptHandle, value: &Vector3) -> CallResult {
    let id = entity(handle)?;
    ctx.world_mut().set_scale(id, *value).map_err(invalid(handle))
}

// Input

fn input_is_key_held(ctx: &NativeContext<'_>, raw: i32) -> CallResult<bool> {
    Ok(ctx.input().is_key_held(keycode(raw)?))
}

fn input_is_key_down(ctx: &NativeContext<'_>, raw: i32) -> CallResult<bool> {
    Ok(ctx.input().is_key_down(keycode(raw)?))
}

fn input_is_key_up(ctx: &NativeContext<'_>, raw: i32) -> CallResult<bool> {
    Ok(ctx.input().is_key_up(keycode(raw)?))
}
