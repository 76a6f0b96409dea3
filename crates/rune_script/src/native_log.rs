//! Logging calls routed through the native side.

use rune_core::Vector3;

use crate::call_table::CallResult;
use crate::context::ScriptContext;
use crate::error::CallError;
use crate::ffi::Out;

pub struct NativeLog;

impl NativeLog {
    /// Log `"<text>: <parameter>"` to the diagnostics sink.
    pub fn log(ctx: &ScriptContext<'_, '_>, text: &str, parameter: i32) {
        (ctx.calls().native_log)(ctx.native(), text, parameter)
    }

    /// Log a vector and get back its normalized value (zero stays zero).
    pub fn vector3(ctx: &ScriptContext<'_, '_>, value: Vector3) -> CallResult<Vector3> {
        let mut slot = None;
        (ctx.calls().native_log_vector3)(ctx.native(), &value, &mut Out::new(&mut slot))?;
        slot.ok_or(CallError::IncompleteOut("NativeLog_Vector3"))
    }

    /// Log a vector and get back its dot product with itself.
    pub fn vector3_dot(ctx: &ScriptContext<'_, '_>, value: Vector3) -> f32 {
        (ctx.calls().native_log_vector3_dot)(ctx.native(), &value)
    }
}
