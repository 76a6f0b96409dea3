//! Input façade
//!
//! Key queries for scripts. Each call reads the live native key state; no
//! frame snapshot is taken on the script side.

use rune_services::Keycode;

use crate::call_table::CallResult;
use crate::context::ScriptContext;

pub struct Input;

impl Input {
    /// True while `key` is down.
    pub fn is_key_held(ctx: &ScriptContext<'_, '_>, key: Keycode) -> CallResult<bool> {
        (ctx.calls().input_is_key_held)(ctx.native(), key.to_raw())
    }

    /// True on the frame `key` went down.
    pub fn is_key_down(ctx: &ScriptContext<'_, '_>, key: Keycode) -> CallResult<bool> {
        (ctx.calls().input_is_key_down)(ctx.native(), key.to_raw())
    }

    /// True on the frame `key` went up.
    pub fn is_key_up(ctx: &ScriptContext<'_, '_>, key: Keycode) -> CallResult<bool> {
        (ctx.calls().input_is_key_up)(ctx.native(), key.to_raw())
    }
}
