//! Bridge error types

use rune_core::EntityId;
use thiserror::Error;

use crate::ffi::ScriptHandle;
use crate::lifecycle::LifecycleState;
use crate::signature::Signature;

/// Failure of a single call-table invocation.
///
/// Returned to the calling script statement; the native side has not changed
/// any state when one of these is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("invalid entity handle {0}")]
    InvalidHandle(ScriptHandle),

    #[error("unknown keycode {0}")]
    UnknownKeycode(i32),

    #[error("native call '{0}' returned without writing its out parameter")]
    IncompleteOut(&'static str),
}

/// A stub that could not be matched to a native implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("unresolved native binding '{name}' {expected}")]
    Unresolved {
        name: &'static str,
        expected: Signature,
    },

    #[error("native binding '{name}' signature mismatch: script declares {declared}, native provides {native}")]
    SignatureMismatch {
        name: &'static str,
        declared: Signature,
        native: Signature,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleLoadError {
    #[error("module '{module}' failed to load: {}", summarize(.errors))]
    Binding {
        module: String,
        errors: Vec<BindingError>,
    },

    #[error("module '{0}' is already loaded")]
    AlreadyLoaded(String),

    #[error("module '{module}' declares class '{class}' more than once")]
    DuplicateClass { module: String, class: String },
}

fn summarize(errors: &[BindingError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error raised by a script hook.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Call(#[from] CallError),

    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    #[error("cannot {op} a script instance in state {state:?}")]
    InvalidTransition {
        op: &'static str,
        state: LifecycleState,
    },

    #[error("delta time {0} is not a finite, non-negative number")]
    InvalidDelta(f32),

    #[error("{class}.{hook} failed: {source}")]
    Hook {
        class: String,
        hook: &'static str,
        #[source]
        source: ScriptError,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptEngineError {
    #[error("no script module named '{0}' is loaded")]
    UnknownModule(String),

    #[error("module '{module}' has no class '{class}'")]
    UnknownClass { module: String, class: String },

    #[error("cannot attach a script to entity id 0")]
    NullHandle,

    #[error("entity {0} is not alive")]
    DeadEntity(EntityId),

    #[error("entity {0} already has a script instance")]
    AlreadyScripted(EntityId),

    #[error("entity {0} has no script instance")]
    NotScripted(EntityId),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
