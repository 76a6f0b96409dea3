//! Rune Scripting Bridge
//!
//! Connects script modules to the native engine.
//!
//! ## Architecture
//!
//! - **Call table:** named native functions with typed signatures, bound once
//!   per module load; a module whose declarations do not all match is rejected
//! - **Façades:** [`Entity`], [`Input`] and [`NativeLog`] are the only way a
//!   script reaches native state
//! - **Lifecycle:** [`ScriptEngine`] drives one [`ScriptInstance`] per
//!   scripted entity through `OnCreate` and `OnUpdate`

pub mod call_table;
pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod entity;
pub mod error;
pub mod ffi;
pub mod glue;
pub mod input;
pub mod internal_calls;
pub mod lifecycle;
pub mod module;
pub mod native_log;
pub mod signature;

pub use call_table::{CallResult, NativeCallTable, NativeFn};
pub use context::{NativeContext, ScriptContext};
pub use diagnostics::{DiagnosticRecord, DiagnosticsSink, Level, MemorySink, TracingSink};
pub use engine::{FrameReport, ScriptEngine};
pub use entity::Entity;
pub use error::{BindingError, CallError, LifecycleError, ModuleLoadError, ScriptEngineError, ScriptError};
pub use ffi::ScriptHandle;
pub use input::Input;
pub use lifecycle::{Hooks, LifecycleState, ScriptBehaviour, ScriptInstance};
pub use module::{LoadedModule, ScriptClass, ScriptModule};
pub use native_log::NativeLog;
pub use signature::{CallClass, ParamKind, ReturnKind, Signature, StubDecl};

pub use rune_services::Keycode;
