//! Native call table
//!
//! The only channel through which a script can observe or change native
//! state. Native functions come in a closed set of shapes; each shape fixes
//! the signature and the call class. Query shapes receive the native context
//! by shared reference, so a query cannot mutate the world.
//!
//! Binding happens once per module load. Every stub the module declares must
//! resolve by exact name and signature, or nothing is bound.

use std::collections::HashMap;
use std::fmt;

use rune_core::Vector3;

use crate::context::NativeContext;
use crate::error::{BindingError, CallError};
use crate::ffi::{Out, ScriptHandle};
use crate::signature::{CallClass, Signature, StubDecl};

pub type CallResult<T = ()> = Result<T, CallError>;

pub type LogFn = fn(&NativeContext<'_>, &str, i32);
pub type VectorMapFn = fn(&NativeContext<'_>, &Vector3, &mut Out<'_, Vector3>) -> CallResult;
pub type VectorReduceFn = fn(&NativeContext<'_>, &Vector3) -> f32;
pub type HandleVectorQueryFn = fn(&NativeContext<'_>, ScriptHandle, &mut Out<'_, Vector3>) -> CallResult;
pub type HandleVectorMutationFn = fn(&mut NativeContext<'_>, ScriptHandle, &Vector3) -> CallResult;
pub type KeyQueryFn = fn(&NativeContext<'_>, i32) -> CallResult<bool>;

/// A native implementation, tagged by shape.
#[derive(Clone, Copy)]
pub enum NativeFn {
    /// `(str, i32) -> void`; writes to the diagnostics sink.
    Log(LogFn),
    /// `(in Vector3, out Vector3) -> void`
    VectorMap(VectorMapFn),
    /// `(in Vector3) -> f32`
    VectorReduce(VectorReduceFn),
    /// `(handle, out Vector3) -> void`
    HandleVectorQuery(HandleVectorQueryFn),
    /// `(handle, in Vector3) -> void`
    HandleVectorMutation(HandleVectorMutationFn),
    /// `(keycode) -> bool`
    KeyQuery(KeyQueryFn),
}

impl NativeFn {
    pub fn signature(&self) -> Signature {
        match self {
            NativeFn::Log(_) => Signature::LOG,
            NativeFn::VectorMap(_) => Signature::VECTOR_MAP,
            NativeFn::VectorReduce(_) => Signature::VECTOR_REDUCE,
            NativeFn::HandleVectorQuery(_) => Signature::HANDLE_VECTOR_QUERY,
            NativeFn::HandleVectorMutation(_) => Signature::HANDLE_VECTOR_MUTATION,
            NativeFn::KeyQuery(_) => Signature::KEY_QUERY,
        }
    }

    pub fn class(&self) -> CallClass {
        match self {
            NativeFn::Log(_) | NativeFn::HandleVectorMutation(_) => CallClass::Mutation,
            NativeFn::VectorMap(_)
            | NativeFn::VectorReduce(_)
            | NativeFn::HandleVectorQuery(_)
            | NativeFn::KeyQuery(_) => CallClass::Query,
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            NativeFn::Log(_) => "Log",
            NativeFn::VectorMap(_) => "VectorMap",
            NativeFn::VectorReduce(_) => "VectorReduce",
            NativeFn::HandleVectorQuery(_) => "HandleVectorQuery",
            NativeFn::HandleVectorMutation(_) => "HandleVectorMutation",
            NativeFn::KeyQuery(_) => "KeyQuery",
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn::{}{}", self.shape(), self.signature())
    }
}

/// Registry of native implementations, keyed by qualified name.
///
/// Populated by the host before any module loads. Entries are fixed once
/// modules are bound; there is no per-call lookup.
#[derive(Default)]
pub struct NativeCallTable {
    entries: HashMap<&'static str, NativeFn>,
}

impl NativeCallTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A table holding every engine-provided native call.
    pub fn with_engine_functions() -> Self {
        let mut table = Self::new();
        crate::glue::register_functions(&mut table);
        table
    }

    /// Register a native function.
    ///
    /// Returns the implementation previously registered under `name`, if any.
    pub fn register(&mut self, name: &'static str, func: NativeFn) -> Option<NativeFn> {
        let previous = self.entries.insert(name, func);
        if previous.is_some() {
            tracing::warn!(name, "replaced native call registration");
        } else {
            tracing::trace!(name, class = ?func.class(), "registered native call");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Resolve every declaration against the table.
    ///
    /// All failures are collected; if there is any, no binding is returned.
    pub fn bind(&self, stubs: &[StubDecl]) -> Result<BoundTable, Vec<BindingError>> {
        let mut bound = HashMap::with_capacity(stubs.len());
        let mut errors = Vec::new();

        for stub in stubs {
            match self.entries.get(stub.name) {
                None => errors.push(BindingError::Unresolved {
                    name: stub.name,
                    expected: stub.signature,
                }),
                Some(func) if func.signature() != stub.signature => {
                    errors.push(BindingError::SignatureMismatch {
                        name: stub.name,
                        declared: stub.signature,
                        native: func.signature(),
                    })
                }
                Some(func) => {
                    bound.insert(stub.name, *func);
                }
            }
        }

        if errors.is_empty() {
            Ok(BoundTable { entries: bound })
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for NativeCallTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCallTable")
            .field("count", &self.entries.len())
            .field("names", &self.names())
            .finish()
    }
}

/// The subset of a call table a module declared, after successful binding.
#[derive(Debug)]
pub struct BoundTable {
    entries: HashMap<&'static str, NativeFn>,
}

impl BoundTable {
    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{ParamKind, ReturnKind};

    fn key_held(_: &NativeContext<'_>, _: i32) -> CallResult<bool> {
        Ok(true)
    }

    fn set_nothing(_: &mut NativeContext<'_>, _: ScriptHandle, _: &Vector3) -> CallResult {
        Ok(())
    }

    #[test]
    fn shape_determines_signature_and_class() {
        let query = NativeFn::KeyQuery(key_held);
        assert_eq!(query.signature(), Signature::KEY_QUERY);
        assert_eq!(query.class(), CallClass::Query);
        let mutation = NativeFn::HandleVectorMutation(set_nothing);
        assert_eq!(mutation.class(), CallClass::Mutation);
    }

    #[test]
    fn bind_resolves_exact_matches() {
        let mut table = NativeCallTable::new();
        assert!(table.register("Test::KeyHeld", NativeFn::KeyQuery(key_held)).is_none());
        let bound = table
            .bind(&[StubDecl::new("Test::KeyHeld", Signature::KEY_QUERY)])
            .unwrap();
        assert_eq!(bound.len(), 1);
        assert!(matches!(bound.get("Test::KeyHeld"), Some(NativeFn::KeyQuery(_))));
    }

    #[test]
    fn bind_collects_every_failure() {
        let mut table = NativeCallTable::new();
        table.register("Test::KeyHeld", NativeFn::KeyQuery(key_held));
        let void_key = Signature {
            params: &[ParamKind::Keycode],
            ret: ReturnKind::Void,
        };
        let errors = table
            .bind(&[
                StubDecl::new("Test::KeyHeld", void_key),
                StubDecl::new("Test::Missing", Signature::LOG),
            ])
            .unwrap_err();
        assert_eq!(
            errors,
            vec![
                BindingError::SignatureMismatch {
                    name: "Test::KeyHeld",
                    declared: void_key,
                    native: Signature::KEY_QUERY,
                },
                BindingError::Unresolved {
                    name: "Test::Missing",
                    expected: Signature::LOG,
                },
            ]
        );
        assert!(errors[1].to_string().starts_with("unresolved native binding 'Test::Missing'"));
    }

    #[test]
    fn register_replaces_and_reports_previous() {
        let mut table = NativeCallTable::new();
        table.register("Test::Set", NativeFn::HandleVectorMutation(set_nothing));
        let previous = table.register("Test::Set", NativeFn::KeyQuery(key_held));
        assert!(matches!(previous, Some(NativeFn::HandleVectorMutation(_))));
        assert_eq!(table.len(), 1);
        assert!(matches!(table.get("Test::Set"), Some(NativeFn::KeyQuery(_))));
        assert_eq!(table.names(), vec!["Test::Set"]);
    }
}
