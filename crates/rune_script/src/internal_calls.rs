//! Script-side declarations of the native call table
//!
//! Every call a script can make is declared here once, by qualified name and
//! signature. A module starts from [`CORE_STUBS`]; binding turns the
//! declarations into an [`InternalCalls`] of typed function pointers.

use crate::call_table::{
    BoundTable, HandleVectorMutationFn, HandleVectorQueryFn, KeyQueryFn, LogFn, NativeFn, VectorMapFn,
    VectorReduceFn,
};
use crate::signature::{Signature, StubDecl};

pub const NATIVE_LOG: StubDecl = StubDecl::new("Rune.InternalCalls::NativeLog", Signature::LOG);
pub const NATIVE_LOG_VECTOR3: StubDecl = StubDecl::new("Rune.InternalCalls::NativeLog_Vector3", Signature::VECTOR_MAP);
pub const NATIVE_LOG_VECTOR3_DOT: StubDecl =
    StubDecl::new("Rune.InternalCalls::NativeLog_Vector3Dot", Signature::VECTOR_REDUCE);

pub const ENTITY_GET_TRANSLATION: StubDecl =
    StubDecl::new("Rune.InternalCalls::Entity_GetTranslation", Signature::HANDLE_VECTOR_QUERY);
pub const ENTITY_SET_TRANSLATION: StubDecl =
    StubDecl::new("Rune.InternalCalls::Entity_SetTranslation", Signature::HANDLE_VECTOR_MUTATION);
pub const ENTITY_GET_SCALE: StubDecl =
    StubDecl::new("Rune.InternalCalls::Entity_GetScale", Signature::HANDLE_VECTOR_QUERY);
pub const ENTITY_SET_SCALE: StubDecl =
    StubDecl::new("Rune.InternalCalls::Entity_SetScale", Signature::HANDLE_VECTOR_MUTATION);

pub const INPUT_IS_KEY_HELD: StubDecl = StubDecl::new("Rune.InternalCalls::Input_IsKeyHeld", Signature::KEY_QUERY);
pub const INPUT_IS_KEY_DOWN: StubDecl = StubDecl::new("Rune.InternalCalls::Input_IsKeyDown", Signature::KEY_QUERY);
pub const INPUT_IS_KEY_UP: StubDecl = StubDecl::new("Rune.InternalCalls::Input_IsKeyUp", Signature::KEY_QUERY);

/// Declarations every script module carries.
pub const CORE_STUBS: &[StubDecl] = &[
    NATIVE_LOG,
    NATIVE_LOG_VECTOR3,
    NATIVE_LOG_VECTOR3_DOT,
    ENTITY_GET_TRANSLATION,
    ENTITY_SET_TRANSLATION,
    ENTITY_GET_SCALE,
    ENTITY_SET_SCALE,
    INPUT_IS_KEY_HELD,
    INPUT_IS_KEY_DOWN,
    INPUT_IS_KEY_UP,
];

/// The bound call table of one loaded module.
///
/// Resolved once at load; a call is a plain function pointer invocation.
#[derive(Clone, Copy)]
pub struct InternalCalls {
    pub(crate) native_log: LogFn,
    pub(crate) native_log_vector3: VectorMapFn,
    pub(crate) native_log_vector3_dot: VectorReduceFn,
    pub(crate) entity_get_translation: HandleVectorQueryFn,
    pub(crate) entity_set_translation: HandleVectorMutationFn,
    pub(crate) entity_get_scale: HandleVectorQueryFn,
    pub(crate) entity_set_scale: HandleVectorMutationFn,
    pub(crate) input_is_key_held: KeyQueryFn,
    pub(crate) input_is_key_down: KeyQueryFn,
    pub(crate) input_is_key_up: KeyQueryFn,
}

impl InternalCalls {
    /// Extract the core entries from a successful binding.
    ///
    /// `None` if the binding lacks one of [`CORE_STUBS`]; a binding produced
    /// from a module's declarations always contains them.
    pub(crate) fn resolve(bound: &BoundTable) -> Option<Self> {
        Some(Self {
            native_log: match bound.get(NATIVE_LOG.name)? {
                NativeFn::Log(f) => f,
                _ => return None,
            },
            native_log_vector3: match bound.get(NATIVE_LOG_VECTOR3.name)? {
                NativeFn::VectorMap(f) => f,
                _ => return None,
            },
            native_log_vector3_dot: match bound.get(NATIVE_LOG_VECTOR3_DOT.name)? {
                NativeFn::VectorReduce(f) => f,
                _ => return None,
            },
            entity_get_translation: handle_query(bound, ENTITY_GET_TRANSLATION)?,
            entity_set_translation: handle_mutation(bound, ENTITY_SET_TRANSLATION)?,
            entity_get_scale: handle_query(bound, ENTITY_GET_SCALE)?,
            entity_set_scale: handle_mutation(bound, ENTITY_SET_SCALE)?,
            input_is_key_held: key_query(bound, INPUT_IS_KEY_HELD)?,
            input_is_key_down: key_query(bound, INPUT_IS_KEY_DOWN)?,
            input_is_key_up: key_query(bound, INPUT_IS_KEY_UP)?,
        })
    }
}

impl std::fmt::Debug for InternalCalls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(CORE_STUBS.iter().map(|stub| stub.name)).finish()
    }
}

fn handle_query(bound: &BoundTable, stub: StubDecl) -> Option<HandleVectorQueryFn> {
    match bound.get(stub.name)? {
        NativeFn::HandleVectorQuery(f) => Some(f),
        _ => None,
    }
}

fn handle_mutation(bound: &BoundTable, stub: StubDecl) -> Option<HandleVectorMutationFn> {
    match bound.get(stub.name)? {
        NativeFn::HandleVectorMutation(f) => Some(f),
        _ => None,
    }
}

fn key_query(bound: &BoundTable, stub: StubDecl) -> Option<KeyQueryFn> {
    match bound.get(stub.name)? {
        NativeFn::KeyQuery(f) => Some(f),
        _ => None,
    }
}
