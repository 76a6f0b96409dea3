//! Call-table signatures
//!
//! A signature lists each parameter's kind and passing direction, and embeds
//! the layout of every by-address value type. Script stubs and native
//! implementations are matched on name and on exact signature equality.

use std::fmt;

use rune_core::{Marshal, ValueLayout, Vector3};

const VECTOR3: &ValueLayout = &<Vector3 as Marshal>::LAYOUT;

/// How a single argument crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Opaque 64-bit entity handle, by value.
    Handle,
    /// Raw keycode integer, by value.
    Keycode,
    /// 32-bit signed integer, by value.
    Int,
    /// Borrowed UTF-8 text, copied by the callee if it needs to keep it.
    Str,
    /// Value type passed by address, read by the callee.
    In(&'static ValueLayout),
    /// Caller-allocated value type written by the callee.
    Out(&'static ValueLayout),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    Void,
    Bool,
    Float,
}

/// Whether a call may change native state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallClass {
    /// Returns data only; safe to repeat any number of times per frame.
    Query,
    /// Applied synchronously; visible to any query issued afterwards.
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: &'static [ParamKind],
    pub ret: ReturnKind,
}

impl Signature {
    pub const LOG: Self = Self {
        params: &[ParamKind::Str, ParamKind::Int],
        ret: ReturnKind::Void,
    };
    pub const VECTOR_MAP: Self = Self {
        params: &[ParamKind::In(VECTOR3), ParamKind::Out(VECTOR3)],
        ret: ReturnKind::Void,
    };
    pub const VECTOR_REDUCE: Self = Self {
        params: &[ParamKind::In(VECTOR3)],
        ret: ReturnKind::Float,
    };
    pub const HANDLE_VECTOR_QUERY: Self = Self {
        params: &[ParamKind::Handle, ParamKind::Out(VECTOR3)],
        ret: ReturnKind::Void,
    };
    pub const HANDLE_VECTOR_MUTATION: Self = Self {
        params: &[ParamKind::Handle, ParamKind::In(VECTOR3)],
        ret: ReturnKind::Void,
    };
    pub const KEY_QUERY: Self = Self {
        params: &[ParamKind::Keycode],
        ret: ReturnKind::Bool,
    };
}

/// A script-side declaration: a name and a signature with no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StubDecl {
    pub name: &'static str,
    pub signature: Signature,
}

impl StubDecl {
    pub const fn new(name: &'static str, signature: Signature) -> Self {
        Self { name, signature }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Handle => write!(f, "handle"),
            ParamKind::Keycode => write!(f, "keycode"),
            ParamKind::Int => write!(f, "i32"),
            ParamKind::Str => write!(f, "str"),
            ParamKind::In(layout) => write!(f, "in {layout}"),
            ParamKind::Out(layout) => write!(f, "out {layout}"),
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnKind::Void => write!(f, "void"),
            ReturnKind::Bool => write!(f, "bool"),
            ReturnKind::Float => write!(f, "f32"),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_directions_and_layouts() {
        assert_eq!(Signature::KEY_QUERY.to_string(), "(keycode) -> bool");
        assert_eq!(
            Signature::HANDLE_VECTOR_QUERY.to_string(),
            "(handle, out Vector3{x:F32@0,y:F32@4,z:F32@8}[12b]) -> void"
        );
    }

    #[test]
    fn direction_is_part_of_the_signature() {
        assert_ne!(Signature::HANDLE_VECTOR_QUERY, Signature::HANDLE_VECTOR_MUTATION);
        let void_key = Signature {
            params: &[ParamKind::Keycode],
            ret: ReturnKind::Void,
        };
        assert_ne!(void_key, Signature::KEY_QUERY);
    }
}
