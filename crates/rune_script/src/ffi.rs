//! FFI layer between the engine and scripts
//!
//! Handle-based access to engine objects and caller-allocated out-parameters.

use std::fmt;

use rune_core::{EntityId, Marshal};

/// Opaque handle for script access. `0` means "no entity".
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptHandle(pub u64);

impl ScriptHandle {
    pub const NONE: Self = Self(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ScriptHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EntityId> for ScriptHandle {
    fn from(entity: EntityId) -> Self {
        ScriptHandle(entity.to_bits())
    }
}

impl From<ScriptHandle> for EntityId {
    fn from(handle: ScriptHandle) -> Self {
        EntityId::from_bits(handle.0)
    }
}

/// Caller-allocated storage the native side fills before returning.
///
/// The slot can only be written as a whole value, so a reader either sees a
/// fully populated `T` or nothing at all.
pub struct Out<'a, T: Marshal> {
    slot: &'a mut Option<T>,
}

impl<'a, T: Marshal> Out<'a, T> {
    /// Wrap a slot. Any stale content is discarded first.
    pub fn new(slot: &'a mut Option<T>) -> Self {
        *slot = None;
        Self { slot }
    }

    pub fn write(&mut self, value: T) {
        *self.slot = Some(value);
    }

    pub fn is_written(&self) -> bool {
        self.slot.is_some()
    }
}
