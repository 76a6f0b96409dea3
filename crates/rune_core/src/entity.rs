//! Entity identifiers
//!
//! Entities are referenced by an opaque 64-bit id. The id carries no state;
//! the [`World`](crate::world::World) decides whether it still names a live
//! entity. Id `0` is reserved for "no entity".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity handle (opaque 64-bit id)
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The "no entity" id. Never assigned by a world.
    pub const NONE: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Serialize to 64-bit integer (boundary crossings, scene files)
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
