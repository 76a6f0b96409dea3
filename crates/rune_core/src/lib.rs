//! Rune Engine Core
//!
//! Native-side state and the value types shared with scripts:
//! - Canonical boundary value types and their layout descriptors
//! - Entity ids and the world that owns entity transforms
//! - Variable-step frame clock

pub mod entity;
pub mod marshal;
pub mod math;
pub mod time;
pub mod transform;
pub mod world;

pub use entity::EntityId;
pub use marshal::{FieldKind, FieldLayout, Marshal, ValueLayout};
pub use math::Vector3;
pub use transform::Transform;
pub use world::{World, WorldError};

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
