//! Transform component
//!
//! Position, orientation and scale of an entity. Owned exclusively by the
//! native world; scripts only ever see copies of individual vectors.

use glam::Quat;

use crate::math::Vector3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Quat,
    pub scale: Vector3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vector3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vector3::ONE,
    };

    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_only_keeps_identity_rotation_and_scale() {
        let t = Transform::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.translation, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vector3::ONE);
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }
}
