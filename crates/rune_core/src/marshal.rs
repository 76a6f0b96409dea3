//! Value-type marshaling contract
//!
//! Value types cross the script boundary by address and by copy. Each one
//! publishes a [`ValueLayout`] computed from the Rust definition itself, and
//! call-table signatures carry that descriptor, so two sides that disagree on
//! a layout are caught when a module binds, not when memory is read.

use std::fmt;
use std::mem::{align_of, offset_of, size_of};

use bytemuck::Pod;

use crate::math::Vector3;

/// Primitive kind of a single field in a boundary value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    F32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
}

/// Byte layout of a value type as seen by the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueLayout {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: &'static [FieldLayout],
}

impl fmt::Display for ValueLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{:?}@{}", field.name, field.kind, field.offset)?;
        }
        write!(f, "}}[{}b]", self.size)
    }
}

/// A plain value type allowed to cross the boundary.
///
/// `Pod` guarantees the value is copied whole, with no padding and no
/// invalid bit patterns.
pub trait Marshal: Pod {
    const LAYOUT: ValueLayout;
}

impl Marshal for Vector3 {
    const LAYOUT: ValueLayout = ValueLayout {
        name: "Vector3",
        size: size_of::<Vector3>(),
        align: align_of::<Vector3>(),
        fields: &[
            FieldLayout {
                name: "x",
                offset: offset_of!(Vector3, x),
                kind: FieldKind::F32,
            },
            FieldLayout {
                name: "y",
                offset: offset_of!(Vector3, y),
                kind: FieldKind::F32,
            },
            FieldLayout {
                name: "z",
                offset: offset_of!(Vector3, z),
                kind: FieldKind::F32,
            },
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector3_layout_is_packed_xyz() {
        let layout = Vector3::LAYOUT;
        assert_eq!(layout.size, 12);
        assert_eq!(layout.align, 4);
        let offsets: Vec<_> = layout.fields.iter().map(|f| (f.name, f.offset)).collect();
        assert_eq!(offsets, vec![("x", 0), ("y", 4), ("z", 8)]);
        assert_eq!(layout.to_string(), "Vector3{x:F32@0,y:F32@4,z:F32@8}[12b]");
    }

    #[test]
    fn bytes_follow_field_order() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), Vector3::LAYOUT.size);
        for (field, expected) in Vector3::LAYOUT.fields.iter().zip([1.0f32, 2.0, 3.0]) {
            assert_eq!(&bytes[field.offset..field.offset + 4], &expected.to_ne_bytes());
        }
    }

    #[test]
    fn layouts_with_reordered_fields_differ() {
        const SWAPPED: ValueLayout = ValueLayout {
            name: "Vector3",
            size: 12,
            align: 4,
            fields: &[
                FieldLayout { name: "y", offset: 0, kind: FieldKind::F32 },
                FieldLayout { name: "x", offset: 4, kind: FieldKind::F32 },
                FieldLayout { name: "z", offset: 8, kind: FieldKind::F32 },
            ],
        };
        assert_ne!(Vector3::LAYOUT, SWAPPED);
    }
}
