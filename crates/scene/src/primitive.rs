use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::material::Material;
use crate::slot::PrimitiveSlot;

/// Shape tag written at offset 0 of every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ShapeKind {
    Sphere = 1,
    Plane = 2,
    Rectangle = 3,
    Box = 4,
}

impl ShapeKind {
    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ShapeKind {
    type Error = SceneError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::Sphere),
            2 => Ok(Self::Plane),
            3 => Ok(Self::Rectangle),
            4 => Ok(Self::Box),
            other => Err(SceneError::UnknownShapeTag(other)),
        }
    }
}

/// Shape-specific data. The set of shapes is closed; adding one means adding
/// a tag and a branch in the slot encoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    Plane { normal: Vec3 },
    /// Extent along the rectangle's local X and Y axes.
    Rectangle { size: Vec2 },
    /// Full extent along local X, Y and Z.
    Box { size: Vec3 },
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Plane { .. } => ShapeKind::Plane,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Box { .. } => ShapeKind::Box,
        }
    }

    /// Reject values the shading stage cannot interpret.
    pub fn validate(&self) -> Result<(), SceneError> {
        let invalid = |reason| SceneError::InvalidShape {
            kind: self.kind(),
            reason,
        };
        match *self {
            Self::Sphere { radius } => {
                if !radius.is_finite() || radius < 0.0 {
                    return Err(invalid("radius must be finite and non-negative"));
                }
            }
            Self::Plane { normal } => {
                if !normal.is_finite() || normal.length_squared() == 0.0 {
                    return Err(invalid("normal must be finite and non-zero"));
                }
            }
            Self::Rectangle { size } => {
                if !size.is_finite() || size.min_element() < 0.0 {
                    return Err(invalid("size must be finite and non-negative"));
                }
            }
            Self::Box { size } => {
                if !size.is_finite() || size.min_element() < 0.0 {
                    return Err(invalid("size must be finite and non-negative"));
                }
            }
        }
        Ok(())
    }
}

/// A scene primitive: placement, material and shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub position: Vec3,
    /// Euler angles in degrees. Spheres and planes ignore it.
    pub orientation: Vec3,
    pub material: Material,
    pub shape: Shape,
}

impl Primitive {
    pub fn sphere(position: Vec3, radius: f32, material: Material) -> Self {
        Self {
            position,
            orientation: Vec3::ZERO,
            material,
            shape: Shape::Sphere { radius },
        }
    }

    pub fn plane(position: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            position,
            orientation: Vec3::ZERO,
            material,
            shape: Shape::Plane { normal },
        }
    }

    pub fn rectangle(position: Vec3, orientation: Vec3, size: Vec2, material: Material) -> Self {
        Self {
            position,
            orientation,
            material,
            shape: Shape::Rectangle { size },
        }
    }

    pub fn cuboid(position: Vec3, orientation: Vec3, size: Vec3, material: Material) -> Self {
        Self {
            position,
            orientation,
            material,
            shape: Shape::Box { size },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Encode into slot `slot` of `target`.
    ///
    /// Writes exactly `SLOT_SIZE` bytes at `slot * SLOT_SIZE`. Nothing is
    /// written if the slot does not fit or the shape is invalid.
    pub fn write_encoded(&self, target: &mut [u8], slot: usize) -> Result<(), SceneError> {
        self.shape.validate()?;
        PrimitiveSlot::from(self).write(target, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_tags() {
        assert_eq!(ShapeKind::Sphere.tag(), 1);
        assert_eq!(ShapeKind::Plane.tag(), 2);
        assert_eq!(ShapeKind::Rectangle.tag(), 3);
        assert_eq!(ShapeKind::Box.tag(), 4);
        assert!(matches!(
            ShapeKind::try_from(0),
            Err(SceneError::UnknownShapeTag(0))
        ));
    }

    #[test]
    fn sphere_and_plane_have_no_orientation() {
        let s = Primitive::sphere(Vec3::ONE, 1.0, Material::default());
        let p = Primitive::plane(Vec3::ZERO, Vec3::Y, Material::default());
        assert_eq!(s.orientation, Vec3::ZERO);
        assert_eq!(p.orientation, Vec3::ZERO);
        assert_eq!(s.kind(), ShapeKind::Sphere);
        assert_eq!(p.kind(), ShapeKind::Plane);
    }

    #[test]
    fn validation_rejects_malformed_shapes() {
        assert!(Shape::Sphere { radius: -1.0 }.validate().is_err());
        assert!(Shape::Sphere { radius: f32::NAN }.validate().is_err());
        assert!(Shape::Plane { normal: Vec3::ZERO }.validate().is_err());
        assert!(Shape::Rectangle { size: Vec2::new(1.0, -0.1) }.validate().is_err());
        assert!(Shape::Box { size: Vec3::new(1.0, f32::INFINITY, 1.0) }.validate().is_err());

        assert!(Shape::Sphere { radius: 0.0 }.validate().is_ok());
        assert!(Shape::Plane { normal: Vec3::Y }.validate().is_ok());
        assert!(Shape::Rectangle { size: Vec2::ONE }.validate().is_ok());
        assert!(Shape::Box { size: Vec3::splat(2.0) }.validate().is_ok());
    }

    #[test]
    fn invalid_shape_leaves_buffer_untouched() {
        let mut buf = vec![0xAB_u8; 256];
        let bad = Primitive::sphere(Vec3::ZERO, -2.0, Material::default());
        let err = bad.write_encoded(&mut buf, 1).unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidShape {
                kind: ShapeKind::Sphere,
                ..
            }
        ));
        assert!(buf.iter().all(|&b| b == 0xAB));
    }
}
