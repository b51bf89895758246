use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use prism_common::{VEC3_STRIDE, VEC4_ALIGN};
use std::mem::offset_of;
use std::ops::Range;

use crate::error::SceneError;
use crate::material::{Material, MaterialType};
use crate::primitive::{Primitive, Shape, ShapeKind};

/// Bytes per primitive slot.
pub const SLOT_SIZE: usize = 128;

/// Byte offsets of each field from the start of a slot.
#[rustfmt::skip]
pub mod offsets {
    pub const TYPE: usize             = 0;
    pub const POSITION: usize         = 16;
    pub const ORIENTATION: usize      = 32;
    pub const SHAPE_SCALAR: usize     = 44;
    pub const SHAPE_VEC3: usize       = 48;
    pub const SHAPE_VEC2: usize       = 64;
    pub const SHAPE_VEC3B: usize      = 80;
    pub const MATERIAL_TYPE: usize    = 92;
    pub const ALBEDO: usize           = 96;
    pub const ROUGHNESS: usize        = 108;
    pub const REFRACTION_INDEX: usize = 112;
    pub const TAIL_PADDING: usize     = 116;
}

/// One encoded primitive, laid out exactly as the shading stage reads it.
///
/// `vec3` members start on 16-byte boundaries; scalars fill the 4 bytes after
/// a `vec3` where the layout allows. Padding is always zero.
///
/// _Must match the `Primitive` struct in the WGSL shader._
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PrimitiveSlot {
    pub kind: u32,
    _pad0: [u32; 3],
    pub position: [f32; 3],
    _pad1: u32,
    pub orientation: [f32; 3],
    /// Sphere radius.
    pub shape_scalar: f32,
    /// Plane normal.
    pub shape_vec3: [f32; 3],
    _pad2: u32,
    /// Rectangle size.
    pub shape_vec2: [f32; 2],
    _pad3: [u32; 2],
    /// Box size.
    pub shape_vec3b: [f32; 3],
    pub material_type: u32,
    pub albedo: [f32; 3],
    pub roughness: f32,
    pub refraction_index: f32,
    _pad4: [u32; 3],
}

const _: () = {
    assert!(size_of::<PrimitiveSlot>() == SLOT_SIZE);
    assert!(offset_of!(PrimitiveSlot, kind) == offsets::TYPE);
    assert!(offset_of!(PrimitiveSlot, position) == offsets::POSITION);
    assert!(offset_of!(PrimitiveSlot, orientation) == offsets::ORIENTATION);
    assert!(offset_of!(PrimitiveSlot, shape_scalar) == offsets::SHAPE_SCALAR);
    assert!(offset_of!(PrimitiveSlot, shape_vec3) == offsets::SHAPE_VEC3);
    assert!(offset_of!(PrimitiveSlot, shape_vec2) == offsets::SHAPE_VEC2);
    assert!(offset_of!(PrimitiveSlot, shape_vec3b) == offsets::SHAPE_VEC3B);
    assert!(offset_of!(PrimitiveSlot, material_type) == offsets::MATERIAL_TYPE);
    assert!(offset_of!(PrimitiveSlot, albedo) == offsets::ALBEDO);
    assert!(offset_of!(PrimitiveSlot, roughness) == offsets::ROUGHNESS);
    assert!(offset_of!(PrimitiveSlot, refraction_index) == offsets::REFRACTION_INDEX);
    assert!(offset_of!(PrimitiveSlot, _pad4) == offsets::TAIL_PADDING);

    // Every vec3 starts a 16-byte row.
    assert!(offsets::POSITION % VEC4_ALIGN == 0);
    assert!(offsets::ORIENTATION % VEC4_ALIGN == 0);
    assert!(offsets::SHAPE_VEC3 % VEC4_ALIGN == 0);
    assert!(offsets::SHAPE_VEC3B % VEC4_ALIGN == 0);
    assert!(offsets::ALBEDO % VEC4_ALIGN == 0);
    assert!(offsets::POSITION + VEC3_STRIDE == offsets::ORIENTATION);
    assert!(offsets::SHAPE_VEC3 + VEC3_STRIDE == offsets::SHAPE_VEC2);
    assert!(SLOT_SIZE % VEC4_ALIGN == 0);
};

/// Byte range of `slot` inside a buffer holding `len` bytes.
pub(crate) fn slot_range(len: usize, slot: usize) -> Result<Range<usize>, SceneError> {
    let capacity = len / SLOT_SIZE;
    if slot >= capacity {
        return Err(SceneError::SlotOutOfRange { slot, capacity });
    }
    let start = slot * SLOT_SIZE;
    Ok(start..start + SLOT_SIZE)
}

impl From<&Primitive> for PrimitiveSlot {
    fn from(p: &Primitive) -> Self {
        let mut slot = Self::zeroed();
        slot.kind = p.kind().tag();
        slot.position = p.position.to_array();
        slot.orientation = p.orientation.to_array();
        match p.shape {
            Shape::Sphere { radius } => slot.shape_scalar = radius,
            Shape::Plane { normal } => slot.shape_vec3 = normal.to_array(),
            Shape::Rectangle { size } => slot.shape_vec2 = size.to_array(),
            Shape::Box { size } => slot.shape_vec3b = size.to_array(),
        }
        slot.material_type = p.material.kind.tag();
        slot.albedo = p.material.albedo.to_array();
        slot.roughness = p.material.roughness;
        slot.refraction_index = p.material.refraction_index;
        slot
    }
}

impl TryFrom<PrimitiveSlot> for Primitive {
    type Error = SceneError;

    fn try_from(slot: PrimitiveSlot) -> Result<Self, Self::Error> {
        let shape = match ShapeKind::try_from(slot.kind)? {
            ShapeKind::Sphere => Shape::Sphere {
                radius: slot.shape_scalar,
            },
            ShapeKind::Plane => Shape::Plane {
                normal: Vec3::from_array(slot.shape_vec3),
            },
            ShapeKind::Rectangle => Shape::Rectangle {
                size: Vec2::from_array(slot.shape_vec2),
            },
            ShapeKind::Box => Shape::Box {
                size: Vec3::from_array(slot.shape_vec3b),
            },
        };
        Ok(Self {
            position: Vec3::from_array(slot.position),
            orientation: Vec3::from_array(slot.orientation),
            material: Material {
                kind: MaterialType::try_from(slot.material_type)?,
                albedo: Vec3::from_array(slot.albedo),
                roughness: slot.roughness,
                refraction_index: slot.refraction_index,
            },
            shape,
        })
    }
}

impl PrimitiveSlot {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Copy this slot into `target` at index `slot`.
    pub fn write(&self, target: &mut [u8], slot: usize) -> Result<(), SceneError> {
        let range = slot_range(target.len(), slot)?;
        tracing::trace!(slot, kind = self.kind, "encode slot");
        target[range].copy_from_slice(self.as_bytes());
        Ok(())
    }

    /// Decode slot `slot` from `source`.
    pub fn read(source: &[u8], slot: usize) -> Result<Self, SceneError> {
        let range = slot_range(source.len(), slot)?;
        Ok(bytemuck::pod_read_unaligned(&source[range]))
    }

    /// True when every padding word is zero.
    pub fn padding_is_zero(&self) -> bool {
        self._pad0 == [0; 3]
            && self._pad1 == 0
            && self._pad2 == 0
            && self._pad3 == [0; 2]
            && self._pad4 == [0; 3]
    }
}
