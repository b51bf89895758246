use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Surface response model. The discriminant is the tag written to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u32)]
pub enum MaterialType {
    LightEmitter = 0,
    #[default]
    Lambert = 1,
    Metal = 2,
    Dielectric = 3,
}

impl MaterialType {
    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for MaterialType {
    type Error = SceneError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::LightEmitter),
            1 => Ok(Self::Lambert),
            2 => Ok(Self::Metal),
            3 => Ok(Self::Dielectric),
            other => Err(SceneError::UnknownMaterialTag(other)),
        }
    }
}

/// Material parameters shared by every primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialType,
    /// Base color, or emitted radiance scale for light emitters.
    pub albedo: Vec3,
    /// 0 is mirror-smooth, 1 is fully rough.
    pub roughness: f32,
    /// Index of refraction; glass is about 1.5.
    pub refraction_index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialType::Lambert,
            albedo: Vec3::ONE,
            roughness: 1.0,
            refraction_index: 1.5,
        }
    }
}

impl Material {
    pub fn lambert(albedo: Vec3) -> Self {
        Self {
            kind: MaterialType::Lambert,
            albedo,
            ..Self::default()
        }
    }

    pub fn metal(albedo: Vec3, roughness: f32) -> Self {
        Self {
            kind: MaterialType::Metal,
            albedo,
            roughness,
            ..Self::default()
        }
    }

    pub fn dielectric(refraction_index: f32) -> Self {
        Self {
            kind: MaterialType::Dielectric,
            roughness: 0.0,
            refraction_index,
            ..Self::default()
        }
    }

    pub fn emitter(radiance: Vec3) -> Self {
        Self {
            kind: MaterialType::LightEmitter,
            albedo: radiance,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_shader_constants() {
        assert_eq!(MaterialType::LightEmitter.tag(), 0);
        assert_eq!(MaterialType::Lambert.tag(), 1);
        assert_eq!(MaterialType::Metal.tag(), 2);
        assert_eq!(MaterialType::Dielectric.tag(), 3);
    }

    #[test]
    fn tag_conversion_rejects_unknown() {
        assert_eq!(MaterialType::try_from(2).unwrap(), MaterialType::Metal);
        assert!(matches!(
            MaterialType::try_from(7),
            Err(SceneError::UnknownMaterialTag(7))
        ));
    }

    #[test]
    fn default_material_is_white_lambert() {
        let m = Material::default();
        assert_eq!(m.kind, MaterialType::Lambert);
        assert_eq!(m.albedo, Vec3::ONE);
        assert_eq!(m.roughness, 1.0);
        assert_eq!(m.refraction_index, 1.5);
    }
}
