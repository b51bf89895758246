use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Byte alignment of `vec3`/`vec4` members under std140-style packing.
pub const VEC4_ALIGN: usize = 16;

/// Bytes a `vec3` occupies when it is followed by another vector member.
pub const VEC3_STRIDE: usize = 16;

/// Coordinate axis, used to spell out the order of Euler rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }

    /// Component of `v` along this axis.
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_units_are_orthonormal() {
        let axes = [Axis::X, Axis::Y, Axis::Z];
        for a in axes {
            assert_eq!(a.unit().length(), 1.0);
            for b in axes {
                if a != b {
                    assert_eq!(a.unit().dot(b.unit()), 0.0);
                }
            }
        }
    }

    #[test]
    fn axis_component_picks_matching_lane() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.component(v), 1.0);
        assert_eq!(Axis::Y.component(v), 2.0);
        assert_eq!(Axis::Z.component(v), 3.0);
    }
}
