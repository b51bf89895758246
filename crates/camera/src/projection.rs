use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Kind of projection used to build the projection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionType {
    #[default]
    Perspective,
    Orthogonal,
}

/// Projection parameters.
///
/// `fov` is a vertical angle in degrees for perspective projections. For
/// orthogonal projections it is the visible height in world units, and the
/// visible width is `fov * aspect`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub kind: ProjectionType,
    pub fov: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            kind: ProjectionType::Perspective,
            fov: 45.0,
            aspect: 1.0,
            z_near: 0.01,
            z_far: 1000.0,
        }
    }
}

impl Projection {
    /// Right-handed projection matrix with a zero-to-one depth range.
    ///
    /// Degenerate parameters (for example `z_near == z_far`) are not rejected.
    pub fn matrix(&self) -> Mat4 {
        match self.kind {
            ProjectionType::Perspective => {
                Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.z_near, self.z_far)
            }
            ProjectionType::Orthogonal => {
                let half_w = self.fov * self.aspect / 2.0;
                let half_h = self.fov / 2.0;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.z_near, self.z_far)
            }
        }
    }
}
