use glam::{Mat4, Vec2, Vec3};
use prism_camera::Camera;
use prism_time::Timer;
use serde::{Deserialize, Serialize};

/// Errors from the rendering boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("shader parameter `{0}` not found in the program")]
    MissingParam(&'static str),
    #[error("parameter block needs {needed} bytes, buffer has {len}")]
    BufferTooSmall { needed: usize, len: usize },
    #[error("{requested} primitive slots requested, backend supports 1..={limit}")]
    SlotLimit { requested: usize, limit: usize },
}

/// Every per-frame parameter the shading stage reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderParam {
    CameraFov,
    ScreenSize,
    CameraPosition,
    ViewMatrix,
    CameraModelMatrix,
    Time,
}

impl ShaderParam {
    /// Bytes the value occupies.
    pub fn size(self) -> usize {
        match self {
            Self::CameraFov | Self::Time => 4,
            Self::ScreenSize => 8,
            Self::CameraPosition => 12,
            Self::ViewMatrix | Self::CameraModelMatrix => 64,
        }
    }
}

/// Parameter ids and the member names the shader declares for them.
pub const FRAME_PARAMS: [(ShaderParam, &str); 6] = [
    (ShaderParam::CameraFov, "camera_fov"),
    (ShaderParam::ScreenSize, "screen_size"),
    (ShaderParam::CameraPosition, "camera_position"),
    (ShaderParam::ViewMatrix, "view_matrix"),
    (ShaderParam::CameraModelMatrix, "camera_model_matrix"),
    (ShaderParam::Time, "time"),
];

/// Values for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    /// Degrees for perspective cameras.
    pub camera_fov: f32,
    /// Framebuffer size in pixels.
    pub screen_size: Vec2,
    pub camera_position: Vec3,
    pub view_matrix: Mat4,
    pub camera_model_matrix: Mat4,
    /// Seconds since the timer started.
    pub time: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            camera_fov: 45.0,
            screen_size: Vec2::ONE,
            camera_position: Vec3::ZERO,
            view_matrix: Mat4::IDENTITY,
            camera_model_matrix: Mat4::IDENTITY,
            time: 0.0,
        }
    }
}

impl FrameParams {
    /// Snapshot the camera and timer for this frame.
    pub fn capture(camera: &Camera, timer: &Timer, screen_size: Vec2) -> Self {
        Self {
            camera_fov: camera.fov(),
            screen_size,
            camera_position: camera.position(),
            view_matrix: *camera.view_matrix(),
            camera_model_matrix: *camera.model_matrix(),
            time: timer.elapsed_seconds(),
        }
    }
}

/// Byte offsets of each parameter inside the program's parameter block.
///
/// Built once by [`ParamBindings::resolve`] when the shading program is set
/// up; afterwards writing a frame needs no name lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamBindings {
    pub camera_fov: usize,
    pub screen_size: usize,
    pub camera_position: usize,
    pub view_matrix: usize,
    pub camera_model_matrix: usize,
    pub time: usize,
}

impl ParamBindings {
    /// Look up every entry of [`FRAME_PARAMS`] through `lookup`, which maps a
    /// member name to its byte offset in the program.
    pub fn resolve<F>(mut lookup: F) -> Result<Self, RenderError>
    where
        F: FnMut(&str) -> Option<usize>,
    {
        let mut find = |param: ShaderParam| {
            let (_, name) = FRAME_PARAMS
                .iter()
                .copied()
                .find(|(p, _)| *p == param)
                .ok_or(RenderError::MissingParam("<unlisted>"))?;
            lookup(name).ok_or(RenderError::MissingParam(name))
        };
        let bindings = Self {
            camera_fov: find(ShaderParam::CameraFov)?,
            screen_size: find(ShaderParam::ScreenSize)?,
            camera_position: find(ShaderParam::CameraPosition)?,
            view_matrix: find(ShaderParam::ViewMatrix)?,
            camera_model_matrix: find(ShaderParam::CameraModelMatrix)?,
            time: find(ShaderParam::Time)?,
        };
        tracing::debug!(?bindings, "shader parameters resolved");
        Ok(bindings)
    }

    pub fn offset(&self, param: ShaderParam) -> usize {
        match param {
            ShaderParam::CameraFov => self.camera_fov,
            ShaderParam::ScreenSize => self.screen_size,
            ShaderParam::CameraPosition => self.camera_position,
            ShaderParam::ViewMatrix => self.view_matrix,
            ShaderParam::CameraModelMatrix => self.camera_model_matrix,
            ShaderParam::Time => self.time,
        }
    }

    /// Smallest block that holds every resolved parameter.
    pub fn block_size(&self) -> usize {
        FRAME_PARAMS
            .iter()
            .map(|(p, _)| self.offset(*p) + p.size())
            .max()
            .unwrap_or(0)
    }

    /// Serialize `params` into `out` at the resolved offsets.
    pub fn write(&self, params: &FrameParams, out: &mut [u8]) -> Result<(), RenderError> {
        let needed = self.block_size();
        if out.len() < needed {
            return Err(RenderError::BufferTooSmall {
                needed,
                len: out.len(),
            });
        }
        let mut put = |param: ShaderParam, bytes: &[u8]| {
            let at = self.offset(param);
            out[at..at + bytes.len()].copy_from_slice(bytes);
        };
        put(ShaderParam::CameraFov, bytemuck::bytes_of(&params.camera_fov));
        put(ShaderParam::ScreenSize, bytemuck::bytes_of(&params.screen_size.to_array()));
        put(
            ShaderParam::CameraPosition,
            bytemuck::bytes_of(&params.camera_position.to_array()),
        );
        put(
            ShaderParam::ViewMatrix,
            bytemuck::bytes_of(&params.view_matrix.to_cols_array()),
        );
        put(
            ShaderParam::CameraModelMatrix,
            bytemuck::bytes_of(&params.camera_model_matrix.to_cols_array()),
        );
        put(ShaderParam::Time, bytemuck::bytes_of(&params.time));
        Ok(())
    }
}
