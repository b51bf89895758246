//! Rendering boundary: everything a shading stage consumes each frame.
//!
//! # Invariants
//! - Renderers never mutate the scene or the camera.
//! - Shader parameters are resolved once, from an explicit name table, into a
//!   plain struct of byte offsets.
//! - Binding points are fixed for the life of the program.

mod params;
mod renderer;

pub use params::{FRAME_PARAMS, FrameParams, ParamBindings, RenderError, ShaderParam};
pub use renderer::{DebugTextRenderer, Renderer};

/// Fixed binding points inside bind group 0.
pub mod bindings {
    /// Per-frame parameters (`FrameParams`).
    pub const FRAME: u32 = 0;
    /// Primitive slot array.
    pub const PRIMITIVES: u32 = 1;
    /// Primitive count header.
    pub const HEADER: u32 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_points_are_distinct() {
        let all = [bindings::FRAME, bindings::PRIMITIVES, bindings::HEADER];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
