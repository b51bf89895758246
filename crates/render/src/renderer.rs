use std::fmt::Write as _;

use prism_scene::{Scene, Shape};

use crate::params::FrameParams;

/// Renderer-agnostic interface.
///
/// A renderer reads the scene and this frame's parameters and produces
/// output. It never mutates either.
pub trait Renderer {
    type Output;

    fn render(&self, scene: &Scene, frame: &FrameParams) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn describe(shape: &Shape) -> String {
    match shape {
        Shape::Sphere { radius } => format!("Sphere r={radius:.2}"),
        Shape::Plane { normal } => format!(
            "Plane n=({:.2}, {:.2}, {:.2})",
            normal.x, normal.y, normal.z
        ),
        Shape::Rectangle { size } => format!("Rectangle {:.2}x{:.2}", size.x, size.y),
        Shape::Box { size } => format!("Box {:.2}x{:.2}x{:.2}", size.x, size.y, size.z),
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, frame: &FrameParams) -> String {
        let mut out = String::new();
        let p = frame.camera_position;
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame (t={:.3}s, {}x{}) ===",
            frame.time, frame.screen_size.x as u32, frame.screen_size.y as u32
        );
        let _ = writeln!(out, "Primitives: {}/{}", scene.len(), scene.capacity());
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) fov={:.0}",
            p.x, p.y, p.z, frame.camera_fov
        );
        for (slot, prim) in scene.primitives().iter().enumerate() {
            let at = prim.position;
            let _ = writeln!(
                out,
                "  [{slot}] {} pos=({:.2}, {:.2}, {:.2}) mat={:?}",
                describe(&prim.shape),
                at.x,
                at.y,
                at.z,
                prim.material.kind
            );
        }
        out
    }
}
