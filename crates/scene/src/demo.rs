//! The demo scene shown by the desktop app and dumped by the CLI.

use glam::{Vec2, Vec3};

use crate::error::SceneError;
use crate::material::Material;
use crate::primitive::Primitive;
use crate::scene::Scene;

/// Suggested camera position and orientation (degrees) for the demo scene.
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.5, 6.0);
pub const CAMERA_ORIENTATION: Vec3 = Vec3::new(-8.0, 0.0, 0.0);

/// The demo primitives, in slot order.
pub fn primitives() -> Vec<Primitive> {
    vec![
        // Ground
        Primitive::plane(
            Vec3::ZERO,
            Vec3::Y,
            Material::lambert(Vec3::new(0.55, 0.55, 0.5)),
        ),
        // Overhead area light facing down
        Primitive::rectangle(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(90.0, 0.0, 0.0),
            Vec2::new(3.0, 3.0),
            Material::emitter(Vec3::splat(6.0)),
        ),
        Primitive::sphere(
            Vec3::new(-2.2, 1.0, 0.0),
            1.0,
            Material::lambert(Vec3::new(0.8, 0.25, 0.2)),
        ),
        Primitive::sphere(
            Vec3::new(0.0, 1.0, -0.5),
            1.0,
            Material::metal(Vec3::new(0.9, 0.85, 0.7), 0.15),
        ),
        Primitive::sphere(Vec3::new(2.2, 1.0, 0.0), 1.0, Material::dielectric(1.5)),
        Primitive::cuboid(
            Vec3::new(1.2, 0.4, 2.0),
            Vec3::new(0.0, 35.0, 0.0),
            Vec3::new(0.8, 0.8, 0.8),
            Material::lambert(Vec3::new(0.2, 0.4, 0.8)),
        ),
    ]
}

/// Append the demo primitives to `scene`.
pub fn populate(scene: &mut Scene) -> Result<(), SceneError> {
    for primitive in primitives() {
        scene.push(primitive)?;
    }
    tracing::info!(count = scene.len(), "demo scene ready");
    Ok(())
}
