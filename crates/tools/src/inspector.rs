use std::fmt;

use prism_scene::{MaterialType, Primitive, PrimitiveSlot, SLOT_SIZE, Scene, SceneError, ShapeKind};
use serde::Serialize;

/// Scene inspector for diagnostics and the overlay.
///
/// Decodes slots straight from the primitive buffer so what it reports is
/// what the shading stage receives.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene) -> SceneSummary {
        let count = |kind: ShapeKind| scene.primitives().iter().filter(|p| p.kind() == kind).count();
        SceneSummary {
            primitive_count: scene.len(),
            capacity: scene.capacity(),
            encoded_bytes: scene.buffer().as_bytes().len(),
            header_count: scene.header().primitive_count(),
            spheres: count(ShapeKind::Sphere),
            planes: count(ShapeKind::Plane),
            rectangles: count(ShapeKind::Rectangle),
            boxes: count(ShapeKind::Box),
        }
    }

    /// Decode one slot from the encoded buffer.
    pub fn inspect_slot(scene: &Scene, slot: usize) -> Result<SlotInfo, SceneError> {
        let raw = PrimitiveSlot::read(scene.buffer().as_bytes(), slot)?;
        let decoded = Primitive::try_from(raw)?;
        Ok(SlotInfo {
            slot,
            offset: slot * SLOT_SIZE,
            shape: decoded.kind(),
            material: decoded.material.kind,
            position: decoded.position.to_array(),
            padding_clean: raw.padding_is_zero(),
            in_sync: scene.get(slot) == Some(&decoded),
            primitive: decoded,
        })
    }

    /// Decode every occupied slot, in order.
    pub fn list_slots(scene: &Scene) -> Result<Vec<SlotInfo>, SceneError> {
        (0..scene.len())
            .map(|slot| Self::inspect_slot(scene, slot))
            .collect()
    }

    /// Slots whose bytes disagree with the CPU-side primitive or carry
    /// non-zero padding.
    pub fn find_mismatches(scene: &Scene) -> Vec<usize> {
        let mismatched: Vec<usize> = (0..scene.len())
            .filter(|&slot| match Self::inspect_slot(scene, slot) {
                Ok(info) => !(info.in_sync && info.padding_clean),
                Err(_) => true,
            })
            .collect();
        if !mismatched.is_empty() {
            tracing::warn!(?mismatched, "encoded slots out of sync");
        }
        mismatched
    }
}

/// Aggregate view of a scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub primitive_count: usize,
    pub capacity: usize,
    pub encoded_bytes: usize,
    /// Count as stored in the header buffer.
    pub header_count: u32,
    pub spheres: usize,
    pub planes: usize,
    pub rectangles: usize,
    pub boxes: usize,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene: primitives={}/{} bytes={} (spheres={} planes={} rectangles={} boxes={})",
            self.primitive_count,
            self.capacity,
            self.encoded_bytes,
            self.spheres,
            self.planes,
            self.rectangles,
            self.boxes,
        )
    }
}

/// One decoded slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotInfo {
    pub slot: usize,
    /// Byte offset of the slot in the primitive buffer.
    pub offset: usize,
    pub shape: ShapeKind,
    pub material: MaterialType,
    pub position: [f32; 3],
    pub padding_clean: bool,
    /// Decoded bytes equal the scene's primitive at this index.
    pub in_sync: bool,
    pub primitive: Primitive,
}

impl fmt::Display for SlotInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Slot {:>3} @{:#06x} {:?} pos=({:.2}, {:.2}, {:.2}) material={:?}",
            self.slot,
            self.offset,
            self.shape,
            self.position[0],
            self.position[1],
            self.position[2],
            self.material,
        )?;
        if !self.in_sync {
            write!(f, " [stale]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use prism_scene::{Material, SceneConfig, demo};

    fn demo_scene() -> Scene {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        demo::populate(&mut scene).unwrap();
        scene
    }

    #[test]
    fn summary_empty_scene() {
        let scene = Scene::new(SceneConfig { max_slots: 4 }).unwrap();
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.primitive_count, 0);
        assert_eq!(summary.capacity, 4);
        assert_eq!(summary.encoded_bytes, 4 * SLOT_SIZE);
        assert_eq!(summary.header_count, 0);
    }

    #[test]
    fn summary_counts_shapes() {
        let scene = demo_scene();
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.primitive_count, demo::primitives().len());
        assert_eq!(summary.header_count as usize, summary.primitive_count);
        assert_eq!(
            summary.spheres + summary.planes + summary.rectangles + summary.boxes,
            summary.primitive_count
        );
        assert!(format!("{summary}").contains("spheres=3"));
    }

    #[test]
    fn inspect_slot_decodes_encoded_bytes() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        scene
            .push(Primitive::rectangle(
                Vec3::new(0.0, 5.0, 0.0),
                Vec3::new(90.0, 0.0, 0.0),
                Vec2::new(2.0, 3.0),
                Material::emitter(Vec3::splat(4.0)),
            ))
            .unwrap();

        let info = SceneInspector::inspect_slot(&scene, 0).unwrap();
        assert_eq!(info.shape, ShapeKind::Rectangle);
        assert_eq!(info.material, MaterialType::LightEmitter);
        assert_eq!(info.position, [0.0, 5.0, 0.0]);
        assert!(info.padding_clean);
        assert!(info.in_sync);
        assert!(format!("{info}").starts_with("Slot   0 @0x0000 Rectangle"));
    }

    #[test]
    fn inspect_empty_slot_reports_unknown_tag() {
        let scene = Scene::new(SceneConfig { max_slots: 2 }).unwrap();
        assert_eq!(
            SceneInspector::inspect_slot(&scene, 1).unwrap_err(),
            SceneError::UnknownShapeTag(0)
        );
    }

    #[test]
    fn inspect_out_of_range() {
        let scene = Scene::new(SceneConfig { max_slots: 2 }).unwrap();
        assert_eq!(
            SceneInspector::inspect_slot(&scene, 2).unwrap_err(),
            SceneError::SlotOutOfRange {
                slot: 2,
                capacity: 2
            }
        );
    }

    #[test]
    fn list_slots_matches_scene() {
        let scene = demo_scene();
        let slots = SceneInspector::list_slots(&scene).unwrap();
        assert_eq!(slots.len(), scene.len());
        assert!(slots.iter().all(|s| s.in_sync));
        assert!(SceneInspector::find_mismatches(&scene).is_empty());
    }

    #[test]
    fn slot_info_serializes() {
        let scene = demo_scene();
        let info = SceneInspector::inspect_slot(&scene, 0).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["shape"], "Plane");
        assert_eq!(json["offset"], 0);
    }
}
