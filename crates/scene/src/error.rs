use crate::primitive::ShapeKind;

/// Errors from encoding primitives and managing the scene collection.
///
/// All of these are caller contract violations; they are reported before any
/// byte of the target buffer is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("slot {slot} is out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },
    #[error("invalid {kind:?}: {reason}")]
    InvalidShape {
        kind: ShapeKind,
        reason: &'static str,
    },
    #[error("invalid slot capacity {requested} (expected 1..={max})")]
    InvalidCapacity { requested: usize, max: usize },
    #[error("scene is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },
    #[error("no primitive at index {0}")]
    NoSuchPrimitive(usize),
    #[error("unknown shape tag {0}")]
    UnknownShapeTag(u32),
    #[error("unknown material tag {0}")]
    UnknownMaterialTag(u32),
}
