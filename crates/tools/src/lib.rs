//! Developer tooling: read-only views of the encoded scene.
//!
//! # Invariants
//! - Tools never modify the scene or its buffers.
//! - Slot details come from the encoded bytes, not the CPU-side primitives.

mod inspector;

pub use inspector::{SceneInspector, SceneSummary, SlotInfo};
