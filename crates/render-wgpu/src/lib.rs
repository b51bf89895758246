//! wgpu render backend.
//!
//! Uploads the per-frame parameter block and the encoded primitive slots to
//! uniform buffers and shades the scene in a single full-screen pass.
//!
//! # Invariants
//! - Renderer never mutates scene contents; it only drains dirty ranges.
//! - The shader's `Primitive` struct matches the 128-byte slot layout.
//! - Buffers sit at the binding points in `prism_render::bindings`.

mod gpu;
mod shaders;

pub use gpu::{MAX_UNIFORM_SLOTS, WgpuRenderer};
pub use shaders::{FRAME_BLOCK_SIZE, FRAME_LAYOUT, frame_offset, scene_shader};
