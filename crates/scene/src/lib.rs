//! Scene primitives and the buffer encoder that feeds them to the shading stage.
//!
//! Every primitive occupies one 128-byte slot laid out with std140-style
//! alignment. The slot layout is shared by all shapes; fields a shape does
//! not use are zero.
//!
//! # Invariants
//! - Encoding slot `k` writes only bytes `[128k, 128k + 128)`.
//! - Encoding is pure: the same primitive always yields the same bytes.
//! - Out-of-range slots and malformed shapes are rejected before any write.

pub mod buffer;
pub mod demo;
pub mod error;
pub mod material;
pub mod primitive;
pub mod scene;
pub mod slot;

pub use buffer::{HEADER_SIZE, HeaderBuffer, MAX_SCENE_SLOTS, PrimitiveBuffer};
pub use error::SceneError;
pub use material::{Material, MaterialType};
pub use primitive::{Primitive, Shape, ShapeKind};
pub use scene::{Scene, SceneConfig};
pub use slot::{PrimitiveSlot, SLOT_SIZE, offsets};
