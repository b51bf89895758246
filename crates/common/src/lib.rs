//! Shared types and rotation helpers used by the camera, the scene encoder and
//! the render boundary.
//!
//! # Invariants
//! - Euler angles are always degrees at API boundaries.
//! - The quaternion and per-axis constructors agree for the X, Y, Z order.

pub mod rotation;
pub mod types;

pub use rotation::{axis_rotation, rotation_mat3, rotation_matrix, rotation_quat};
pub use types::{Axis, VEC3_STRIDE, VEC4_ALIGN};
