//! Camera transform engine.
//!
//! Keeps model, view and projection matrices in sync with the camera's
//! position, Euler orientation and projection parameters.
//!
//! # Invariants
//! - `view == inverse(model)` after every eager mutator.
//! - `model = translate(position) * rotation(orientation)`.
//! - `projection_inverse == inverse(projection)` after every projection change.

mod camera;
mod projection;

pub use camera::Camera;
pub use projection::{Projection, ProjectionType};
