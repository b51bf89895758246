//! Input collaborator for the camera.
//!
//! Platform code translates raw key and pointer events into [`Action`]s; the
//! [`CameraController`] folds them into the camera's velocity and orientation
//! once per frame.
//!
//! # Invariants
//! - No platform types cross this crate's boundary.
//! - Pitch stays within ±89 degrees.

pub mod action;
pub mod controller;

pub use action::{Action, Motion};
pub use controller::{CameraController, ControllerConfig};
