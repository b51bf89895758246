//! Frame timing for the render loop.
//!
//! # Invariants
//! - `delta` is never negative.
//! - `fps` reflects the most recently completed window of at least one second.
//! - `fps_ready` is true for exactly one update per completed window.

pub mod timer;

pub use timer::{FPS_WINDOW, Timer};
