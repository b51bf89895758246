use std::collections::HashSet;

use glam::{Vec2, Vec3};
use prism_camera::Camera;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Motion};

const PITCH_LIMIT: f32 = 89.0;

/// Movement tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Units per second.
    pub speed: f32,
    /// Speed multiplier while boost is held.
    pub boost: f32,
    /// Degrees per pointer pixel.
    pub sensitivity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            boost: 3.0,
            sensitivity: 0.15,
        }
    }
}

/// Accumulates actions between frames and applies them to a [`Camera`].
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    pub config: ControllerConfig,
    held: HashSet<Motion>,
    boosting: bool,
    pending_look: Vec2,
}

impl CameraController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Press(m) => {
                self.held.insert(m);
            }
            Action::Release(m) => {
                self.held.remove(&m);
            }
            Action::Look { dx, dy } => self.pending_look += Vec2::new(dx, dy),
            Action::Boost(on) => self.boosting = on,
            Action::Noop => {}
        }
    }

    /// Drop all held motions, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.boosting = false;
    }

    fn speed(&self) -> f32 {
        if self.boosting {
            self.config.speed * self.config.boost
        } else {
            self.config.speed
        }
    }

    fn intent(&self, world: bool) -> Vec3 {
        self.held
            .iter()
            .filter(|m| m.is_world_space() == world)
            .map(|m| m.direction())
            .sum::<Vec3>()
            .normalize_or_zero()
    }

    /// Camera-local velocity: normalized horizontal intent times speed.
    pub fn velocity_local(&self) -> Vec3 {
        self.intent(false) * self.speed()
    }

    /// World-space velocity from the vertical motions.
    pub fn velocity_world(&self) -> Vec3 {
        self.intent(true) * self.speed()
    }

    /// Orientation change (degrees) from pointer motion since the last call.
    ///
    /// Moving right yaws right (negative about Y); moving down pitches down.
    pub fn take_orientation_delta(&mut self) -> Vec3 {
        let look = std::mem::take(&mut self.pending_look) * self.config.sensitivity;
        Vec3::new(-look.y, -look.x, 0.0)
    }

    /// Push this frame's velocities and orientation change into `camera`.
    pub fn drive(&mut self, camera: &mut Camera) {
        camera.set_velocity_local(self.velocity_local());
        camera.set_velocity_world(self.velocity_world());

        let delta = self.take_orientation_delta();
        if delta != Vec3::ZERO {
            let mut orientation = camera.orientation() + delta;
            orientation.x = orientation.x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            orientation.y = orientation.y.rem_euclid(360.0);
            camera.set_orientation(orientation);
            tracing::trace!(?orientation, "camera look");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_controller_is_still() {
        let ctl = CameraController::default();
        assert_eq!(ctl.velocity_local(), Vec3::ZERO);
        assert_eq!(ctl.velocity_world(), Vec3::ZERO);
    }

    #[test]
    fn diagonal_motion_is_normalized() {
        let mut ctl = CameraController::default();
        ctl.apply(Action::Press(Motion::Forward));
        ctl.apply(Action::Press(Motion::Right));
        let v = ctl.velocity_local();
        assert!((v.length() - ctl.config.speed).abs() < 1e-5);
        assert!(v.x > 0.0 && v.z < 0.0);
    }

    #[test]
    fn release_and_boost() {
        let mut ctl = CameraController::default();
        ctl.apply(Action::Press(Motion::Forward));
        ctl.apply(Action::Boost(true));
        assert!((ctl.velocity_local().length() - 9.0).abs() < 1e-5);
        ctl.apply(Action::Release(Motion::Forward));
        assert_eq!(ctl.velocity_local(), Vec3::ZERO);
    }

    #[test]
    fn vertical_motion_goes_to_world_velocity() {
        let mut ctl = CameraController::default();
        ctl.apply(Action::Press(Motion::Up));
        assert_eq!(ctl.velocity_local(), Vec3::ZERO);
        assert_eq!(ctl.velocity_world(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn look_accumulates_until_taken() {
        let mut ctl = CameraController::default();
        ctl.apply(Action::Look { dx: 10.0, dy: 0.0 });
        ctl.apply(Action::Look { dx: 10.0, dy: 20.0 });
        let delta = ctl.take_orientation_delta();
        assert!(delta.abs_diff_eq(Vec3::new(-3.0, -3.0, 0.0), 1e-5));
        assert_eq!(ctl.take_orientation_delta(), Vec3::ZERO);
    }

    #[test]
    fn drive_moves_camera_and_clamps_pitch() {
        let mut ctl = CameraController::default();
        let mut cam = Camera::default();

        ctl.apply(Action::Press(Motion::Forward));
        ctl.apply(Action::Look { dx: 0.0, dy: 10_000.0 });
        ctl.drive(&mut cam);
        assert_eq!(cam.orientation().x, -PITCH_LIMIT);

        cam.update_placement(1.0);
        // Looking almost straight down, forward motion mostly descends.
        assert!(cam.position().y < -2.9);
    }

    #[test]
    fn release_all_stops_motion() {
        let mut ctl = CameraController::default();
        ctl.apply(Action::Press(Motion::Left));
        ctl.apply(Action::Boost(true));
        ctl.release_all();
        assert_eq!(ctl.velocity_local(), Vec3::ZERO);
    }
}
