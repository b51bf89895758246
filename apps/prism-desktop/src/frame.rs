use std::time::Instant;

use egui::Context as EguiContext;
use glam::Vec2;
use prism_camera::Camera;
use prism_input::{Action, CameraController, ControllerConfig, Motion};
use prism_render::FrameParams;
use prism_scene::{Scene, SceneConfig, SceneError, demo};
use prism_time::Timer;
use prism_tools::SceneInspector;
use winit::keyboard::KeyCode;

/// Map a physical key to a camera action.
pub fn map_key(key: KeyCode, pressed: bool) -> Action {
    let motion = match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Motion::Forward,
        KeyCode::KeyS | KeyCode::ArrowDown => Motion::Backward,
        KeyCode::KeyA | KeyCode::ArrowLeft => Motion::Left,
        KeyCode::KeyD | KeyCode::ArrowRight => Motion::Right,
        KeyCode::Space | KeyCode::KeyE => Motion::Up,
        KeyCode::ControlLeft | KeyCode::KeyQ => Motion::Down,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => return Action::Boost(pressed),
        _ => return Action::Noop,
    };
    if pressed {
        Action::Press(motion)
    } else {
        Action::Release(motion)
    }
}

/// Everything one frame of the app reads and writes.
pub struct FrameContext {
    pub timer: Timer,
    pub camera: Camera,
    pub scene: Scene,
    pub controller: CameraController,
    pub screen_size: Vec2,
    pub show_overlay: bool,
    pub look_active: bool,
}

impl FrameContext {
    pub fn new(
        scene_config: SceneConfig,
        controller_config: ControllerConfig,
        fov: f32,
    ) -> Result<Self, SceneError> {
        let mut scene = Scene::new(scene_config)?;
        demo::populate(&mut scene)?;

        let mut camera = Camera::new(demo::CAMERA_POSITION, demo::CAMERA_ORIENTATION);
        camera.set_fov(fov);

        Ok(Self {
            timer: Timer::new(),
            camera,
            scene,
            controller: CameraController::new(controller_config),
            screen_size: Vec2::ONE,
            show_overlay: true,
            look_active: false,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        self.screen_size = Vec2::new(width, height);
        self.camera.set_aspect(width / height);
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed && key == KeyCode::F1 {
            self.show_overlay = !self.show_overlay;
            return;
        }
        self.controller.apply(map_key(key, pressed));
    }

    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.look_active {
            self.controller.apply(Action::Look { dx, dy });
        }
    }

    pub fn focus_lost(&mut self) {
        self.look_active = false;
        self.controller.release_all();
    }

    /// Advance the timer to now and move the camera.
    pub fn advance(&mut self) -> FrameParams {
        self.advance_at(Instant::now())
    }

    pub fn advance_at(&mut self, now: Instant) -> FrameParams {
        self.timer.update_at(now);
        self.controller.drive(&mut self.camera);
        self.camera.update_placement(self.timer.delta());
        FrameParams::capture(&self.camera, &self.timer, self.screen_size)
    }

    pub fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);
        let position = self.camera.position();
        let orientation = self.camera.orientation();

        egui::Window::new("prism")
            .default_width(240.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "FPS: {}  ({:.2} ms)",
                    self.timer.fps(),
                    self.timer.delta() * 1000.0
                ));
                ui.label(format!("Frame: {}", self.timer.frame_index()));
                ui.separator();

                ui.label(format!(
                    "Camera: ({:.2}, {:.2}, {:.2})",
                    position.x, position.y, position.z
                ));
                ui.label(format!(
                    "Pitch {:.1}  Yaw {:.1}  Roll {:.1}",
                    orientation.x, orientation.y, orientation.z
                ));

                let mut fov = self.camera.fov();
                if ui
                    .add(egui::Slider::new(&mut fov, 20.0..=120.0).text("FOV"))
                    .changed()
                {
                    self.camera.set_fov(fov);
                }
                ui.separator();

                ui.label(format!(
                    "Primitives: {}/{}",
                    summary.primitive_count, summary.capacity
                ));
                ui.label(format!("Encoded: {} bytes", summary.encoded_bytes));
                ui.separator();
                ui.small("F1: Overlay | RMB: Look | WASD/QE: Move | Shift: Boost");
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn context() -> FrameContext {
        FrameContext::new(SceneConfig::default(), ControllerConfig::default(), 60.0).unwrap()
    }

    #[test]
    fn keys_map_to_motions() {
        assert_eq!(map_key(KeyCode::KeyW, true), Action::Press(Motion::Forward));
        assert_eq!(map_key(KeyCode::KeyD, false), Action::Release(Motion::Right));
        assert_eq!(map_key(KeyCode::ShiftLeft, true), Action::Boost(true));
        assert_eq!(map_key(KeyCode::KeyZ, true), Action::Noop);
    }

    #[test]
    fn new_context_holds_demo_scene() {
        let ctx = context();
        assert_eq!(ctx.scene.len(), demo::primitives().len());
        assert_eq!(ctx.camera.position(), demo::CAMERA_POSITION);
        assert_eq!(ctx.camera.fov(), 60.0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut ctx = context();
        ctx.resize(1600, 800);
        assert_eq!(ctx.camera.aspect(), 2.0);
        assert_eq!(ctx.screen_size, Vec2::new(1600.0, 800.0));
    }

    #[test]
    fn held_key_moves_camera_between_frames() {
        let mut ctx = context();
        let start = Instant::now();
        ctx.timer = Timer::starting_at(start);

        ctx.handle_key(KeyCode::KeyE, true);
        let params = ctx.advance_at(start + Duration::from_millis(500));
        let expected = demo::CAMERA_POSITION.y + 0.5 * ctx.controller.config.speed;
        assert!((params.camera_position.y - expected).abs() < 1e-4);
        assert!((params.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn look_only_while_active() {
        let mut ctx = context();
        let before = ctx.camera.orientation();
        ctx.handle_mouse_motion(50.0, 0.0);
        ctx.advance();
        assert_eq!(ctx.camera.orientation(), before);

        ctx.look_active = true;
        ctx.handle_mouse_motion(50.0, 0.0);
        ctx.advance();
        assert_ne!(ctx.camera.orientation(), before);
    }

    #[test]
    fn f1_toggles_overlay_and_focus_loss_stops_motion() {
        let mut ctx = context();
        ctx.handle_key(KeyCode::F1, true);
        assert!(!ctx.show_overlay);

        ctx.handle_key(KeyCode::KeyW, true);
        ctx.focus_lost();
        assert_eq!(ctx.controller.velocity_local(), glam::Vec3::ZERO);
    }
}
