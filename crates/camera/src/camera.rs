use glam::{Mat3, Mat4, Vec3};
use prism_common::{rotation_mat3, rotation_quat};

use crate::projection::{Projection, ProjectionType};

/// Camera with Euler orientation, two velocity inputs and cached matrices.
///
/// Matrices are recomputed eagerly by every mutator unless the `_deferred`
/// variant is used; in that case call [`Camera::update_matrices`] before
/// reading them again.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    /// Euler angles in degrees, applied X then Y then Z.
    orientation: Vec3,
    /// Velocity in the camera's own rotated axes.
    velocity_local: Vec3,
    /// Velocity in world axes.
    velocity_world: Vec3,
    projection: Projection,

    model_matrix: Mat4,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    projection_inverse_matrix: Mat4,
    stale: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vec3, orientation: Vec3) -> Self {
        Self::with_projection(position, orientation, Projection::default())
    }

    pub fn with_projection(position: Vec3, orientation: Vec3, projection: Projection) -> Self {
        let mut camera = Self {
            position,
            orientation,
            velocity_local: Vec3::ZERO,
            velocity_world: Vec3::ZERO,
            projection,
            model_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            projection_inverse_matrix: Mat4::IDENTITY,
            stale: true,
        };
        camera.update_matrices();
        camera.update_projection();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.set_position_deferred(position);
        self.update_matrices();
    }

    /// Set the position without refreshing the matrices.
    pub fn set_position_deferred(&mut self, position: Vec3) {
        self.position = position;
        self.stale = true;
    }

    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.set_orientation_deferred(orientation);
        self.update_matrices();
    }

    /// Set the orientation without refreshing the matrices.
    pub fn set_orientation_deferred(&mut self, orientation: Vec3) {
        self.orientation = orientation;
        self.stale = true;
    }

    pub fn velocity_local(&self) -> Vec3 {
        self.velocity_local
    }

    pub fn set_velocity_local(&mut self, velocity: Vec3) {
        self.velocity_local = velocity;
    }

    pub fn velocity_world(&self) -> Vec3 {
        self.velocity_world
    }

    pub fn set_velocity_world(&mut self, velocity: Vec3) {
        self.velocity_world = velocity;
    }

    /// Rotation block of the model matrix.
    pub fn rotation(&self) -> Mat3 {
        rotation_mat3(self.orientation)
    }

    /// Camera forward direction (-Z in camera space) in world axes.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Integrate both velocities over `dt` seconds and refresh the matrices.
    ///
    /// The local velocity is rotated by the orientation as it stands before
    /// this call.
    pub fn update_placement(&mut self, dt: f32) {
        let rotation = self.rotation();
        self.position += self.velocity_world * dt;
        self.position += rotation * self.velocity_local * dt;
        self.update_matrices();
    }

    /// Recompute model and view matrices from position and orientation.
    pub fn update_matrices(&mut self) {
        self.model_matrix =
            Mat4::from_translation(self.position) * Mat4::from_quat(rotation_quat(self.orientation));
        self.view_matrix = self.model_matrix.inverse();
        self.stale = false;
    }

    /// True after a deferred mutator until the next [`Camera::update_matrices`].
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replace all projection parameters at once.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.update_projection();
    }

    pub fn fov(&self) -> f32 {
        self.projection.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.projection.fov = fov;
        self.update_projection();
    }

    pub fn aspect(&self) -> f32 {
        self.projection.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection.aspect = aspect;
        self.update_projection();
    }

    pub fn z_near(&self) -> f32 {
        self.projection.z_near
    }

    pub fn set_z_near(&mut self, z_near: f32) {
        self.projection.z_near = z_near;
        self.update_projection();
    }

    pub fn z_far(&self) -> f32 {
        self.projection.z_far
    }

    pub fn set_z_far(&mut self, z_far: f32) {
        self.projection.z_far = z_far;
        self.update_projection();
    }

    pub fn projection_type(&self) -> ProjectionType {
        self.projection.kind
    }

    pub fn set_projection_type(&mut self, kind: ProjectionType) {
        self.projection.kind = kind;
        self.update_projection();
    }

    fn update_projection(&mut self) {
        self.projection_matrix = self.projection.matrix();
        self.projection_inverse_matrix = self.projection_matrix.inverse();
        tracing::trace!(projection = ?self.projection, "projection updated");
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn projection_inverse_matrix(&self) -> &Mat4 {
        &self.projection_inverse_matrix
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_common::{Axis, rotation_matrix};

    const EPS: f32 = 1e-5;

    fn assert_in_sync(cam: &Camera) {
        let product = *cam.model_matrix() * *cam.view_matrix();
        assert!(
            product.abs_diff_eq(Mat4::IDENTITY, EPS),
            "model * view is not identity: {product:?}"
        );
        assert!(cam.view_matrix().abs_diff_eq(cam.model_matrix().inverse(), EPS));
        assert!(!cam.is_stale());
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_eq!(*cam.model_matrix(), Mat4::IDENTITY);
        assert_eq!(cam.fov(), 45.0);
        assert_eq!(cam.projection_type(), ProjectionType::Perspective);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn matrices_stay_in_sync_through_mutations() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(10.0, 20.0, 30.0));
        assert_in_sync(&cam);

        cam.set_position(Vec3::new(-4.0, 0.5, 9.0));
        assert_in_sync(&cam);

        cam.set_orientation(Vec3::new(-170.0, 45.0, 95.0));
        assert_in_sync(&cam);

        cam.set_velocity_world(Vec3::new(0.0, -1.0, 0.5));
        cam.set_velocity_local(Vec3::new(2.0, 0.0, -3.0));
        for _ in 0..50 {
            cam.update_placement(0.016);
            assert_in_sync(&cam);
            let o = cam.orientation();
            cam.set_orientation(o + Vec3::new(1.5, -2.0, 0.25));
            assert_in_sync(&cam);
        }
    }

    #[test]
    fn model_translation_and_rotation_compose() {
        let cam = Camera::new(Vec3::new(5.0, 6.0, 7.0), Vec3::new(0.0, 90.0, 0.0));
        let origin = cam.model_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(5.0, 6.0, 7.0), EPS));
        let expected = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0))
            * rotation_matrix(Vec3::new(0.0, 90.0, 0.0), [Axis::X, Axis::Y, Axis::Z]);
        assert!(cam.model_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn world_velocity_integration() {
        let mut cam = Camera::default();
        cam.set_velocity_world(Vec3::new(0.0, 1.0, 0.0));
        cam.set_velocity_local(Vec3::ZERO);
        cam.update_placement(0.5);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.5, 0.0), 1e-6));
        assert_in_sync(&cam);
    }

    #[test]
    fn local_velocity_follows_orientation() {
        let mut cam = Camera::default();
        cam.set_orientation(Vec3::new(0.0, 90.0, 0.0));
        cam.set_velocity_local(Vec3::new(0.0, 0.0, -2.0));
        cam.update_placement(1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn local_velocity_uses_orientation_at_step_time() {
        let mut cam = Camera::default();
        cam.set_velocity_local(Vec3::new(1.0, 0.0, 0.0));
        cam.set_orientation_deferred(Vec3::new(0.0, 0.0, 90.0));
        // The orientation in place when the step runs is the one applied.
        cam.update_placement(1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-5));
        assert_in_sync(&cam);
    }

    #[test]
    fn deferred_mutators_batch_until_refresh() {
        let mut cam = Camera::default();
        cam.set_position_deferred(Vec3::new(3.0, 0.0, 0.0));
        cam.set_orientation_deferred(Vec3::new(0.0, 0.0, 45.0));
        assert!(cam.is_stale());
        assert_eq!(*cam.model_matrix(), Mat4::IDENTITY);

        cam.update_matrices();
        assert_in_sync(&cam);
        let origin = cam.model_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn projection_inverse_tracks_every_setter() {
        let mut cam = Camera::default();
        let check = |cam: &Camera| {
            let product = *cam.projection_matrix() * *cam.projection_inverse_matrix();
            assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-3));
        };
        check(&cam);

        let before = *cam.projection_matrix();
        cam.set_fov(70.0);
        assert_ne!(*cam.projection_matrix(), before);
        check(&cam);

        cam.set_aspect(16.0 / 9.0);
        check(&cam);
        cam.set_z_near(0.1);
        check(&cam);
        cam.set_z_far(500.0);
        check(&cam);

        cam.set_projection_type(ProjectionType::Orthogonal);
        assert_eq!(*cam.projection_matrix(), cam.projection().matrix());
        check(&cam);
    }

    #[test]
    fn set_projection_replaces_all_parameters() {
        let mut cam = Camera::default();
        let projection = Projection {
            kind: ProjectionType::Orthogonal,
            fov: 8.0,
            aspect: 1.5,
            z_near: 0.5,
            z_far: 20.0,
        };
        cam.set_projection(projection);
        assert_eq!(*cam.projection(), projection);
        assert_eq!(cam.z_far(), 20.0);
        assert_eq!(*cam.projection_matrix(), projection.matrix());
    }

    #[test]
    fn forward_is_negative_z_by_default() {
        let cam = Camera::default();
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }
}
