use glam::{Mat3, Mat4, Quat, Vec3};

use crate::types::Axis;

/// Build the orientation quaternion for Euler angles given in degrees.
///
/// The angles are applied to a vector in X, Y, Z order about the fixed world
/// axes, so the result equals `Rz * Ry * Rx`.
pub fn rotation_quat(degrees: Vec3) -> Quat {
    let r = Vec3::new(
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    );
    Quat::from_rotation_z(r.z) * Quat::from_rotation_y(r.y) * Quat::from_rotation_x(r.x)
}

/// 3x3 rotation derived from [`rotation_quat`].
pub fn rotation_mat3(degrees: Vec3) -> Mat3 {
    Mat3::from_quat(rotation_quat(degrees))
}

/// Rotation about a single axis, angle in degrees.
pub fn axis_rotation(axis: Axis, degrees: f32) -> Mat4 {
    Mat4::from_axis_angle(axis.unit(), degrees.to_radians())
}

/// Compose per-axis rotations explicitly.
///
/// `order` lists the axes in the order they act on a vector: `order[0]` is
/// applied first, so the product is `R(order[2]) * R(order[1]) * R(order[0])`.
/// With `[Axis::X, Axis::Y, Axis::Z]` this matches [`rotation_quat`].
pub fn rotation_matrix(degrees: Vec3, order: [Axis; 3]) -> Mat4 {
    order.iter().fold(Mat4::IDENTITY, |acc, &axis| {
        axis_rotation(axis, axis.component(degrees)) * acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const XYZ: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Splitmix64 step, used to generate reproducible sample angles.
    fn splitmix64(state: &mut u64) -> u64 {
        *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = *state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn angle(state: &mut u64) -> f32 {
        let unit = (splitmix64(state) >> 40) as f32 / (1u64 << 24) as f32;
        unit * 360.0 - 180.0
    }

    fn assert_blocks_match(degrees: Vec3) {
        let from_quat = rotation_mat3(degrees);
        let from_axes = Mat3::from_mat4(rotation_matrix(degrees, XYZ));
        assert!(
            from_quat.abs_diff_eq(from_axes, 1e-5),
            "mismatch at {degrees:?}: {from_quat:?} vs {from_axes:?}"
        );
    }

    #[test]
    fn identity_for_zero_angles() {
        assert!(rotation_quat(Vec3::ZERO).abs_diff_eq(Quat::IDENTITY, 1e-7));
        assert!(rotation_matrix(Vec3::ZERO, XYZ).abs_diff_eq(Mat4::IDENTITY, 1e-7));
    }

    #[test]
    fn quaternion_and_axis_order_agree_on_grid() {
        let steps = [-180.0, -135.0, -90.0, -45.0, 0.0, 30.0, 90.0, 150.0, 180.0];
        for &x in &steps {
            for &y in &steps {
                for &z in &steps {
                    assert_blocks_match(Vec3::new(x, y, z));
                }
            }
        }
    }

    #[test]
    fn quaternion_and_axis_order_agree_on_samples() {
        let mut state = 0x5eed_u64;
        for _ in 0..500 {
            let degrees = Vec3::new(angle(&mut state), angle(&mut state), angle(&mut state));
            assert_blocks_match(degrees);
        }
    }

    #[test]
    fn other_orders_generally_differ() {
        let degrees = Vec3::new(30.0, 45.0, 60.0);
        let zyx = Mat3::from_mat4(rotation_matrix(degrees, [Axis::Z, Axis::Y, Axis::X]));
        assert!(!rotation_mat3(degrees).abs_diff_eq(zyx, 1e-3));
    }

    #[test]
    fn yaw_turns_forward_toward_negative_x() {
        // -Z is forward; a positive yaw about Y turns it to the left (-X).
        let forward = rotation_mat3(Vec3::new(0.0, 90.0, 0.0)) * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_X, 1e-6));
    }
}
