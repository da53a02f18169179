//! Math utilities and types
//!
//! Provides fundamental math types for 3D graphics. Everything is a thin alias
//! over `nalgebra` so the rest of the engine never names the library directly.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Vectors shorter than this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1.0e-6;

/// Normalize a vector, returning `None` for (near) zero-length input
pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
    v.try_normalize(NORMALIZE_EPSILON)
}

/// Rotation of `angle_degrees` around `axis`; the axis need not be normalized
pub fn axis_angle(axis: &Vec3, angle_degrees: f32) -> Option<Quat> {
    Unit::try_new(*axis, NORMALIZE_EPSILON)
        .map(|axis| Quat::from_axis_angle(&axis, angle_degrees.to_radians()))
}

/// Build a translation * rotation * scale model matrix
pub fn model_matrix(position: &Vec3, orientation: &Quat, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position)
        * orientation.to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// Transform a point into the space described by `matrix` (w = 1)
pub fn transform_position(matrix: &Mat4, v: &Vec3) -> Vec3 {
    let p = matrix * Vec4::new(v.x, v.y, v.z, 1.0);
    Vec3::new(p.x, p.y, p.z)
}

/// Transform a direction with the inverse-transpose of `matrix` (w = 0)
///
/// Falls back to the plain matrix when it is not invertible.
pub fn transform_direction(matrix: &Mat4, v: &Vec3) -> Vec3 {
    let normal_matrix = matrix
        .try_inverse()
        .map_or(*matrix, |inverse| inverse.transpose());
    let d = normal_matrix * Vec4::new(v.x, v.y, v.z, 0.0);
    Vec3::new(d.x, d.y, d.z)
}

/// Upper-left 3x3 of the inverse-transpose, used as the normal matrix
pub fn normal_matrix(model_view: &Mat4) -> Mat3 {
    let inverse_transpose = model_view
        .try_inverse()
        .map_or(*model_view, |inverse| inverse.transpose());
    inverse_transpose.fixed_view::<3, 3>(0, 0).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn axis_angle_rejects_zero_axis() {
        assert!(axis_angle(&Vec3::zeros(), 90.0).is_none());
    }

    #[test]
    fn axis_angle_accepts_unnormalized_axis() {
        let q = axis_angle(&Vec3::new(0.0, 5.0, 0.0), 90.0).unwrap();
        let rotated = q * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn model_matrix_applies_scale_then_rotation_then_translation() {
        let m = model_matrix(
            &Vec3::new(1.0, 2.0, 3.0),
            &Quat::identity(),
            &Vec3::new(2.0, 2.0, 2.0),
        );
        let p = transform_position(&m, &Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3::new(3.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn directions_ignore_translation() {
        let view = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));
        let d = transform_direction(&view, &Vec3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(d, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
    }
}
