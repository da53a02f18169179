//! Transform component for the ECS system
//!
//! Coordinate conventions: Y-up, right-handed, an unrotated entity faces -Z.
//! `orientation` maps world space into the entity's local frame, so the
//! world-space basis is recovered with its inverse.

use crate::ecs::component::ComponentHeader;
use crate::foundation::math::{self, Mat3, Mat4, Quat, Vec3};

/// Local forward axis of an unrotated entity
pub const LOCAL_FRONT: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Local up axis of an unrotated entity
pub const LOCAL_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Pitch limit applied by constrained mouse look, in degrees
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// ECS Transform component
///
/// `velocity` is a per-frame impulse: the transform system adds it to the
/// position once and then clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    pub(crate) header: ComponentHeader,

    /// Recompute `front`/`up`/`right` from `orientation` every frame
    pub allow_rotation: bool,

    /// World space position
    pub position: Vec3,

    /// Displacement applied at the next integration step
    pub velocity: Vec3,

    /// Per-axis scale factors
    pub scale: Vec3,

    /// World-to-local rotation
    pub orientation: Quat,

    /// World space forward direction
    pub front: Vec3,

    /// World space up direction
    pub up: Vec3,

    /// World space right direction
    pub right: Vec3,

    /// Mouse-look heading in degrees (-90 faces -Z)
    pub yaw: f32,

    /// Mouse-look elevation in degrees
    pub pitch: f32,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            header: ComponentHeader::default(),
            allow_rotation: true,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            orientation: Quat::identity(),
            front: LOCAL_FRONT,
            up: LOCAL_UP,
            right: LOCAL_FRONT.cross(&LOCAL_UP),
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

impl TransformComponent {
    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create at `position` facing `front` with the given `up` hint
    ///
    /// The orientation is derived from the basis so that the transform system
    /// reproduces the same vectors. Degenerate input keeps the default facing.
    pub fn looking(position: Vec3, front: Vec3, up: Vec3) -> Self {
        let mut transform = Self::from_position(position);
        transform.face(front, up);
        transform
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set orientation
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self.update_basis();
        self
    }

    /// Builder pattern: Freeze the basis vectors
    pub fn without_rotation(mut self) -> Self {
        self.allow_rotation = false;
        self
    }

    /// Point the entity along `front`, keeping `up` as close as possible
    pub fn face(&mut self, front: Vec3, up: Vec3) {
        let Some(front) = math::try_normalize(&front) else {
            log::warn!("Ignoring zero-length facing direction");
            return;
        };
        let Some(right) = math::try_normalize(&front.cross(&up)) else {
            log::warn!("Ignoring facing direction parallel to its up vector");
            return;
        };
        let up = right.cross(&front);

        // Columns are the local axes expressed in world space: x = right, y = up, z = -front.
        let local_to_world = nalgebra::Rotation3::from_matrix_unchecked(Mat3::from_columns(&[
            right, up, -front,
        ]));
        self.orientation = Quat::from_rotation_matrix(&local_to_world).inverse();
        self.pitch = front.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.yaw = front.z.atan2(front.x).to_degrees();
        self.update_basis();
    }

    /// Rebuild the orientation from mouse-look angles (degrees)
    ///
    /// Yaw follows the classic FPS convention where -90 degrees faces -Z and
    /// positive pitch looks up.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;

        let heading = Quat::from_axis_angle(&Vec3::y_axis(), -(yaw + 90.0).to_radians());
        let elevation = Quat::from_axis_angle(&Vec3::x_axis(), pitch.to_radians());
        self.orientation = (heading * elevation).inverse();
        self.update_basis();
    }

    /// Recompute `front`, `up` and `right` from the orientation
    pub fn update_basis(&mut self) {
        let local_to_world = self.orientation.inverse();
        self.front = (local_to_world * LOCAL_FRONT).normalize();
        self.up = (local_to_world * LOCAL_UP).normalize();
        self.right = self.front.cross(&self.up);
    }

    /// Translation * rotation * scale matrix
    pub fn model_matrix(&self) -> Mat4 {
        math::model_matrix(&self.position, &self.orientation, &self.scale)
    }

    /// Model matrix with the scale multiplied by `factor`
    pub fn scaled_model_matrix(&self, factor: f32) -> Mat4 {
        math::model_matrix(&self.position, &self.orientation, &(self.scale * factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_basis_faces_negative_z() {
        let mut transform = TransformComponent::default();
        transform.update_basis();

        assert_relative_eq!(transform.front, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(transform.up, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(transform.right, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn looking_survives_basis_recomputation() {
        let front = Vec3::new(1.0, 0.0, 0.0);
        let mut transform = TransformComponent::looking(Vec3::zeros(), front, Vec3::y());
        transform.update_basis();

        assert_relative_eq!(transform.front, front, epsilon = 1e-5);
        assert_relative_eq!(transform.up, Vec3::y(), epsilon = 1e-5);
        assert_relative_eq!(transform.yaw, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn yaw_pitch_match_spherical_front() {
        let mut transform = TransformComponent::default();
        transform.set_yaw_pitch(0.0, 30.0);

        let pitch = 30.0_f32.to_radians();
        assert_relative_eq!(
            transform.front,
            Vec3::new(pitch.cos(), pitch.sin(), 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn default_yaw_reproduces_default_front() {
        let mut transform = TransformComponent::default();
        transform.set_yaw_pitch(-90.0, 0.0);
        assert_relative_eq!(transform.front, LOCAL_FRONT, epsilon = 1e-5);
    }

    #[test]
    fn face_ignores_degenerate_input() {
        let mut transform = TransformComponent::default();
        transform.face(Vec3::zeros(), Vec3::y());
        assert_eq!(transform.orientation, Quat::identity());
    }
}
