//! # View and projection
//!
//! The view follows the transform of the world's main camera owner. Uses the
//! OpenGL conventions: right-handed, Y-up, the camera looks down -Z and clip
//! space depth runs from -1 to 1.

use crate::config::CameraConfig;
use crate::ecs::components::{CameraComponent, TransformComponent};
use crate::ecs::World;
use crate::foundation::math::{Mat4, Point3, Vec3};

/// Eye position used when the scene has no main camera
pub const FALLBACK_EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Perspective camera resolved for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,

    /// Viewing direction
    pub front: Vec3,

    /// Up vector (need not be perpendicular to `front`)
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Width over height
    pub aspect: f32,

    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `position` looking along `front`
    ///
    /// A minimized window (zero width or height) falls back to a square aspect.
    pub fn perspective(position: Vec3, front: Vec3, up: Vec3, config: &CameraConfig, viewport: (u32, u32)) -> Self {
        let (width, height) = viewport;
        let aspect = if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };

        Self {
            position,
            front,
            up,
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// Resolve the camera of `world`
    ///
    /// Uses the main camera owner's transform offset by the camera's relative
    /// position. Without a usable main camera the eye sits at
    /// [`FALLBACK_EYE`] looking at the origin.
    pub fn from_world(world: &World, config: &CameraConfig, viewport: (u32, u32)) -> Self {
        let eye = world.main_camera_owner().and_then(|owner| {
            let camera = world.component::<CameraComponent>(owner)?;
            let transform = world.component::<TransformComponent>(owner)?;
            Some((transform.position + camera.relative_position, transform.front, transform.up))
        });

        match eye {
            Some((position, front, up)) => Self::perspective(position, front, up, config, viewport),
            None => {
                log::trace!("No main camera, using fallback view");
                Self::perspective(FALLBACK_EYE, -FALLBACK_EYE.normalize(), Vec3::y(), config, viewport)
            }
        }
    }

    /// World to view space
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.position);
        let target = Point3::from(self.position + self.front);
        Mat4::look_at_rh(&eye, &target, &self.up)
    }

    /// View to clip space
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Distance from the eye to `point`
    pub fn distance_to(&self, point: &Vec3) -> f32 {
        (point - self.position).norm()
    }
}
