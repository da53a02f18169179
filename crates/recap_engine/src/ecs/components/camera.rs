//! Camera component
//!
//! Projection parameters are global (see `CameraConfig`); the component only
//! marks which entity the view follows.

use crate::ecs::component::ComponentHeader;
use crate::foundation::math::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraComponent {
    pub(crate) header: ComponentHeader,

    /// Whether this camera drives the view
    pub is_main_camera: bool,

    /// Eye offset from the owner's position, in world space
    pub relative_position: Vec3,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            header: ComponentHeader::default(),
            is_main_camera: true,
            relative_position: Vec3::zeros(),
        }
    }
}

impl CameraComponent {
    /// Builder pattern: Offset the eye from the owner
    pub fn with_offset(mut self, relative_position: Vec3) -> Self {
        self.relative_position = relative_position;
        self
    }

    /// Builder pattern: Keep the camera but do not drive the view
    pub fn secondary(mut self) -> Self {
        self.is_main_camera = false;
        self
    }
}
