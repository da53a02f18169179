//! ECS Components module
//!
//! The closed set of component kinds the pool stores. Components are data;
//! the logic that reads them lives in the world, the systems and the renderer.

pub mod transform;
pub mod input;
pub mod camera;
pub mod shader;
pub mod lighting;
pub mod model;
pub mod geometry;

pub use transform::TransformComponent;
pub use input::InputComponent;
pub use camera::CameraComponent;
pub use shader::ShaderComponent;
pub use lighting::{PointLightComponent, SpotLightComponent, DirectionalLight, Attenuation};
pub use model::ModelComponent;
pub use geometry::GeometryComponent;
