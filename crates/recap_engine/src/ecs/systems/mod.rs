//! ECS Systems module

pub mod transform_system;
pub mod action_system;

pub use transform_system::TransformSystem;
pub use action_system::resolve_actions;
