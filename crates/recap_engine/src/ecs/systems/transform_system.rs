//! Transform integration
//!
//! Velocity is a single-frame impulse: each run adds it to the position and
//! clears it. Entities that allow rotation get their basis rebuilt from the
//! current orientation.

use crate::ecs::components::TransformComponent;
use crate::ecs::system::System;
use crate::ecs::World;

#[derive(Debug, Default)]
pub struct TransformSystem;

impl TransformSystem {
    pub fn new() -> Self {
        Self
    }

    /// Integrate a single transform
    pub fn integrate(transform: &mut TransformComponent) {
        transform.position += transform.velocity;
        transform.velocity.fill(0.0);

        if transform.allow_rotation {
            transform.update_basis();
        }
    }
}

impl System for TransformSystem {
    fn run(&mut self, world: &mut World) {
        let (pool, entities) = world.parts_mut();
        for entity in entities {
            if let Some(transform) = entity.get_mut::<TransformComponent>(pool) {
                Self::integrate(transform);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{self, Vec3};
    use approx::assert_relative_eq;

    #[test]
    fn velocity_is_a_single_frame_impulse() {
        let mut transform = TransformComponent::from_position(Vec3::new(1.0, 1.0, 1.0));
        transform.velocity = Vec3::new(0.5, 0.0, -2.0);

        TransformSystem::integrate(&mut transform);
        assert_relative_eq!(transform.position, Vec3::new(1.5, 1.0, -1.0));
        assert_eq!(transform.velocity, Vec3::zeros());

        TransformSystem::integrate(&mut transform);
        assert_relative_eq!(transform.position, Vec3::new(1.5, 1.0, -1.0));
    }

    #[test]
    fn frozen_rotation_keeps_basis() {
        let mut transform = TransformComponent::default().without_rotation();
        transform.orientation = math::axis_angle(&Vec3::y(), 90.0).unwrap();

        TransformSystem::integrate(&mut transform);
        assert_relative_eq!(transform.front, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn run_skips_entities_without_transform() {
        let mut world = World::new();
        let mover = world.add_entity("mover");
        let marker = world.add_entity("marker");
        world.add_component(&mover, TransformComponent::default());
        world.apply_velocity(&mover, Vec3::new(0.0, 3.0, 0.0));
        world.reconcile();

        TransformSystem::new().run(&mut world);

        let transform = world.component::<TransformComponent>(&mover).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(0.0, 3.0, 0.0));
        assert!(!world.has_component::<TransformComponent>(&marker));
    }
}
