//! System trait

use crate::ecs::World;

/// A per-frame pass over the world
pub trait System {
    /// Run the system
    fn run(&mut self, world: &mut World);
}
