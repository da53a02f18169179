//! Entity-Component-System implementation
//!
//! Components live in a structure-of-arrays pool indexed by entity slot.
//! Entities are generation-checked handles into that pool; the
//! [`World`] owns both and is the only place component activity changes.

pub mod component;
pub mod components;
pub mod entity;
pub mod entity_manager;
pub mod pool;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentKind};
pub use entity::Entity;
pub use entity_manager::EntityManager;
pub use pool::MemoryPool;
pub use system::System;
pub use world::{LightCounts, World};
