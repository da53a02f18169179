//! Entity implementation

use std::fmt;
use std::rc::Rc;

use crate::ecs::component::Component;
use crate::ecs::pool::MemoryPool;

/// Entity handle: a pool slot plus the tag cached at creation
///
/// Handles are cheap to clone and own nothing. The generation distinguishes
/// successive occupants of the same slot, so a handle to a destroyed entity
/// never reads the components of whoever reuses its slot.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    id: usize,
    generation: u32,
    tag: Rc<str>,
}

impl Entity {
    pub(crate) fn new(id: usize, generation: u32, tag: Rc<str>) -> Self {
        Self { id, generation, tag }
    }

    /// Get the entity's pool slot
    pub fn id(&self) -> usize {
        self.id
    }

    /// Occupancy count of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Tag given at creation
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the slot is still active and still held by this entity
    pub fn is_alive(&self, pool: &MemoryPool) -> bool {
        pool.is_active(self.id) && pool.generation(self.id) == self.generation
    }

    /// Whether the entity is alive and has an active `T`
    pub fn has<T: Component>(&self, pool: &MemoryPool) -> bool {
        self.is_alive(pool) && pool.has_component::<T>(self.id)
    }

    /// The entity's active `T`, if any
    pub fn get<'p, T: Component>(&self, pool: &'p MemoryPool) -> Option<&'p T> {
        self.has::<T>(pool).then(|| pool.component::<T>(self.id))
    }

    /// The entity's active `T`, mutably, if any
    pub fn get_mut<'p, T: Component>(&self, pool: &'p mut MemoryPool) -> Option<&'p mut T> {
        if self.has::<T>(pool) {
            Some(pool.component_mut::<T>(self.id))
        } else {
            None
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({} '{}' gen {})", self.id, self.tag, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (slot {})", self.tag, self.id)
    }
}
