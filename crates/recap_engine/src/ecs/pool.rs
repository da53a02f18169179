//! Component memory pool
//!
//! One column per component kind plus per-slot activity, generation and tag
//! arrays, all indexed by entity slot. Slots are never freed, only recycled:
//! removal marks a slot inactive and the next [`MemoryPool::add_entity`] that
//! reuses it resets every row. Capacity grows by a fixed step and never
//! shrinks.
//!
//! Growing reallocates the columns, so component references must not be held
//! across an `add_entity` call. The borrow checker enforces this for safe code.

use std::rc::Rc;

use crate::config::PoolConfig;
use crate::ecs::component::{Component, ComponentColumns, ComponentKind};

/// Default number of slots allocated up front
pub const DEFAULT_CAPACITY: usize = 100;

/// Default number of slots added when the pool is full
pub const DEFAULT_GROWTH_STEP: usize = 10;

/// Structure-of-arrays store for every entity's components
#[derive(Debug)]
pub struct MemoryPool {
    columns: ComponentColumns,
    activity: Vec<bool>,
    generations: Vec<u32>,
    tags: Vec<Rc<str>>,
    growth_step: usize,
    live_count: usize,
}

impl Default for MemoryPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_GROWTH_STEP)
    }
}

impl MemoryPool {
    /// Create a pool with `capacity` slots that grows by `growth_step`
    ///
    /// A zero growth step is raised to one so that the pool can always grow.
    pub fn new(capacity: usize, growth_step: usize) -> Self {
        let mut pool = Self {
            columns: ComponentColumns::default(),
            activity: Vec::new(),
            generations: Vec::new(),
            tags: Vec::new(),
            growth_step: growth_step.max(1),
            live_count: 0,
        };
        pool.grow_to(capacity);
        pool
    }

    /// Create a pool sized by `config`
    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.initial_capacity, config.growth_step)
    }

    /// Claim a slot for a new entity and return its index
    ///
    /// The first inactive slot wins; when every slot is live the pool grows
    /// and the first new slot is used. Every component row at the slot is
    /// reset to its default, inactive state.
    pub fn add_entity(&mut self, tag: &str) -> usize {
        let slot = match self.activity.iter().position(|active| !active) {
            Some(slot) => slot,
            None => {
                let slot = self.capacity();
                self.grow_to(slot + self.growth_step);
                log::debug!("Memory pool grown to {} slots", self.capacity());
                slot
            }
        };

        self.columns.reset(slot);
        self.activity[slot] = true;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.tags[slot] = Rc::from(tag);
        self.live_count += 1;

        log::debug!("Entity '{}' added at slot {}, {} live", tag, slot, self.live_count);
        slot
    }

    /// Mark `slot` inactive; its rows are left in place until reuse
    pub fn remove_entity(&mut self, slot: usize) {
        match self.activity.get_mut(slot) {
            Some(active) if *active => {
                *active = false;
                self.live_count -= 1;
                log::debug!("Entity removed from slot {}, {} live", slot, self.live_count);
            }
            Some(_) => log::warn!("Slot {} is already inactive", slot),
            None => log::warn!("Slot {} is out of range", slot),
        }
    }

    /// Whether `slot` currently holds an entity
    pub fn is_active(&self, slot: usize) -> bool {
        self.activity.get(slot).copied().unwrap_or(false)
    }

    /// Number of times `slot` has been claimed
    pub fn generation(&self, slot: usize) -> u32 {
        self.generations.get(slot).copied().unwrap_or(0)
    }

    /// Tag recorded when `slot` was last claimed
    pub fn tag(&self, slot: usize) -> &str {
        self.tags.get(slot).map_or("", |tag| tag)
    }

    pub(crate) fn tag_rc(&self, slot: usize) -> Rc<str> {
        self.tags.get(slot).cloned().unwrap_or_else(|| Rc::from(""))
    }

    /// Row of kind `T` at `slot`, active or not
    ///
    /// # Panics
    /// If `slot` is outside the pool.
    pub fn component<T: Component>(&self, slot: usize) -> &T {
        &T::column(&self.columns)[slot]
    }

    /// Mutable row of kind `T` at `slot`, active or not
    ///
    /// # Panics
    /// If `slot` is outside the pool.
    pub fn component_mut<T: Component>(&mut self, slot: usize) -> &mut T {
        &mut T::column_mut(&mut self.columns)[slot]
    }

    /// Whether the `T` row at `slot` is active
    pub fn has_component<T: Component>(&self, slot: usize) -> bool {
        T::column(&self.columns)
            .get(slot)
            .is_some_and(Component::is_active)
    }

    /// Every row of kind `T`, indexed by slot
    pub fn column<T: Component>(&self) -> &[T] {
        T::column(&self.columns)
    }

    /// Kinds active at `slot`
    pub fn active_components(&self, slot: usize) -> Vec<ComponentKind> {
        self.columns.active_kinds(slot)
    }

    /// Whether every row at `slot` names `slot` as its owner
    pub fn owners_consistent(&self, slot: usize) -> bool {
        self.columns.owners_match(slot)
    }

    /// Number of slots, live or free
    pub fn capacity(&self) -> usize {
        self.activity.len()
    }

    /// Slots added each time the pool is full
    pub fn growth_step(&self) -> usize {
        self.growth_step
    }

    /// Number of active slots
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    fn grow_to(&mut self, capacity: usize) {
        self.columns.grow(capacity);
        self.activity.resize(capacity, false);
        self.generations.resize(capacity, 0);
        self.tags.resize_with(capacity, || Rc::from(""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{PointLightComponent, TransformComponent};

    #[test]
    fn first_free_slot_is_reused() {
        let mut pool = MemoryPool::new(4, 2);
        let a = pool.add_entity("a");
        let b = pool.add_entity("b");
        pool.remove_entity(a);

        assert_eq!(pool.add_entity("c"), a);
        assert_eq!(pool.tag(a), "c");
        assert!(pool.is_active(b));
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn full_pool_grows_by_step() {
        let mut pool = MemoryPool::new(2, 3);
        pool.add_entity("a");
        pool.add_entity("b");

        assert_eq!(pool.add_entity("c"), 2);
        assert_eq!(pool.capacity(), 5);
        assert!(pool.owners_consistent(4));
    }

    #[test]
    fn zero_growth_step_still_grows() {
        let mut pool = MemoryPool::new(0, 0);
        assert_eq!(pool.add_entity("a"), 0);
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    fn reuse_resets_rows() {
        let mut pool = MemoryPool::new(1, 1);
        let slot = pool.add_entity("lamp");
        pool.component_mut::<PointLightComponent>(slot).header.active = true;
        pool.component_mut::<PointLightComponent>(slot).diffuse = 0.25;
        pool.remove_entity(slot);

        let reused = pool.add_entity("crate");
        assert_eq!(reused, slot);
        assert!(!pool.has_component::<PointLightComponent>(slot));
        assert_eq!(pool.component::<PointLightComponent>(slot).diffuse, 1.0);
        assert!(pool.active_components(slot).is_empty());
        assert_eq!(pool.generation(slot), 2);
    }

    #[test]
    fn double_remove_keeps_live_count() {
        let mut pool = MemoryPool::new(2, 1);
        let slot = pool.add_entity("a");
        pool.remove_entity(slot);
        pool.remove_entity(slot);
        pool.remove_entity(99);
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn out_of_range_queries_are_inactive() {
        let pool = MemoryPool::new(1, 1);
        assert!(!pool.is_active(7));
        assert!(!pool.has_component::<TransformComponent>(7));
        assert_eq!(pool.tag(7), "");
    }
}
