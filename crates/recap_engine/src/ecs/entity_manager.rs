//! Entity manager
//!
//! Entities move through `pending -> live -> dead`. New entities wait in a
//! pending list and only become visible to iteration at the next
//! [`EntityManager::update`]. Destruction happens in the pool right away; the
//! live list and tag index drop dead entities at the next update.

use std::collections::BTreeMap;

use crate::ecs::entity::Entity;
use crate::ecs::pool::MemoryPool;

#[derive(Debug, Default)]
pub struct EntityManager {
    pending: Vec<Entity>,
    live: Vec<Entity>,
    by_tag: BTreeMap<String, Vec<Entity>>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a pool slot and queue the entity for the next update
    ///
    /// The handle is usable at once even though iteration will not see it yet.
    pub fn add_entity(&mut self, pool: &mut MemoryPool, tag: &str) -> Entity {
        let slot = pool.add_entity(tag);
        let entity = Entity::new(slot, pool.generation(slot), pool.tag_rc(slot));
        self.pending.push(entity.clone());
        entity
    }

    /// Reconcile with the pool: merge pending entities, then drop dead ones
    pub fn update(&mut self, pool: &MemoryPool) {
        for entity in self.pending.drain(..) {
            self.by_tag
                .entry(entity.tag().to_owned())
                .or_default()
                .push(entity.clone());
            self.live.push(entity);
        }

        let before = self.live.len();
        self.live.retain(|entity| entity.is_alive(pool));
        for bucket in self.by_tag.values_mut() {
            bucket.retain(|entity| entity.is_alive(pool));
        }
        self.by_tag.retain(|_, bucket| !bucket.is_empty());

        let pruned = before - self.live.len();
        if pruned > 0 {
            log::trace!("Pruned {} dead entities, {} live", pruned, self.live.len());
        }
    }

    /// Live entities in insertion order, as of the last update
    pub fn entities(&self) -> &[Entity] {
        &self.live
    }

    /// Live entities with exactly this tag; empty if the tag is unknown
    pub fn entities_with_tag(&self, tag: &str) -> &[Entity] {
        self.by_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Live entity occupying `slot`
    pub fn entity_with_id(&self, slot: usize) -> Option<&Entity> {
        self.live.iter().find(|entity| entity.id() == slot)
    }

    /// Entities created since the last update
    pub fn pending(&self) -> &[Entity] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_entities_appear_after_update() {
        let mut pool = MemoryPool::new(4, 1);
        let mut manager = EntityManager::new();

        let cube = manager.add_entity(&mut pool, "cube");
        assert!(manager.entities().is_empty());
        assert!(manager.entities_with_tag("cube").is_empty());
        assert!(cube.is_alive(&pool));

        manager.update(&pool);
        assert_eq!(manager.entities(), &[cube.clone()]);
        assert_eq!(manager.entities_with_tag("cube"), &[cube.clone()]);
        assert_eq!(manager.entity_with_id(cube.id()), Some(&cube));
    }

    #[test]
    fn unknown_tag_is_empty() {
        let manager = EntityManager::new();
        assert!(manager.entities_with_tag("ghost").is_empty());
        assert!(manager.entity_with_id(0).is_none());
    }

    #[test]
    fn destroyed_entities_linger_until_update() {
        let mut pool = MemoryPool::new(4, 1);
        let mut manager = EntityManager::new();
        let a = manager.add_entity(&mut pool, "rock");
        let b = manager.add_entity(&mut pool, "rock");
        manager.update(&pool);

        pool.remove_entity(a.id());
        assert_eq!(manager.entities().len(), 2);

        manager.update(&pool);
        assert_eq!(manager.entities(), &[b.clone()]);
        assert_eq!(manager.entities_with_tag("rock"), &[b]);
    }

    #[test]
    fn entity_destroyed_before_first_update_never_appears() {
        let mut pool = MemoryPool::new(2, 1);
        let mut manager = EntityManager::new();
        let ghost = manager.add_entity(&mut pool, "ghost");
        pool.remove_entity(ghost.id());

        manager.update(&pool);
        assert!(manager.entities().is_empty());
        assert!(manager.entities_with_tag("ghost").is_empty());
    }

    #[test]
    fn reused_slot_does_not_resurrect_old_handle() {
        let mut pool = MemoryPool::new(1, 1);
        let mut manager = EntityManager::new();
        let old = manager.add_entity(&mut pool, "old");
        manager.update(&pool);

        pool.remove_entity(old.id());
        let new = manager.add_entity(&mut pool, "new");
        assert_eq!(new.id(), old.id());
        assert!(!old.is_alive(&pool));

        manager.update(&pool);
        assert_eq!(manager.entities(), &[new]);
        assert!(manager.entities_with_tag("old").is_empty());
    }
}
