//! ECS World implementation
//!
//! The world is the explicit context object owning every piece of scene
//! state: the component pool, the entity manager, the light counters, the
//! main camera and the global directional light.
//!
//! Component activity changes only through [`World::add_component`],
//! [`World::remove_component`] and [`World::destroy_entity`]. Those three
//! hooks keep the light counters equal to the number of alive entities
//! holding each light kind; [`World::recount_lights`] recomputes the same
//! numbers by scanning the pool. Overwriting a whole light component through
//! `component_mut` bypasses the hooks and is the one way to desynchronize
//! them.

use crate::config::PoolConfig;
use crate::ecs::component::{Component, ComponentKind};
use crate::ecs::components::{
    CameraComponent, DirectionalLight, ModelComponent, PointLightComponent, SpotLightComponent,
    TransformComponent,
};
use crate::ecs::entity::Entity;
use crate::ecs::entity_manager::EntityManager;
use crate::ecs::pool::MemoryPool;
use crate::foundation::math::{self, Vec3};

/// Number of alive entities holding each light kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightCounts {
    pub point: usize,
    pub spot: usize,
}

impl LightCounts {
    fn adjust(&mut self, kind: ComponentKind, added: bool) {
        let counter = match kind {
            ComponentKind::PointLight => &mut self.point,
            ComponentKind::SpotLight => &mut self.spot,
            _ => return,
        };
        if added {
            *counter += 1;
        } else {
            *counter = counter.saturating_sub(1);
        }
    }
}

/// ECS World containing all entities and components
///
/// The pool is only reachable read-only from outside the crate, so slots
/// are claimed and released exclusively through the world's hooks:
///
/// ```compile_fail
/// let mut world = recap_engine::ecs::World::new();
/// let (pool, _) = world.parts_mut();
/// pool.remove_entity(0);
/// ```
#[derive(Debug, Default)]
pub struct World {
    pool: MemoryPool,
    manager: EntityManager,
    lights: LightCounts,
    main_camera: Option<Entity>,
    global_light: DirectionalLight,
}

impl World {
    /// Create a new world with the default pool size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world whose pool is sized by `config`
    pub fn with_pool(config: &PoolConfig) -> Self {
        Self {
            pool: MemoryPool::from_config(config),
            ..Self::default()
        }
    }

    /// Create a new entity; it becomes iterable after the next reconcile
    pub fn add_entity(&mut self, tag: &str) -> Entity {
        self.manager.add_entity(&mut self.pool, tag)
    }

    /// Merge pending entities and prune dead ones
    pub fn reconcile(&mut self) {
        self.manager.update(&self.pool);

        #[cfg(debug_assertions)]
        {
            let scanned = self.recount_lights();
            if scanned != self.lights {
                log::error!(
                    "Light counters drifted: tracked {:?}, scanned {:?}",
                    self.lights,
                    scanned
                );
            }
        }
    }

    /// Live entities in insertion order, as of the last reconcile
    pub fn entities(&self) -> &[Entity] {
        self.manager.entities()
    }

    /// Entities created since the last reconcile
    pub fn pending_entities(&self) -> &[Entity] {
        self.manager.pending()
    }

    /// Live entities with exactly this tag
    pub fn entities_with_tag(&self, tag: &str) -> &[Entity] {
        self.manager.entities_with_tag(tag)
    }

    /// Live entity occupying `slot`
    pub fn entity_with_id(&self, slot: usize) -> Option<&Entity> {
        self.manager.entity_with_id(slot)
    }

    /// Read-only component storage
    pub fn pool(&self) -> &MemoryPool {
        &self.pool
    }

    /// Mutable pool access alongside the live entity list
    ///
    /// Lets systems mutate components while iterating entities. Crate-private
    /// so that slots are only claimed and released through the world.
    pub(crate) fn parts_mut(&mut self) -> (&mut MemoryPool, &[Entity]) {
        (&mut self.pool, self.manager.entities())
    }

    /// Whether `entity` still occupies its slot
    pub fn is_alive(&self, entity: &Entity) -> bool {
        entity.is_alive(&self.pool)
    }

    /// Attach `component` to `entity`, replacing any previous value
    ///
    /// Returns `None` when the entity is dead.
    pub fn add_component<T: Component>(&mut self, entity: &Entity, mut component: T) -> Option<&mut T> {
        if !self.is_alive(entity) {
            log::warn!("Adding {:?} to dead entity {}", T::KIND, entity);
            return None;
        }

        let slot = entity.id();
        let was_active = self.pool.has_component::<T>(slot);
        {
            let header = component.header_mut();
            header.active = true;
            header.owner_id = slot;
        }
        if !was_active {
            self.lights.adjust(T::KIND, true);
        }

        let row = self.pool.component_mut::<T>(slot);
        *row = component;
        Some(row)
    }

    /// Detach `T` from `entity`; warns when it is not present
    pub fn remove_component<T: Component>(&mut self, entity: &Entity) {
        if !entity.has::<T>(&self.pool) {
            log::warn!("Removing absent {:?} from {}", T::KIND, entity);
            return;
        }

        self.lights.adjust(T::KIND, false);
        if T::KIND == ComponentKind::Camera && self.owns_main_camera(entity) {
            self.main_camera = None;
        }
        self.pool.component_mut::<T>(entity.id()).header_mut().active = false;
    }

    /// Destroy `entity` now; iteration drops it at the next reconcile
    pub fn destroy_entity(&mut self, entity: &Entity) {
        if !self.is_alive(entity) {
            log::warn!("Destroying dead entity {}", entity);
            return;
        }

        for kind in self.pool.active_components(entity.id()) {
            if kind.is_light() {
                self.lights.adjust(kind, false);
            }
        }
        if self.owns_main_camera(entity) {
            self.main_camera = None;
        }
        self.pool.remove_entity(entity.id());
    }

    /// The entity's active `T`, if it is alive
    pub fn component<T: Component>(&self, entity: &Entity) -> Option<&T> {
        entity.get::<T>(&self.pool)
    }

    /// The entity's active `T`, mutably, if it is alive
    pub fn component_mut<T: Component>(&mut self, entity: &Entity) -> Option<&mut T> {
        entity.get_mut::<T>(&mut self.pool)
    }

    /// Whether the entity is alive and has an active `T`
    pub fn has_component<T: Component>(&self, entity: &Entity) -> bool {
        entity.has::<T>(&self.pool)
    }

    /// Alive entities holding a point light
    pub fn point_light_count(&self) -> usize {
        self.lights.point
    }

    /// Alive entities holding a spot light
    pub fn spot_light_count(&self) -> usize {
        self.lights.spot
    }

    /// Both light counters as tracked by the hooks
    pub fn light_counts(&self) -> LightCounts {
        self.lights
    }

    /// Count light components by scanning every active slot
    pub fn recount_lights(&self) -> LightCounts {
        let mut counts = LightCounts::default();
        for slot in (0..self.pool.capacity()).filter(|&slot| self.pool.is_active(slot)) {
            if self.pool.has_component::<PointLightComponent>(slot) {
                counts.point += 1;
            }
            if self.pool.has_component::<SpotLightComponent>(slot) {
                counts.spot += 1;
            }
        }
        counts
    }

    /// Make `entity`'s camera drive the view
    pub fn set_main_camera(&mut self, entity: &Entity) {
        if !self.has_component::<CameraComponent>(entity) {
            log::warn!("Setting main camera on {} which has no camera", entity);
            return;
        }
        self.main_camera = Some(entity.clone());
    }

    /// Entity owning the main camera, while it is alive
    pub fn main_camera_owner(&self) -> Option<&Entity> {
        self.main_camera
            .as_ref()
            .filter(|owner| owner.has::<CameraComponent>(&self.pool))
    }

    fn owns_main_camera(&self, entity: &Entity) -> bool {
        self.main_camera.as_ref() == Some(entity)
    }

    /// The scene-wide directional light
    pub fn global_light(&self) -> &DirectionalLight {
        &self.global_light
    }

    /// Replace the scene-wide directional light
    pub fn set_global_light(&mut self, light: DirectionalLight) {
        self.global_light = light;
    }

    /// Accumulate `velocity` for the next integration step
    pub fn apply_velocity(&mut self, entity: &Entity, velocity: Vec3) {
        match self.component_mut::<TransformComponent>(entity) {
            Some(transform) => transform.velocity += velocity,
            None => log::warn!("Applying velocity to {} which has no transform", entity),
        }
    }

    /// Rotate around `axis` in the entity's own frame
    ///
    /// Angles are in degrees; the axis need not be normalized.
    pub fn add_local_rotation(&mut self, entity: &Entity, axis: Vec3, angle_degrees: f32) {
        self.rotate(entity, axis, angle_degrees, |orientation, rotation| orientation * rotation);
    }

    /// Rotate around `axis` in world space
    pub fn add_global_rotation(&mut self, entity: &Entity, axis: Vec3, angle_degrees: f32) {
        self.rotate(entity, axis, angle_degrees, |orientation, rotation| rotation * orientation);
    }

    fn rotate(
        &mut self,
        entity: &Entity,
        axis: Vec3,
        angle_degrees: f32,
        compose: impl FnOnce(math::Quat, math::Quat) -> math::Quat,
    ) {
        let Some(rotation) = math::axis_angle(&axis, angle_degrees) else {
            log::warn!("Ignoring rotation of {} around a zero axis", entity);
            return;
        };
        match self.component_mut::<TransformComponent>(entity) {
            Some(transform) => transform.orientation = compose(transform.orientation, rotation),
            None => log::warn!("Rotating {} which has no transform", entity),
        }
    }

    /// Draw `entity` with a stencil outline of `color`
    pub fn outline_entity(&mut self, entity: &Entity, color: Vec3) {
        match self.component_mut::<ModelComponent>(entity) {
            Some(model) => {
                model.outlined = true;
                model.outline_color = color;
            }
            None => log::warn!("Outlining {} which has no model", entity),
        }
    }

    /// Stop outlining `entity`
    pub fn remove_outline(&mut self, entity: &Entity) {
        match self.component_mut::<ModelComponent>(entity) {
            Some(model) => model.outlined = false,
            None => log::warn!("Removing outline from {} which has no model", entity),
        }
    }

    /// Turn the main camera owner by cursor offsets already scaled by sensitivity
    ///
    /// Moving the cursor down looks down. With `constrain_pitch` the pitch
    /// stays within +/-89 degrees.
    pub fn mouse_look(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        let Some(owner) = self.main_camera_owner().cloned() else {
            return;
        };
        let Some(transform) = self.component_mut::<TransformComponent>(&owner) else {
            log::warn!("Main camera owner {} has no transform", owner);
            return;
        };

        let yaw = transform.yaw + x_offset;
        let mut pitch = transform.pitch - y_offset;
        if constrain_pitch {
            use crate::ecs::components::transform::PITCH_LIMIT_DEGREES;
            pitch = pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        }
        transform.set_yaw_pitch(yaw, pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn light_world() -> (World, Entity) {
        let mut world = World::new();
        let lamp = world.add_entity("lamp");
        world.add_component(&lamp, TransformComponent::default());
        world.add_component(&lamp, PointLightComponent::default());
        (world, lamp)
    }

    #[test]
    fn add_component_stamps_header() {
        let (world, lamp) = light_world();
        let light = world.component::<PointLightComponent>(&lamp).unwrap();
        assert!(light.is_active());
        assert_eq!(light.owner_id(), lamp.id());
        assert_eq!(world.point_light_count(), 1);
    }

    #[test]
    fn re_adding_a_light_does_not_double_count() {
        let (mut world, lamp) = light_world();
        world.add_component(&lamp, PointLightComponent::default());
        assert_eq!(world.point_light_count(), 1);
    }

    #[test]
    fn removing_an_absent_light_does_not_underflow() {
        let (mut world, lamp) = light_world();
        world.remove_component::<SpotLightComponent>(&lamp);
        assert_eq!(world.spot_light_count(), 0);
        assert_eq!(world.point_light_count(), 1);
    }

    #[test]
    fn destroying_twice_decrements_once() {
        let (mut world, lamp) = light_world();
        let other = world.add_entity("other");
        world.add_component(&other, PointLightComponent::default());

        world.destroy_entity(&lamp);
        world.destroy_entity(&lamp);
        assert_eq!(world.point_light_count(), 1);
        assert_eq!(world.recount_lights().point, 1);
    }

    #[test]
    fn dead_entities_reject_components() {
        let (mut world, lamp) = light_world();
        world.destroy_entity(&lamp);
        assert!(world.add_component(&lamp, SpotLightComponent::default()).is_none());
        assert_eq!(world.spot_light_count(), 0);
    }

    #[test]
    fn stale_handle_does_not_touch_reused_slot() {
        let mut world = World::with_pool(&PoolConfig {
            initial_capacity: 1,
            growth_step: 1,
        });
        let old = world.add_entity("old");
        world.destroy_entity(&old);
        let new = world.add_entity("new");
        world.add_component(&new, PointLightComponent::default());

        assert_eq!(old.id(), new.id());
        world.destroy_entity(&old);
        world.remove_component::<PointLightComponent>(&old);
        assert_eq!(world.point_light_count(), 1);
        assert!(world.is_alive(&new));
    }

    #[test]
    fn destroying_camera_owner_clears_main_camera() {
        let mut world = World::new();
        let player = world.add_entity("player");
        world.add_component(&player, TransformComponent::default());
        world.add_component(&player, CameraComponent::default());
        world.set_main_camera(&player);
        assert_eq!(world.main_camera_owner(), Some(&player));

        world.destroy_entity(&player);
        assert!(world.main_camera_owner().is_none());
    }

    #[test]
    fn missing_transform_is_skipped() {
        let mut world = World::new();
        let ghost = world.add_entity("ghost");
        world.apply_velocity(&ghost, Vec3::new(1.0, 0.0, 0.0));
        world.add_local_rotation(&ghost, Vec3::y(), 90.0);
        world.outline_entity(&ghost, Vec3::x());
        assert!(!world.has_component::<TransformComponent>(&ghost));
    }

    #[test]
    fn velocity_accumulates() {
        let mut world = World::new();
        let rock = world.add_entity("rock");
        world.add_component(&rock, TransformComponent::default());
        world.apply_velocity(&rock, Vec3::new(1.0, 0.0, 0.0));
        world.apply_velocity(&rock, Vec3::new(0.0, 2.0, 0.0));

        let transform = world.component::<TransformComponent>(&rock).unwrap();
        assert_relative_eq!(transform.velocity, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn global_rotation_turns_front() {
        let mut world = World::new();
        let rock = world.add_entity("rock");
        world.add_component(&rock, TransformComponent::default());
        world.add_global_rotation(&rock, Vec3::new(0.0, 2.0, 0.0), 90.0);

        let transform = world.component_mut::<TransformComponent>(&rock).unwrap();
        transform.update_basis();
        // orientation maps world to local, so the basis turns the opposite way
        assert_relative_eq!(transform.front, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn mouse_look_clamps_pitch() {
        let mut world = World::new();
        let player = world.add_entity("player");
        world.add_component(&player, TransformComponent::default());
        world.add_component(&player, CameraComponent::default());
        world.set_main_camera(&player);

        world.mouse_look(0.0, -500.0, true);
        let transform = world.component::<TransformComponent>(&player).unwrap();
        assert_relative_eq!(transform.pitch, PITCH_LIMIT, epsilon = 1e-5);
        assert!(transform.front.y > 0.99);
    }

    const PITCH_LIMIT: f32 = crate::ecs::components::transform::PITCH_LIMIT_DEGREES;
}
