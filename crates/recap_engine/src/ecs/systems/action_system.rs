//! Action resolution: the only path from input to simulation state

use crate::ecs::components::InputComponent;
use crate::input::ActionRegistry;
use crate::scene::{FrameContext, Scene};

/// Hand every registered action to the scene, once per bound entity
///
/// Iterates a snapshot of the live list, so handlers may create or destroy
/// entities. Entities destroyed earlier in the same pass are skipped.
pub fn resolve_actions<S: Scene + ?Sized>(scene: &mut S, registry: &ActionRegistry, ctx: &mut FrameContext<'_>) {
    if registry.registered_actions().is_empty() {
        return;
    }

    let entities = ctx.world.entities().to_vec();
    for entity in &entities {
        let Some(bound) = ctx
            .world
            .component::<InputComponent>(entity)
            .map(|input| input.actions.clone())
        else {
            continue;
        };

        for kind in bound {
            if !ctx.world.is_alive(entity) {
                break;
            }
            if let Some(action) = registry.registered(kind) {
                scene.resolve_action(ctx, entity, action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputConfig;
    use crate::ecs::{Entity, World};
    use crate::input::{Action, ActionPhase, ActionType, KeyCode, KeyState};
    use crate::scene::{SceneError, SetupContext};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Action)>,
        destroy_on_use: bool,
    }

    impl Scene for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn bind_actions(&mut self, _registry: &mut ActionRegistry) {}

        fn populate(&mut self, _ctx: &mut SetupContext<'_>) -> Result<(), SceneError> {
            Ok(())
        }

        fn resolve_action(&mut self, ctx: &mut FrameContext<'_>, entity: &Entity, action: Action) {
            self.seen.push((entity.tag().to_string(), action));
            if self.destroy_on_use {
                ctx.world.destroy_entity(entity);
                ctx.world.add_entity("spawned");
            }
        }
    }

    fn registry_with(key: KeyCode, action: ActionType) -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry.bind_key(key, action);
        let mut keys = KeyState::new();
        keys.press(key);
        registry.sample(&keys);
        registry
    }

    #[test]
    fn only_bound_entities_receive_actions() {
        let mut world = World::new();
        let player = world.add_entity("player");
        world.add_component(&player, InputComponent::with_actions([ActionType::MoveForward]));
        let deaf = world.add_entity("deaf");
        world.add_component(&deaf, InputComponent::with_actions([ActionType::Use]));
        world.reconcile();

        let registry = registry_with(KeyCode::W, ActionType::MoveForward);
        let input = InputConfig::default();
        let mut scene = Recorder::default();
        let mut ctx = FrameContext { world: &mut world, delta_time: 0.016, input: &input };
        resolve_actions(&mut scene, &registry, &mut ctx);

        assert_eq!(
            scene.seen,
            vec![("player".to_string(), Action::new(ActionType::MoveForward, ActionPhase::Begin))]
        );
    }

    #[test]
    fn handlers_may_destroy_and_spawn() {
        let mut world = World::new();
        let player = world.add_entity("player");
        world.add_component(
            &player,
            InputComponent::with_actions([ActionType::Use, ActionType::Run]),
        );
        world.reconcile();

        let mut registry = registry_with(KeyCode::E, ActionType::Use);
        registry.bind_key(KeyCode::LeftShift, ActionType::Run);
        let mut keys = KeyState::new();
        keys.press(KeyCode::E);
        keys.press(KeyCode::LeftShift);
        registry.sample(&keys);

        let input = InputConfig::default();
        let mut scene = Recorder {
            destroy_on_use: true,
            ..Recorder::default()
        };
        let mut ctx = FrameContext { world: &mut world, delta_time: 0.016, input: &input };
        resolve_actions(&mut scene, &registry, &mut ctx);

        assert_eq!(scene.seen.len(), 1);
        assert_eq!(world.entities().len(), 1);
        world.reconcile();
        assert_eq!(world.entities_with_tag("spawned").len(), 1);
        assert!(world.entities_with_tag("player").is_empty());
    }
}
