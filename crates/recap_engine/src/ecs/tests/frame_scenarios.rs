//! Whole-frame behavior through the engine loop on the recording back end

use std::path::Path;

use approx::assert_relative_eq;

use super::ScriptedPlatform;
use crate::config::EngineConfig;
use crate::ecs::components::{
    CameraComponent, InputComponent, ModelComponent, PointLightComponent, TransformComponent,
};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::input::{Action, ActionPhase, ActionRegistry, ActionType, KeyCode};
use crate::platform::PlatformEvent;
use crate::render::{ModelHandle, RecordingBackend, RenderBackend, UniformValue};
use crate::scene::{FrameContext, Scene, SceneError, SetupContext};
use crate::{Engine, EngineError};

/// A player camera at the origin plus models at fixed positions
#[derive(Default)]
struct Stage {
    models: Vec<(&'static str, Vec3)>,
    impulse: Vec3,
    /// Spawn a point light from the per-frame hook on the next frame
    spawn_lamp: bool,
    seen: Vec<Action>,
    player: Option<Entity>,
}

impl Stage {
    fn with_models(models: Vec<(&'static str, Vec3)>) -> Self {
        Self {
            models,
            ..Default::default()
        }
    }

    fn player<'w>(&self, world: &'w World) -> &'w TransformComponent {
        let player = self.player.as_ref().expect("stage was populated");
        world.component::<TransformComponent>(player).expect("player has a transform")
    }
}

impl Scene for Stage {
    fn name(&self) -> &str {
        "stage"
    }

    fn bind_actions(&mut self, registry: &mut ActionRegistry) {
        registry.bind_key(KeyCode::W, ActionType::MoveForward);
    }

    fn populate(&mut self, ctx: &mut SetupContext<'_>) -> Result<(), SceneError> {
        let player = ctx.world.add_entity("player");
        ctx.world.add_component(&player, TransformComponent::default());
        ctx.world.add_component(&player, CameraComponent::default());
        ctx.world
            .add_component(&player, InputComponent::with_actions([ActionType::MoveForward]));
        ctx.world.set_main_camera(&player);
        self.player = Some(player);

        for &(path, position) in &self.models {
            let loaded = ctx.resources.load_model(Path::new(path))?;
            let entity = ctx.world.add_entity(path);
            ctx.world.add_component(&entity, TransformComponent::from_position(position));
            ctx.world.add_component(&entity, ModelComponent::new(loaded));
        }
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut FrameContext<'_>) {
        if std::mem::take(&mut self.spawn_lamp) {
            let lamp = ctx.world.add_entity("lamp");
            ctx.world
                .add_component(&lamp, TransformComponent::from_position(Vec3::new(0.0, 0.0, -3.0)));
            ctx.world.add_component(&lamp, PointLightComponent::default());
        }
    }

    fn resolve_action(&mut self, ctx: &mut FrameContext<'_>, entity: &Entity, action: Action) {
        self.seen.push(action);
        if action.phase == ActionPhase::Begin {
            ctx.world.apply_velocity(entity, self.impulse);
        }
    }
}

fn started(scene: &mut Stage) -> Engine<RecordingBackend> {
    let mut engine = Engine::new(EngineConfig::default(), RecordingBackend::default());
    engine.start(scene).expect("stage populates");
    engine
}

#[test]
fn frame_before_start_is_rejected() {
    let mut engine = Engine::new(EngineConfig::default(), RecordingBackend::default());
    let mut platform = ScriptedPlatform::default();
    let result = engine.frame(&mut platform, &mut Stage::default());
    assert!(matches!(result, Err(EngineError::NotStarted)));
    assert_eq!(platform.swaps, 0);
}

#[test]
fn new_entities_wait_exactly_one_reconcile() {
    let mut world = World::new();
    let early = world.add_entity("early");
    world.reconcile();

    let late = world.add_entity("late");
    assert!(world.is_alive(&late));
    assert!(!world.entities().contains(&late));
    assert!(world.entities_with_tag("late").is_empty());

    world.reconcile();
    assert_eq!(world.entities(), &[early, late.clone()]);
    assert_eq!(world.entities_with_tag("late"), &[late]);
}

#[test]
fn destroyed_entities_linger_until_reconcile() {
    let mut world = World::new();
    let doomed = world.add_entity("doomed");
    world.reconcile();

    world.destroy_entity(&doomed);
    assert!(!world.is_alive(&doomed));
    assert!(world.entities().contains(&doomed));

    world.reconcile();
    assert!(!world.entities().contains(&doomed));
    world.reconcile();
    assert!(world.entity_with_id(doomed.id()).is_none());
}

#[test]
fn held_key_reports_begin_continue_then_one_end() {
    let mut stage = Stage::default();
    let mut engine = started(&mut stage);
    let mut platform = ScriptedPlatform::default();

    platform.keys.press(KeyCode::W);
    for _ in 0..3 {
        engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();
    }
    platform.keys.release(KeyCode::W);
    for _ in 0..3 {
        engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();
    }

    let phases: Vec<_> = stage.seen.iter().map(|action| action.phase).collect();
    assert_eq!(
        phases,
        vec![
            ActionPhase::Begin,
            ActionPhase::Continue,
            ActionPhase::Continue,
            ActionPhase::End,
        ]
    );
    assert!(stage.seen.iter().all(|action| action.kind == ActionType::MoveForward));
}

#[test]
fn velocity_is_a_single_frame_impulse() {
    let mut stage = Stage {
        impulse: Vec3::new(0.5, 0.0, -2.0),
        ..Default::default()
    };
    let mut engine = started(&mut stage);
    let mut platform = ScriptedPlatform::default();

    platform.keys.press(KeyCode::W);
    engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();
    let moved = stage.player(engine.world());
    assert_relative_eq!(moved.position, Vec3::new(0.5, 0.0, -2.0));
    assert_eq!(moved.velocity, Vec3::zeros());

    // held, so the second frame resolves Continue and applies nothing
    engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();
    assert_relative_eq!(stage.player(engine.world()).position, Vec3::new(0.5, 0.0, -2.0));
}

#[test]
fn transparent_models_draw_back_to_front() {
    let mut stage = Stage::with_models(vec![
        ("transparent_two.obj", Vec3::new(0.0, 0.0, -2.0)),
        ("transparent_five.obj", Vec3::new(0.0, 0.0, -5.0)),
        ("transparent_one.obj", Vec3::new(0.0, 0.0, -1.0)),
    ]);
    let mut engine = started(&mut stage);
    let mut platform = ScriptedPlatform::default();

    engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();

    assert_eq!(
        engine.backend().drawn_models(),
        vec![ModelHandle(1), ModelHandle(0), ModelHandle(2)]
    );
}

#[test]
fn opaque_models_draw_before_transparent_ones() {
    let mut stage = Stage::with_models(vec![
        ("transparent_glass.obj", Vec3::new(0.0, 0.0, -3.0)),
        ("crate.obj", Vec3::new(0.0, 0.0, -9.0)),
    ]);
    let mut engine = started(&mut stage);
    let mut platform = ScriptedPlatform::default();

    engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();

    assert_eq!(engine.backend().drawn_models(), vec![ModelHandle(1), ModelHandle(0)]);
}

#[test]
fn light_spawned_mid_frame_is_shaded_that_frame() {
    let mut stage = Stage::default();
    let mut engine = started(&mut stage);
    let mut platform = ScriptedPlatform::default();

    stage.spawn_lamp = true;
    engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();

    let backend = engine.backend();
    assert_eq!(backend.uniform("numOfPointLights"), Some(UniformValue::Int(1)));
    // the player camera sits at the origin looking down -Z
    assert_eq!(
        backend.uniform("pointLights[0].position").map(|value| match value {
            UniformValue::Vec3(position) => (position - Vec3::new(0.0, 0.0, -3.0)).norm() < 1e-5,
            _ => false,
        }),
        Some(true)
    );
    assert_eq!(engine.world().pending_entities().len(), 1);
}

#[test]
fn close_key_ends_the_loop_after_one_frame() {
    let mut stage = Stage::default();
    let mut engine = Engine::new(EngineConfig::default(), RecordingBackend::default());
    let mut platform = ScriptedPlatform::default();
    platform.keys.press(KeyCode::CLOSE);

    engine.run(&mut platform, &mut stage).unwrap();

    assert!(engine.is_started());
    assert!(platform.closed);
    assert_eq!(platform.swaps, 1);
}

#[test]
fn run_presents_until_the_platform_closes() {
    let mut stage = Stage::default();
    let mut engine = Engine::new(EngineConfig::default(), RecordingBackend::default());
    let mut platform = ScriptedPlatform::with_frame_limit(3);

    engine.run(&mut platform, &mut stage).unwrap();

    assert_eq!(platform.swaps, 3);
    assert_eq!(engine.renderer().frames(), 3);
    assert_eq!(engine.world().entities().len(), 1);
}

#[test]
fn window_events_reach_backend_and_camera() {
    let mut stage = Stage::default();
    let mut engine = started(&mut stage);
    let mut platform = ScriptedPlatform::default();

    platform.events.extend([
        PlatformEvent::FramebufferResized { width: 800, height: 600 },
        PlatformEvent::CursorMoved { x: 400.0, y: 300.0 },
        PlatformEvent::CursorMoved { x: 500.0, y: 300.0 },
    ]);
    engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();

    assert_eq!(engine.backend().viewport(), (800, 600));
    // 100 px right at sensitivity 0.1 turns the default -90 heading to -80
    let player = stage.player(engine.world());
    assert_relative_eq!(player.yaw, -80.0, epsilon = 1e-4);
    assert_relative_eq!(player.pitch, 0.0);

    platform.events.push_back(PlatformEvent::CloseRequested);
    engine.frame_with_delta(&mut platform, &mut stage, 0.016).unwrap();
    assert!(platform.closed);
}
