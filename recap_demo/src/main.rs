//! Recap demo application
//!
//! A fly-through camera, a movable point light and one imported model.
//!
//! Controls: W/S/A/D/E/Q move the player, the arrow keys plus P/O move the
//! light relative to the camera, F toggles a flashlight, Escape quits.
//! Pass a `.toml` or `.ron` engine configuration as the first argument to
//! override the defaults.

use std::path::Path;

use recap_engine::assets::primitives;
use recap_engine::foundation::logging;
use recap_engine::prelude::*;

const MODEL_PATH: &str = "resources/models/house/house.obj";

struct DemoScene {
    model_path: String,
}

impl DemoScene {
    fn new(model_path: impl Into<String>) -> Self {
        Self {
            model_path: model_path.into(),
        }
    }
}

impl Scene for DemoScene {
    fn name(&self) -> &str {
        "demo"
    }

    fn bind_actions(&mut self, registry: &mut ActionRegistry) {
        let bindings = [
            (KeyCode::W, ActionType::MoveForward),
            (KeyCode::S, ActionType::MoveBackward),
            (KeyCode::A, ActionType::StrafeLeft),
            (KeyCode::D, ActionType::StrafeRight),
            (KeyCode::E, ActionType::MoveUp),
            (KeyCode::Q, ActionType::MoveDown),
            (KeyCode::Up, ActionType::MoveForwardAlt),
            (KeyCode::Down, ActionType::MoveBackwardAlt),
            (KeyCode::Left, ActionType::StrafeLeftAlt),
            (KeyCode::Right, ActionType::StrafeRightAlt),
            (KeyCode::P, ActionType::MoveUpAlt),
            (KeyCode::O, ActionType::MoveDownAlt),
            (KeyCode::F, ActionType::ToggleFlashlight),
        ];
        for (key, action) in bindings {
            registry.bind_key(key, action);
        }
    }

    fn populate(&mut self, ctx: &mut SetupContext<'_>) -> Result<(), SceneError> {
        let player = ctx.world.add_entity("player");
        ctx.world
            .add_component(&player, TransformComponent::from_position(Vec3::new(0.0, 0.0, 4.0)));
        ctx.world.add_component(
            &player,
            InputComponent::with_actions([
                ActionType::MoveForward,
                ActionType::MoveBackward,
                ActionType::StrafeLeft,
                ActionType::StrafeRight,
                ActionType::MoveUp,
                ActionType::MoveDown,
                ActionType::ToggleFlashlight,
            ]),
        );
        ctx.world.add_component(&player, CameraComponent::default());
        ctx.world.set_main_camera(&player);

        let cube = primitives::cube();
        let geometry = ctx.resources.create_geometry(&cube)?;
        let light = ctx.world.add_entity("lightSource");
        ctx.world.add_component(
            &light,
            TransformComponent::from_position(Vec3::new(3.0, 4.0, -3.0)).with_uniform_scale(0.2),
        );
        ctx.world.add_component(&light, PointLightComponent::default());
        ctx.world
            .add_component(&light, GeometryComponent::new(geometry, cube.draw_count()));
        ctx.world
            .add_component(&light, ShaderComponent::new(ShaderType::LightSource));
        ctx.world.add_component(
            &light,
            InputComponent::with_actions([
                ActionType::MoveForwardAlt,
                ActionType::MoveBackwardAlt,
                ActionType::StrafeLeftAlt,
                ActionType::StrafeRightAlt,
                ActionType::MoveUpAlt,
                ActionType::MoveDownAlt,
            ]),
        );

        match ctx.resources.load_model(Path::new(&self.model_path)) {
            Ok(loaded) => {
                let model = ctx.world.add_entity("model");
                ctx.world
                    .add_component(&model, TransformComponent::default().with_uniform_scale(0.1));
                ctx.world.add_component(&model, ModelComponent::new(loaded));
            }
            Err(e) => log::error!("Skipping model '{}': {}", self.model_path, e),
        }

        Ok(())
    }

    fn resolve_action(&mut self, ctx: &mut FrameContext<'_>, entity: &Entity, action: Action) {
        if action.kind == ActionType::ToggleFlashlight {
            if action.phase == ActionPhase::Begin {
                if ctx.world.has_component::<SpotLightComponent>(entity) {
                    ctx.world.remove_component::<SpotLightComponent>(entity);
                } else {
                    ctx.world.add_component(entity, SpotLightComponent::default());
                }
            }
            return;
        }
        if action.phase != ActionPhase::Continue {
            return;
        }

        let own = ctx.world.component::<TransformComponent>(entity);
        let camera = ctx
            .world
            .main_camera_owner()
            .and_then(|owner| ctx.world.component::<TransformComponent>(owner));
        let (basis, direction) = match action.kind {
            ActionType::MoveForward => (own, Basis::Front),
            ActionType::MoveBackward => (own, Basis::Back),
            ActionType::StrafeRight => (own, Basis::Right),
            ActionType::StrafeLeft => (own, Basis::Left),
            ActionType::MoveUp => (own, Basis::Up),
            ActionType::MoveDown => (own, Basis::Down),
            ActionType::MoveForwardAlt => (camera, Basis::Front),
            ActionType::MoveBackwardAlt => (camera, Basis::Back),
            ActionType::StrafeRightAlt => (camera, Basis::Right),
            ActionType::StrafeLeftAlt => (camera, Basis::Left),
            ActionType::MoveUpAlt => (camera, Basis::Up),
            ActionType::MoveDownAlt => (camera, Basis::Down),
            _ => return,
        };
        let Some(axis) = basis.map(|transform| direction.pick(transform)) else {
            log::warn!("No transform to move {} along", entity);
            return;
        };

        let step = ctx.delta_time * ctx.input.move_speed;
        ctx.world.apply_velocity(entity, axis * step);
    }
}

/// Signed transform axis a movement action follows
#[derive(Clone, Copy)]
enum Basis {
    Front,
    Back,
    Right,
    Left,
    Up,
    Down,
}

impl Basis {
    fn pick(self, transform: &TransformComponent) -> Vec3 {
        match self {
            Self::Front => transform.front,
            Self::Back => -transform.front,
            Self::Right => transform.right,
            Self::Left => -transform.right,
            Self::Up => transform.up,
            Self::Down => -transform.up,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            EngineConfig::load_from_file(&path)?
        }
        None => EngineConfig::default(),
    };

    let mut scene = DemoScene::new(MODEL_PATH);
    recap_engine::run_windowed(config, &mut scene)?;
    Ok(())
}
