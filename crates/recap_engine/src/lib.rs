//! # Recap Engine
//!
//! A small forward-rendering engine on OpenGL 3.3, built around an ECS with
//! a growable component pool.
//!
//! ## Features
//!
//! - **Component pool**: structure-of-arrays storage with generation-checked entity handles
//! - **Action input**: keys map to logical actions with begin/continue/end phases
//! - **Lighting**: one directional light plus point and spot lights
//! - **Passes**: opaque, stencil outlines, distance-sorted transparency and post-processing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recap_engine::prelude::*;
//!
//! struct Empty;
//!
//! impl Scene for Empty {
//!     fn name(&self) -> &str {
//!         "empty"
//!     }
//!
//!     fn bind_actions(&mut self, _registry: &mut ActionRegistry) {}
//!
//!     fn populate(&mut self, ctx: &mut SetupContext<'_>) -> Result<(), SceneError> {
//!         let player = ctx.world.add_entity("player");
//!         ctx.world.add_component(&player, TransformComponent::default());
//!         Ok(())
//!     }
//!
//!     fn resolve_action(&mut self, _ctx: &mut FrameContext<'_>, _entity: &Entity, _action: Action) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     recap_engine::run_windowed(EngineConfig::default(), &mut Empty)?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod platform;
pub mod render;
pub mod scene;

mod engine;

pub use engine::{run_windowed, Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, EngineConfig},
        ecs::{
            components::{
                Attenuation, CameraComponent, DirectionalLight, GeometryComponent,
                InputComponent, ModelComponent, PointLightComponent, ShaderComponent,
                SpotLightComponent, TransformComponent,
            },
            Entity, World,
        },
        foundation::math::{Quat, Vec3},
        input::{Action, ActionPhase, ActionRegistry, ActionType, KeyCode},
        render::{RenderBackend, ShaderType},
        scene::{FrameContext, Scene, SceneError, SetupContext},
        run_windowed, Engine, EngineError,
    };
}
