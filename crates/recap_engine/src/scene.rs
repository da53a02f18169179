//! Scenes: the game logic plugged into the engine loop
//!
//! The engine calls a scene at fixed points: `bind_actions` and `populate`
//! once at start, then every frame `on_update` after input sampling and
//! `resolve_action` for each registered action an entity is bound to.

use thiserror::Error;

use crate::config::{EngineConfig, InputConfig};
use crate::ecs::{Entity, World};
use crate::input::{Action, ActionRegistry};
use crate::render::{RenderError, ResourceLoader};

/// Scene setup errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// A resource the scene cannot do without failed to load
    #[error("Resource error: {0}")]
    Resource(#[from] RenderError),

    #[error("Scene setup failed: {0}")]
    Setup(String),
}

/// What a scene may touch while populating the world
pub struct SetupContext<'a> {
    pub world: &'a mut World,
    pub resources: &'a mut dyn ResourceLoader,
    pub config: &'a EngineConfig,
}

/// What a scene may touch during a frame
pub struct FrameContext<'a> {
    pub world: &'a mut World,
    /// Seconds since the previous frame
    pub delta_time: f32,
    pub input: &'a InputConfig,
}

/// Game logic for one scene
pub trait Scene {
    fn name(&self) -> &str;

    /// Bind physical keys to logical actions
    fn bind_actions(&mut self, registry: &mut ActionRegistry);

    /// Create the initial entities
    fn populate(&mut self, ctx: &mut SetupContext<'_>) -> Result<(), SceneError>;

    /// Per-frame hook, before actions are resolved
    fn on_update(&mut self, _ctx: &mut FrameContext<'_>) {}

    /// React to `action` on behalf of `entity`
    fn resolve_action(&mut self, ctx: &mut FrameContext<'_>, entity: &Entity, action: Action);
}
