//! Core engine implementation
//!
//! One call to [`Engine::frame`] runs one frame, always in this order:
//!
//! 1. measure the frame time
//! 2. reconcile the entity manager
//! 3. sample input (keys and mouse look); the close key stops the loop
//! 4. the scene's per-frame hook
//! 5. action resolution
//! 6. transform integration
//! 7. camera and light uniforms
//! 8. draw submission
//! 9. the optional post-processing resolve, then buffer swap

use thiserror::Error;

use crate::config::{ConfigError, EngineConfig};
use crate::ecs::system::System;
use crate::ecs::systems::{resolve_actions, TransformSystem};
use crate::ecs::World;
use crate::foundation::time::FrameTimer;
use crate::input::{ActionRegistry, InputSource, KeyCode, MouseLook};
use crate::platform::{GlfwPlatform, Platform, PlatformError, PlatformEvent};
use crate::render::gl::GlBackend;
use crate::render::{Camera, FrameRenderer, RenderBackend, RenderError};
use crate::scene::{FrameContext, Scene, SceneError, SetupContext};

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A frame was requested before a scene was started
    #[error("Engine has not been started with a scene")]
    NotStarted,

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Main engine struct
///
/// Owns the world and every per-frame subsystem. The render back end is a
/// type parameter so the same loop drives OpenGL or a recording back end.
pub struct Engine<B: RenderBackend> {
    config: EngineConfig,
    world: World,
    registry: ActionRegistry,
    mouse: MouseLook,
    timer: FrameTimer,
    transforms: TransformSystem,
    renderer: FrameRenderer,
    backend: B,
    started: bool,
}

impl<B: RenderBackend> Engine<B> {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, backend: B) -> Self {
        log::info!("Initializing engine...");
        Self {
            world: World::with_pool(&config.pool),
            registry: ActionRegistry::new(),
            mouse: MouseLook::new(config.input.mouse_sensitivity),
            timer: FrameTimer::new(),
            transforms: TransformSystem::new(),
            renderer: FrameRenderer::new(),
            backend,
            config,
            started: false,
        }
    }

    /// Bind the scene's actions, let it populate the world, then reconcile
    pub fn start<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<(), EngineError> {
        log::info!("Starting scene '{}'", scene.name());
        scene.bind_actions(&mut self.registry);

        let mut ctx = SetupContext {
            world: &mut self.world,
            resources: &mut self.backend,
            config: &self.config,
        };
        scene.populate(&mut ctx)?;

        self.world.reconcile();
        self.timer = FrameTimer::new();
        self.started = true;
        log::info!(
            "Scene '{}' ready with {} entities",
            scene.name(),
            self.world.entities().len()
        );
        Ok(())
    }

    /// Run one frame, timed by the wall clock
    pub fn frame<P, S>(&mut self, platform: &mut P, scene: &mut S) -> Result<(), EngineError>
    where
        P: Platform + ?Sized,
        S: Scene + ?Sized,
    {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        let delta_time = self.timer.tick();
        self.run_frame(platform, scene, delta_time);
        Ok(())
    }

    /// Run one frame with a fixed time step
    pub fn frame_with_delta<P, S>(&mut self, platform: &mut P, scene: &mut S, delta_time: f32) -> Result<(), EngineError>
    where
        P: Platform + ?Sized,
        S: Scene + ?Sized,
    {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        self.timer.step(delta_time);
        self.run_frame(platform, scene, delta_time);
        Ok(())
    }

    /// Start `scene` if needed and run frames until the platform closes
    pub fn run<P, S>(&mut self, platform: &mut P, scene: &mut S) -> Result<(), EngineError>
    where
        P: Platform + ?Sized,
        S: Scene + ?Sized,
    {
        if !self.started {
            self.start(scene)?;
        }

        log::info!("Starting main loop...");
        while !platform.should_close() {
            self.frame(platform, scene)?;
        }

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            self.timer.frames(),
            self.timer.average_fps()
        );
        Ok(())
    }

    fn run_frame<P, S>(&mut self, platform: &mut P, scene: &mut S, delta_time: f32)
    where
        P: Platform + ?Sized,
        S: Scene + ?Sized,
    {
        self.world.reconcile();

        self.process_events(platform);
        if platform.is_key_pressed(KeyCode::CLOSE) {
            log::info!("Close requested");
            platform.set_should_close(true);
        }
        self.registry.sample(&*platform);

        let mut ctx = FrameContext {
            world: &mut self.world,
            delta_time,
            input: &self.config.input,
        };
        scene.on_update(&mut ctx);
        resolve_actions(scene, &self.registry, &mut ctx);

        self.transforms.run(&mut self.world);

        let camera = Camera::from_world(&self.world, &self.config.camera, self.backend.viewport());
        self.renderer
            .render(&self.world, &camera, &self.config.render, &mut self.backend);
        platform.swap_buffers();
    }

    fn process_events<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        for event in platform.poll_events() {
            match event {
                PlatformEvent::CursorMoved { x, y } => {
                    if let Some(offset) = self.mouse.sample(x, y) {
                        self.world
                            .mouse_look(offset.x, offset.y, self.config.input.constrain_pitch);
                    }
                }
                PlatformEvent::FramebufferResized { width, height } => {
                    self.backend.resize(width, height);
                }
                PlatformEvent::CloseRequested => platform.set_should_close(true),
            }
        }
    }

    /// Get the ECS world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// Open a GLFW window and run `scene` on the OpenGL back end until closed
pub fn run_windowed<S: Scene + ?Sized>(config: EngineConfig, scene: &mut S) -> Result<(), EngineError> {
    let mut platform = GlfwPlatform::new(&config.window)?;
    let backend = GlBackend::new(&config.render, &config.window, platform.framebuffer_size());
    let mut engine = Engine::new(config, backend);
    engine.run(&mut platform, scene)
}
