//! Frame renderer
//!
//! Turns the world into back end calls once per frame:
//!
//! 1. opaque entities that are not outlined
//! 2. outlined entities, each drawn into the stencil buffer and then again as
//!    a scaled silhouette wherever the stencil was not written
//! 3. transparent entities, farthest from the camera first (blending only)
//! 4. the post-processing resolve, when enabled
//!
//! An entity is drawable when it is alive, has a transform and a model or
//! geometry, and carries no camera.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::RenderConfig;
use crate::ecs::components::{
    CameraComponent, GeometryComponent, ModelComponent, ShaderComponent, TransformComponent,
};
use crate::ecs::{Entity, World};
use crate::foundation::math::{self, Mat4, Vec3};
use crate::render::backend::{RenderBackend, StencilMode};
use crate::render::camera::Camera;
use crate::render::lighting::LightUniforms;
use crate::render::ShaderType;

/// Distance from the camera, ordered with `f32::total_cmp`
#[derive(Debug, Clone, Copy)]
struct Distance(f32);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Entities to draw this frame, grouped by pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawPlan {
    pub opaque: Vec<Entity>,
    pub outlined: Vec<Entity>,
    /// Farthest first; entities at equal distances keep iteration order
    pub transparent: Vec<Entity>,
}

impl DrawPlan {
    pub fn len(&self) -> usize {
        self.opaque.len() + self.outlined.len() + self.transparent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-frame matrices shared by every draw
struct FrameState {
    view: Mat4,
    projection: Mat4,
}

#[derive(Debug, Default)]
pub struct FrameRenderer {
    frames: u64,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sort drawable entities into passes
    ///
    /// Without blending, transparent models are drawn with the opaque ones.
    pub fn plan(world: &World, camera_position: &Vec3, blending: bool) -> DrawPlan {
        let mut plan = DrawPlan::default();
        let mut by_distance: BTreeMap<Distance, Vec<Entity>> = BTreeMap::new();

        for entity in world.entities() {
            if !world.is_alive(entity) || world.has_component::<CameraComponent>(entity) {
                continue;
            }
            let Some(transform) = world.component::<TransformComponent>(entity) else {
                continue;
            };
            let model = world.component::<ModelComponent>(entity);
            if model.is_none() && !world.has_component::<GeometryComponent>(entity) {
                continue;
            }

            match model {
                Some(model) if model.outlined => plan.outlined.push(entity.clone()),
                Some(model) if model.transparent && blending => {
                    let distance = Distance((transform.position - camera_position).norm());
                    by_distance.entry(distance).or_default().push(entity.clone());
                }
                _ => plan.opaque.push(entity.clone()),
            }
        }

        plan.transparent = by_distance.into_values().rev().flatten().collect();
        plan
    }

    /// Render one frame of `world` from `camera`
    pub fn render<B: RenderBackend + ?Sized>(
        &mut self,
        world: &World,
        camera: &Camera,
        config: &RenderConfig,
        backend: &mut B,
    ) {
        backend.begin_frame(config.clear_color, config.post_processing);
        backend.set_depth_test(true);
        backend.set_blending(config.blending);
        backend.set_stencil(StencilMode::Ignore);

        let frame = FrameState {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
        };

        backend.use_shader(ShaderType::Default);
        backend.set_uniform("view", frame.view.into());
        backend.set_uniform("projection", frame.projection.into());
        backend.set_uniform("material.shininess", config.shininess.into());
        backend.set_uniform("camInfo.near", camera.near.into());
        backend.set_uniform("camInfo.far", camera.far.into());
        LightUniforms::gather(world, &frame.view).upload(backend);

        let plan = Self::plan(world, &camera.position, config.blending);
        log::trace!(
            "Frame {}: {} opaque, {} outlined, {} transparent",
            self.frames,
            plan.opaque.len(),
            plan.outlined.len(),
            plan.transparent.len()
        );

        for entity in &plan.opaque {
            Self::draw_entity(world, entity, &frame, backend);
        }

        for entity in &plan.outlined {
            backend.set_stencil(StencilMode::Write);
            Self::draw_entity(world, entity, &frame, backend);
            Self::draw_outline(world, entity, &frame, config.outline_scale, backend);
        }

        for entity in &plan.transparent {
            Self::draw_entity(world, entity, &frame, backend);
        }

        if config.post_processing {
            backend.present_post_process(config.post_effect);
        }
        self.frames += 1;
    }

    fn draw_entity<B: RenderBackend + ?Sized>(world: &World, entity: &Entity, frame: &FrameState, backend: &mut B) {
        let Some(transform) = world.component::<TransformComponent>(entity) else {
            log::warn!("Drawing {} which has no transform", entity);
            return;
        };

        let shader = world
            .component::<ShaderComponent>(entity)
            .map_or(ShaderType::Default, |binding| binding.shader);
        backend.use_shader(shader);
        if shader != ShaderType::Default {
            backend.set_uniform("view", frame.view.into());
            backend.set_uniform("projection", frame.projection.into());
            backend.set_uniform("color", Vec3::repeat(1.0).into());
        }

        let model = transform.model_matrix();
        backend.set_uniform("model", model.into());
        backend.set_uniform("normalMatrix", math::normal_matrix(&(frame.view * model)).into());
        Self::submit(world, entity, backend);
    }

    fn draw_outline<B: RenderBackend + ?Sized>(
        world: &World,
        entity: &Entity,
        frame: &FrameState,
        outline_scale: f32,
        backend: &mut B,
    ) {
        let (Some(transform), Some(model)) = (
            world.component::<TransformComponent>(entity),
            world.component::<ModelComponent>(entity),
        ) else {
            log::warn!("Outlining {} which lacks a transform or model", entity);
            return;
        };

        backend.use_shader(ShaderType::Outline);
        backend.set_uniform("view", frame.view.into());
        backend.set_uniform("projection", frame.projection.into());
        backend.set_uniform("model", transform.scaled_model_matrix(outline_scale).into());
        backend.set_uniform("color", model.outline_color.into());

        backend.set_stencil(StencilMode::OutlineFringe);
        backend.set_depth_test(false);
        Self::submit(world, entity, backend);
        backend.set_stencil(StencilMode::Ignore);
        backend.set_depth_test(true);
    }

    fn submit<B: RenderBackend + ?Sized>(world: &World, entity: &Entity, backend: &mut B) {
        if let Some(handle) = world.component::<ModelComponent>(entity).and_then(|m| m.model) {
            backend.draw_model(handle);
        } else if let Some(geometry) = world.component::<GeometryComponent>(entity) {
            match geometry.geometry {
                Some(handle) => backend.draw_geometry(handle, geometry.vertex_count),
                None => log::warn!("{} has no uploaded geometry", entity),
            }
        } else {
            log::warn!("{} has nothing to draw", entity);
        }
    }
}
