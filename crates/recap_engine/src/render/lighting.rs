//! Light uniforms for the lit shader
//!
//! Upload order: the directional light, then the point and spot light counts,
//! then each light indexed in entity iteration order. Indices are therefore
//! not stable across entity creation or destruction. Positions and directions
//! are converted to view space.

use crate::ecs::components::{
    Attenuation, DirectionalLight, PointLightComponent, SpotLightComponent, TransformComponent,
};
use crate::ecs::World;
use crate::foundation::math::{self, Mat4, Vec3};
use crate::render::backend::{RenderBackend, UniformValue};

/// Size of the `pointLights` array in the lit shader
pub const MAX_POINT_LIGHTS: usize = 16;

/// Size of the `spotLights` array in the lit shader
pub const MAX_SPOT_LIGHTS: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct PointLightUniform {
    pub position: Vec3,
    pub attenuation: Attenuation,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotLightUniform {
    pub position: Vec3,
    pub direction: Vec3,
    pub attenuation: Attenuation,
    pub cutoff: f32,
    pub outer_cutoff: f32,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

/// Every light uniform for one frame, in view space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightUniforms {
    pub directional: DirectionalLight,
    pub point_count: usize,
    pub spot_count: usize,
    pub point_lights: Vec<PointLightUniform>,
    pub spot_lights: Vec<SpotLightUniform>,
}

impl LightUniforms {
    /// Collect the lights of every alive entity
    ///
    /// Entities created since the last reconcile are included, so the arrays
    /// cover everything the world's light counters count. A light whose owner
    /// has no transform sits at the origin facing -Z.
    pub fn gather(world: &World, view: &Mat4) -> Self {
        let global = world.global_light();
        let directional = DirectionalLight {
            direction: math::transform_direction(view, &global.direction),
            ..*global
        };

        let fallback = TransformComponent::default();
        let mut uniforms = Self {
            directional,
            point_count: world.point_light_count(),
            spot_count: world.spot_light_count(),
            ..Self::default()
        };

        for entity in world.entities().iter().chain(world.pending_entities()) {
            let transform = world
                .component::<TransformComponent>(entity)
                .unwrap_or(&fallback);

            if let Some(light) = world.component::<SpotLightComponent>(entity) {
                uniforms.spot_lights.push(SpotLightUniform {
                    position: math::transform_position(view, &transform.position),
                    direction: math::transform_direction(view, &transform.front),
                    attenuation: light.attenuation,
                    cutoff: light.cutoff,
                    outer_cutoff: light.outer_cutoff,
                    ambient: light.ambient,
                    diffuse: light.diffuse,
                    specular: light.specular,
                });
            }
            if let Some(light) = world.component::<PointLightComponent>(entity) {
                uniforms.point_lights.push(PointLightUniform {
                    position: math::transform_position(view, &transform.position),
                    attenuation: light.attenuation,
                    ambient: light.ambient,
                    diffuse: light.diffuse,
                    specular: light.specular,
                });
            }
        }

        uniforms
    }

    /// Upload to the current program
    pub fn upload<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        let d = &self.directional;
        backend.set_uniform("directionalLight.direction", d.direction.into());
        backend.set_uniform("directionalLight.ambient", splat(d.ambient));
        backend.set_uniform("directionalLight.diffuse", splat(d.diffuse));
        backend.set_uniform("directionalLight.specular", splat(d.specular));

        let point_count = shaded_count(self.point_count, self.point_lights.len(), MAX_POINT_LIGHTS, "point");
        let spot_count = shaded_count(self.spot_count, self.spot_lights.len(), MAX_SPOT_LIGHTS, "spot");
        backend.set_uniform("numOfPointLights", point_count);
        backend.set_uniform("numOfSpotLights", spot_count);

        for (i, light) in self.spot_lights.iter().take(MAX_SPOT_LIGHTS).enumerate() {
            let field = |name: &str| format!("spotLights[{}].{}", i, name);
            backend.set_uniform(&field("ambient"), splat(light.ambient));
            backend.set_uniform(&field("diffuse"), splat(light.diffuse));
            backend.set_uniform(&field("specular"), splat(light.specular));
            backend.set_uniform(&field("constant"), light.attenuation.constant.into());
            backend.set_uniform(&field("linear"), light.attenuation.linear.into());
            backend.set_uniform(&field("quadratic"), light.attenuation.quadratic.into());
            backend.set_uniform(&field("cutOff"), light.cutoff.into());
            backend.set_uniform(&field("outerCutoff"), light.outer_cutoff.into());
            backend.set_uniform(&field("position"), light.position.into());
            backend.set_uniform(&field("direction"), light.direction.into());
        }

        for (i, light) in self.point_lights.iter().take(MAX_POINT_LIGHTS).enumerate() {
            let field = |name: &str| format!("pointLights[{}].{}", i, name);
            backend.set_uniform(&field("ambient"), splat(light.ambient));
            backend.set_uniform(&field("diffuse"), splat(light.diffuse));
            backend.set_uniform(&field("specular"), splat(light.specular));
            backend.set_uniform(&field("constant"), light.attenuation.constant.into());
            backend.set_uniform(&field("linear"), light.attenuation.linear.into());
            backend.set_uniform(&field("quadratic"), light.attenuation.quadratic.into());
            backend.set_uniform(&field("position"), light.position.into());
        }
    }
}

fn splat(value: f32) -> UniformValue {
    UniformValue::Vec3(Vec3::repeat(value))
}

/// Number of lights the shader may index: never more than were gathered
fn shaded_count(counted: usize, gathered: usize, max: usize, kind: &str) -> UniformValue {
    if counted != gathered {
        log::trace!("{} {} lights counted but {} gathered", counted, kind, gathered);
    }
    let count = counted.min(gathered);
    if count > max {
        log::warn!("{} {} lights in scene, shading only {}", count, kind, max);
    }
    UniformValue::Int(count.min(max) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::commands::RecordingBackend;
    use approx::assert_relative_eq;

    #[test]
    fn lights_are_indexed_in_entity_order_in_view_space() {
        let mut world = World::new();
        for x in [1.0, 2.0] {
            let lamp = world.add_entity("lamp");
            world.add_component(&lamp, TransformComponent::from_position(Vec3::new(x, 0.0, 0.0)));
            world.add_component(&lamp, PointLightComponent::default());
        }
        world.reconcile();

        let view = Mat4::new_translation(&Vec3::new(0.0, 0.0, -5.0));
        let uniforms = LightUniforms::gather(&world, &view);

        assert_eq!(uniforms.point_count, 2);
        assert_relative_eq!(uniforms.point_lights[0].position, Vec3::new(1.0, 0.0, -5.0));
        assert_relative_eq!(uniforms.point_lights[1].position, Vec3::new(2.0, 0.0, -5.0));
    }

    #[test]
    fn upload_writes_counts_and_named_fields() {
        let mut world = World::new();
        let torch = world.add_entity("torch");
        world.add_component(&torch, SpotLightComponent::default());
        world.set_global_light(DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0)));
        world.reconcile();

        let mut backend = RecordingBackend::default();
        LightUniforms::gather(&world, &Mat4::identity()).upload(&mut backend);

        assert_eq!(backend.uniform("numOfSpotLights"), Some(UniformValue::Int(1)));
        assert_eq!(backend.uniform("numOfPointLights"), Some(UniformValue::Int(0)));
        assert_eq!(
            backend.uniform("spotLights[0].direction"),
            Some(UniformValue::Vec3(Vec3::new(0.0, 0.0, -1.0)))
        );
        assert_eq!(
            backend.uniform("directionalLight.ambient"),
            Some(UniformValue::Vec3(Vec3::repeat(0.1)))
        );
    }

    #[test]
    fn lights_spawned_between_reconciles_are_uploaded() {
        let mut world = World::new();
        world.reconcile();
        let lamp = world.add_entity("lamp");
        world.add_component(&lamp, TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0)));
        world.add_component(&lamp, PointLightComponent::default());

        let uniforms = LightUniforms::gather(&world, &Mat4::identity());
        assert_eq!(uniforms.point_count, 1);
        assert_eq!(uniforms.point_lights.len(), 1);

        let mut backend = RecordingBackend::default();
        uniforms.upload(&mut backend);
        assert_eq!(backend.uniform("numOfPointLights"), Some(UniformValue::Int(1)));
        assert_eq!(
            backend.uniform("pointLights[0].position"),
            Some(UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0)))
        );
    }

    #[test]
    fn uploaded_count_never_exceeds_gathered_lights() {
        let mut world = World::new();
        let lamp = world.add_entity("lamp");
        world.add_component(&lamp, PointLightComponent::default());
        world.reconcile();

        let mut uniforms = LightUniforms::gather(&world, &Mat4::identity());
        uniforms.point_count = 3;

        let mut backend = RecordingBackend::default();
        uniforms.upload(&mut backend);
        assert_eq!(backend.uniform("numOfPointLights"), Some(UniformValue::Int(1)));
        assert_eq!(backend.uniform("pointLights[1].position"), None);
    }

    #[test]
    fn entities_destroyed_this_frame_are_skipped() {
        let mut world = World::new();
        let lamp = world.add_entity("lamp");
        world.add_component(&lamp, PointLightComponent::default());
        world.reconcile();
        world.destroy_entity(&lamp);

        let uniforms = LightUniforms::gather(&world, &Mat4::identity());
        assert_eq!(uniforms.point_count, 0);
        assert!(uniforms.point_lights.is_empty());
    }
}
