//! Light components
//!
//! Point and spot lights are pool components and count toward the scene
//! light totals. The directional light is global scene state, not a
//! component.

use crate::ecs::component::ComponentHeader;
use crate::foundation::math::Vec3;

/// Constant/linear/quadratic falloff: `1 / (c + l*d + q*d^2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    /// Roughly a 50 unit range
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

impl Attenuation {
    /// Light factor reaching `distance`
    pub fn factor(&self, distance: f32) -> f32 {
        let denominator = self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denominator > 0.0 {
            1.0 / denominator
        } else {
            0.0
        }
    }
}

/// Omnidirectional light at the owner's position
#[derive(Debug, Clone, PartialEq)]
pub struct PointLightComponent {
    pub(crate) header: ComponentHeader,
    pub attenuation: Attenuation,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl Default for PointLightComponent {
    fn default() -> Self {
        Self {
            header: ComponentHeader::default(),
            attenuation: Attenuation::default(),
            ambient: 0.3,
            diffuse: 1.0,
            specular: 1.0,
        }
    }
}

/// Cone light along the owner's `front`
///
/// Cutoffs are stored as cosines; `cutoff > outer_cutoff` gives a soft edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLightComponent {
    pub(crate) header: ComponentHeader,
    pub attenuation: Attenuation,
    pub cutoff: f32,
    pub outer_cutoff: f32,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl Default for SpotLightComponent {
    fn default() -> Self {
        Self {
            header: ComponentHeader::default(),
            attenuation: Attenuation::default(),
            cutoff: 12.5_f32.to_radians().cos(),
            outer_cutoff: 20.0_f32.to_radians().cos(),
            ambient: 0.2,
            diffuse: 1.0,
            specular: 1.0,
        }
    }
}

impl SpotLightComponent {
    /// Builder pattern: Set the inner and outer cone angles in degrees
    pub fn with_cone_degrees(mut self, inner: f32, outer: f32) -> Self {
        self.cutoff = inner.to_radians().cos();
        self.outer_cutoff = outer.to_radians().cos();
        self
    }
}

/// Global sun-style light
///
/// All-zero until a scene calls `World::set_global_light`, which leaves the
/// scene lit only by point and spot lights.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl DirectionalLight {
    /// Light with the default intensities
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction,
            ambient: 0.1,
            diffuse: 1.0,
            specular: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn attenuation_is_one_at_the_source() {
        assert_relative_eq!(Attenuation::default().factor(0.0), 1.0);
    }

    #[test]
    fn spot_cutoffs_are_cosines() {
        let spot = SpotLightComponent::default();
        assert!(spot.cutoff > spot.outer_cutoff);
        assert_relative_eq!(spot.cutoff, 0.976_296, epsilon = 1e-5);
    }
}
