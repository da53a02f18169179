//! Cursor tracking for mouse look

use crate::foundation::math::Vec2;

/// Turns absolute cursor positions into sensitivity-scaled offsets
#[derive(Debug, Clone)]
pub struct MouseLook {
    sensitivity: f32,
    last: Option<Vec2>,
}

impl MouseLook {
    pub fn new(sensitivity: f32) -> Self {
        Self { sensitivity, last: None }
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Record a cursor position and return the scaled offset since the last one
    ///
    /// The first position only primes the tracker and yields `None`.
    pub fn sample(&mut self, x: f64, y: f64) -> Option<Vec2> {
        let position = Vec2::new(x as f32, y as f32);
        let offset = self
            .last
            .map(|last| (position - last) * self.sensitivity);
        self.last = Some(position);
        offset
    }

    /// Forget the last position, e.g. after the cursor was recaptured
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_sample_primes() {
        let mut mouse = MouseLook::new(0.1);
        assert!(mouse.sample(800.0, 450.0).is_none());

        let offset = mouse.sample(810.0, 440.0).unwrap();
        assert_relative_eq!(offset, Vec2::new(1.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn reset_primes_again() {
        let mut mouse = MouseLook::new(1.0);
        mouse.sample(0.0, 0.0);
        mouse.reset();
        assert!(mouse.sample(5.0, 5.0).is_none());
    }
}
