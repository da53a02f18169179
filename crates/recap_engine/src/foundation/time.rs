//! Frame timing

use std::time::Instant;

/// Measures the time between frames
///
/// The first [`FrameTimer::tick`] only starts the clock and reports a zero
/// delta, so a slow scene setup never turns into one huge first step.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_tick: Option<Instant>,
    delta: f32,
    elapsed: f32,
    frames: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the clock and count a frame; returns seconds since the last tick
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_tick = Some(now);
        self.step(delta);
        delta
    }

    /// Count a frame of exactly `delta` seconds without reading the clock
    pub fn step(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += delta;
        self.frames += 1;
    }

    /// Seconds covered by the last frame
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds covered by every frame so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mean frame rate, zero until time has passed
    pub fn average_fps(&self) -> f32 {
        if self.elapsed > 0.0 {
            self.frames as f32 / self.elapsed
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_tick_only_starts_the_clock() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.tick(), 0.0);
        assert_eq!(timer.frames(), 1);
        assert!(timer.tick() >= 0.0);
        assert_eq!(timer.frames(), 2);
    }

    #[test]
    fn fixed_steps_accumulate() {
        let mut timer = FrameTimer::new();
        timer.step(0.5);
        timer.step(0.25);

        assert_eq!(timer.frames(), 2);
        assert_relative_eq!(timer.delta(), 0.25);
        assert_relative_eq!(timer.elapsed(), 0.75);
        assert_relative_eq!(timer.average_fps(), 2.0 / 0.75);
    }
}
