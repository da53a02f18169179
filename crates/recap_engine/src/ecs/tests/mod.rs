//! Scenario tests driving the pool, the entity manager and the full frame
//! loop headless

mod frame_scenarios;

use std::collections::VecDeque;

use crate::input::{InputSource, KeyCode, KeyState};
use crate::platform::{Platform, PlatformEvent};

/// A window that never opens: keys and events are scripted by the test
#[derive(Default)]
pub(crate) struct ScriptedPlatform {
    pub keys: KeyState,
    pub events: VecDeque<PlatformEvent>,
    pub closed: bool,
    pub swaps: usize,
    /// Close after this many presented frames
    pub frame_limit: Option<usize>,
}

impl ScriptedPlatform {
    pub fn with_frame_limit(frames: usize) -> Self {
        Self {
            frame_limit: Some(frames),
            ..Default::default()
        }
    }
}

impl InputSource for ScriptedPlatform {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.is_key_pressed(key)
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.events.drain(..).collect()
    }

    fn should_close(&self) -> bool {
        self.closed
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.closed = should_close;
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
        if self.frame_limit.is_some_and(|limit| self.swaps >= limit) {
            self.closed = true;
        }
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        (1600, 900)
    }
}
