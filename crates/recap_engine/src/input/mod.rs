//! Input: physical keys, logical actions and mouse look
//!
//! Scenes bind physical keys to logical [`ActionType`]s. Each frame the
//! [`ActionRegistry`] samples an [`InputSource`] and tracks every bound action
//! through the begin/continue/end phases; entities receive only the logical
//! actions they opted into.

pub mod actions;
pub mod mouse;

use serde::{Deserialize, Serialize};

pub use actions::{Action, ActionPhase, ActionRegistry, ActionType};
pub use mouse::MouseLook;

/// Physical keys the engine can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    LeftShift,
}

impl KeyCode {
    /// Key that requests the engine to close
    pub const CLOSE: Self = Self::Escape;
}

/// Current keyboard state
pub trait InputSource {
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// Fixed key state, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: std::collections::BTreeSet<KeyCode>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }
}

impl InputSource for KeyState {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}
