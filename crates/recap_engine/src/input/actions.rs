//! Logical actions and the per-frame action registry

use std::collections::BTreeMap;

use super::{InputSource, KeyCode};

/// Logical input events, decoupled from the keys that trigger them
///
/// The `Alt` variants move an entity relative to the main camera's basis
/// instead of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    MoveForward,
    MoveBackward,
    StrafeRight,
    StrafeLeft,
    MoveUp,
    MoveDown,
    MoveForwardAlt,
    MoveBackwardAlt,
    StrafeRightAlt,
    StrafeLeftAlt,
    MoveUpAlt,
    MoveDownAlt,
    ToggleFlashlight,
    Run,
    RotateX,
    RotateY,
    RotateZ,
    Use,
}

/// Edge-versus-held state of an action within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// Pressed this frame
    Begin,
    /// Held since an earlier frame
    Continue,
    /// Released this frame; reported for exactly one frame
    End,
}

/// A registered action and its phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionType,
    pub phase: ActionPhase,
}

impl Action {
    pub fn new(kind: ActionType, phase: ActionPhase) -> Self {
        Self { kind, phase }
    }
}

/// Key bindings plus the actions currently registered
#[derive(Debug, Default)]
pub struct ActionRegistry {
    bindings: BTreeMap<KeyCode, ActionType>,
    registered: Vec<Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, replacing any previous binding of that key
    pub fn bind_key(&mut self, key: KeyCode, action: ActionType) {
        if let Some(previous) = self.bindings.insert(key, action) {
            log::debug!("Key {:?} rebound from {:?} to {:?}", key, previous, action);
        }
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    pub fn bindings(&self) -> impl Iterator<Item = (KeyCode, ActionType)> + '_ {
        self.bindings.iter().map(|(key, action)| (*key, *action))
    }

    /// Advance every bound action by one frame of input
    ///
    /// Actions that ended last frame are dropped first. Then, per binding: a
    /// newly pressed key registers `Begin`, a held key moves to `Continue`
    /// and a released key moves to `End`.
    pub fn sample<I: InputSource + ?Sized>(&mut self, input: &I) {
        self.registered.retain(|action| action.phase != ActionPhase::End);

        for (&key, &kind) in &self.bindings {
            let pressed = input.is_key_pressed(key);
            let found = self.registered.iter().position(|action| action.kind == kind);

            match (pressed, found) {
                (true, None) => self.registered.push(Action::new(kind, ActionPhase::Begin)),
                (true, Some(index)) => self.registered[index].phase = ActionPhase::Continue,
                (false, Some(index)) => self.registered[index].phase = ActionPhase::End,
                (false, None) => {}
            }
        }
    }

    /// The registered state of `kind`, if any
    pub fn registered(&self, kind: ActionType) -> Option<Action> {
        self.registered.iter().find(|action| action.kind == kind).copied()
    }

    pub fn registered_actions(&self) -> &[Action] {
        &self.registered
    }

    /// Forget every registered action
    pub fn clear(&mut self) {
        self.registered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;

    fn phases(registry: &mut ActionRegistry, keys: &mut KeyState, pressed: &[bool]) -> Vec<Option<ActionPhase>> {
        pressed
            .iter()
            .map(|&down| {
                if down {
                    keys.press(KeyCode::W);
                } else {
                    keys.release(KeyCode::W);
                }
                registry.sample(&*keys);
                registry.registered(ActionType::MoveForward).map(|action| action.phase)
            })
            .collect()
    }

    #[test]
    fn press_hold_release_sequence() {
        let mut registry = ActionRegistry::new();
        registry.bind_key(KeyCode::W, ActionType::MoveForward);
        let mut keys = KeyState::new();

        let observed = phases(&mut registry, &mut keys, &[true, true, true, false, false, false]);
        assert_eq!(
            observed,
            vec![
                Some(ActionPhase::Begin),
                Some(ActionPhase::Continue),
                Some(ActionPhase::Continue),
                Some(ActionPhase::End),
                None,
                None,
            ]
        );
    }

    #[test]
    fn tap_reports_begin_then_end() {
        let mut registry = ActionRegistry::new();
        registry.bind_key(KeyCode::W, ActionType::MoveForward);
        let mut keys = KeyState::new();

        let observed = phases(&mut registry, &mut keys, &[true, false, true]);
        assert_eq!(
            observed,
            vec![Some(ActionPhase::Begin), Some(ActionPhase::End), Some(ActionPhase::Begin)]
        );
    }

    #[test]
    fn unbound_keys_register_nothing() {
        let mut registry = ActionRegistry::new();
        registry.bind_key(KeyCode::W, ActionType::MoveForward);
        registry.unbind_key(KeyCode::W);
        let mut keys = KeyState::new();
        keys.press(KeyCode::W);

        registry.sample(&keys);
        assert!(registry.registered_actions().is_empty());
    }
}
