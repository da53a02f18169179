//! Input component: the logical actions an entity reacts to

use crate::ecs::component::ComponentHeader;
use crate::input::ActionType;

/// Actions routed to the owning entity by the action system
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputComponent {
    pub(crate) header: ComponentHeader,
    pub actions: Vec<ActionType>,
}

impl InputComponent {
    /// Create with an initial set of actions
    pub fn with_actions(actions: impl IntoIterator<Item = ActionType>) -> Self {
        let mut component = Self::default();
        for action in actions {
            component.bind_action(action);
        }
        component
    }

    /// Route `action` to this entity; binding twice is a no-op
    pub fn bind_action(&mut self, action: ActionType) {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
    }

    /// Stop routing `action` to this entity
    pub fn unbind_action(&mut self, action: ActionType) {
        self.actions.retain(|bound| *bound != action);
    }

    pub fn responds_to(&self, action: ActionType) -> bool {
        self.actions.contains(&action)
    }
}
