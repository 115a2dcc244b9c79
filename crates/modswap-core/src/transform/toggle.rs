// Modswap Toggle Controller
// Flips the activation flag on each press of the bound key

use crate::state::ActivationState;
use crate::Action;

/// Handles the binding's pressed/released callbacks.
#[derive(Debug, Clone, Copy)]
pub struct ToggleController<'a> {
    activation: &'a ActivationState,
}

impl<'a> ToggleController<'a> {
    pub fn new(activation: &'a ActivationState) -> Self {
        Self { activation }
    }

    /// Negate the activation flag, returning the new state
    pub fn on_activation_trigger(&self) -> bool {
        let active = self.activation.toggle();
        log::info!("mod swap is now {}", state_name(active));
        active
    }

    pub fn on_binding_pressed(&self) -> bool {
        self.on_activation_trigger()
    }

    /// Release edges never change the state
    pub fn on_binding_released(&self) -> bool {
        self.activation.is_active()
    }

    /// Dispatch a binding edge; returns the state afterwards
    pub fn on_binding(&self, action: Action) -> bool {
        match action {
            Action::Press => self.on_binding_pressed(),
            Action::Release => self.on_binding_released(),
        }
    }
}

pub(crate) fn state_name(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "inactive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_toggles() {
        let state = ActivationState::default();
        let toggle = ToggleController::new(&state);
        assert!(toggle.on_binding_pressed());
        assert!(state.is_active());
        assert!(!toggle.on_binding_pressed());
        assert!(!state.is_active());
    }

    #[test]
    fn test_release_is_ignored() {
        let state = ActivationState::default();
        let toggle = ToggleController::new(&state);
        assert!(!toggle.on_binding_released());
        assert!(!state.is_active());

        toggle.on_binding(Action::Press);
        assert!(toggle.on_binding(Action::Release));
        assert!(state.is_active());
    }

    #[test]
    fn test_state_name() {
        assert_eq!(state_name(true), "active");
        assert_eq!(state_name(false), "inactive");
    }
}
