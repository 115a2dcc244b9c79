// Modswap Event Interceptor
// Runs every registered swap unit over each pressed modifier notification
//
// The event is rewritten in place and handed back to the host; nothing is
// re-raised, so exactly one event continues downstream.

use smallvec::SmallVec;
use strum_macros::Display;

use crate::input::ModifierNotification;
use crate::state::{ActivationState, SwapRegistry};
use crate::transform::SwapOutcome;
use crate::{Action, Mods};

/// Why an event went through untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SkipReason {
    /// Event missing or its state flag unreadable
    Malformed,
    /// Released edge
    Released,
    /// Swapping is switched off
    Inactive,
}

/// Outcome of one unit's rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitOutcome {
    pub index: u8,
    pub outcome: SwapOutcome,
}

/// Diagnostic summary of one interception
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapReport {
    Skipped(SkipReason),
    Applied {
        before: Mods,
        after: Mods,
        outcomes: SmallVec<[UnitOutcome; 4]>,
    },
}

impl SwapReport {
    /// True when the event's modifiers were rewritten
    pub fn changed(&self) -> bool {
        match self {
            SwapReport::Skipped(_) => false,
            SwapReport::Applied { before, after, .. } => before != after,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            SwapReport::Skipped(reason) => Some(*reason),
            SwapReport::Applied { .. } => None,
        }
    }
}

/// Listener for modifier notifications.
#[derive(Debug, Clone, Copy)]
pub struct EventInterceptor<'a> {
    registry: &'a SwapRegistry,
    activation: &'a ActivationState,
}

impl<'a> EventInterceptor<'a> {
    pub fn new(registry: &'a SwapRegistry, activation: &'a ActivationState) -> Self {
        Self {
            registry,
            activation,
        }
    }

    /// Rewrite `event` in place when swapping is active.
    ///
    /// Released edges, unreadable events and events arriving while inactive
    /// pass through unchanged. Otherwise units run in index order, each one
    /// seeing the result of the previous.
    pub fn on_modifier_event<E: ModifierNotification + ?Sized>(
        &self,
        event: Option<&mut E>,
    ) -> SwapReport {
        let Some(event) = event else {
            log::trace!("mod swap: no event payload, passing through");
            return SwapReport::Skipped(SkipReason::Malformed);
        };

        match event.action() {
            None => {
                log::trace!("mod swap: unreadable state flag, passing through");
                return SwapReport::Skipped(SkipReason::Malformed);
            }
            Some(Action::Release) => return SwapReport::Skipped(SkipReason::Released),
            Some(Action::Press) => {}
        }

        if !self.activation.is_active() {
            return SwapReport::Skipped(SkipReason::Inactive);
        }

        let before = event.modifiers();
        let mut outcomes = SmallVec::new();
        for unit in self.registry.iter() {
            let outcome = unit.apply(&mut *event);
            log::trace!("mod swap: unit {} -> {}", unit.config(), outcome);
            outcomes.push(UnitOutcome {
                index: unit.index(),
                outcome,
            });
        }
        let after = event.modifiers();

        log::debug!(
            "mod swap: {} (0x{:02x}) -> {} (0x{:02x})",
            before,
            before.bits(),
            after,
            after.bits()
        );

        SwapReport::Applied {
            before,
            after,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwapConfig;
    use crate::input::{KeycodeEvent, ModifierEvent};
    use crate::transform::SwapUnit;

    fn registry_with(units: &[(u8, Mods, Mods)]) -> SwapRegistry {
        let mut registry = SwapRegistry::new(8);
        for &(index, first, second) in units {
            let config = SwapConfig::new(index, first, second).unwrap();
            registry
                .register(SwapUnit::new(config), index as usize)
                .unwrap();
        }
        registry
    }

    fn ctrl_gui() -> SwapRegistry {
        registry_with(&[(0, Mods::LEFT_CTRL, Mods::LEFT_GUI)])
    }

    #[test]
    fn test_active_ctrl_becomes_gui() {
        let registry = ctrl_gui();
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);

        let mut ev = ModifierEvent::pressed(Mods::from_bits(0x01));
        let report = interceptor.on_modifier_event(Some(&mut ev));
        assert_eq!(ev.modifiers.bits(), 0x08);
        assert!(report.changed());
        assert_eq!(
            report,
            SwapReport::Applied {
                before: Mods::LEFT_CTRL,
                after: Mods::LEFT_GUI,
                outcomes: SmallVec::from_slice(&[UnitOutcome {
                    index: 0,
                    outcome: SwapOutcome::FirstToSecond
                }]),
            }
        );
    }

    #[test]
    fn test_both_set_unchanged() {
        let registry = ctrl_gui();
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);

        let mut ev = ModifierEvent::pressed(Mods::from_bits(0x09));
        let report = interceptor.on_modifier_event(Some(&mut ev));
        assert_eq!(ev.modifiers.bits(), 0x09);
        assert!(!report.changed());
    }

    #[test]
    fn test_inactive_passes_through() {
        let registry = ctrl_gui();
        let inactive = ActivationState::default();
        let interceptor = EventInterceptor::new(&registry, &inactive);

        let mut ev = ModifierEvent::pressed(Mods::from_bits(0x01));
        let report = interceptor.on_modifier_event(Some(&mut ev));
        assert_eq!(ev.modifiers.bits(), 0x01);
        assert_eq!(report.skip_reason(), Some(SkipReason::Inactive));
    }

    #[test]
    fn test_released_never_mutated() {
        let registry = ctrl_gui();
        for active in [false, true] {
            let state = ActivationState::new(active);
            let interceptor = EventInterceptor::new(&registry, &state);
            for bits in 0..=u8::MAX {
                let mut ev = ModifierEvent::released(Mods::from_bits(bits));
                let report = interceptor.on_modifier_event(Some(&mut ev));
                assert_eq!(ev.modifiers.bits(), bits);
                assert_eq!(report.skip_reason(), Some(SkipReason::Released));
            }
        }
    }

    #[test]
    fn test_missing_event_is_malformed() {
        let registry = ctrl_gui();
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);
        let report = interceptor.on_modifier_event::<ModifierEvent>(None);
        assert_eq!(report.skip_reason(), Some(SkipReason::Malformed));
    }

    struct UnreadableState {
        modifiers: Mods,
    }

    impl ModifierNotification for UnreadableState {
        fn action(&self) -> Option<Action> {
            None
        }

        fn modifier_masks_mut(&mut self) -> SmallVec<[&mut Mods; 2]> {
            smallvec::smallvec![&mut self.modifiers]
        }

        fn modifiers(&self) -> Mods {
            self.modifiers
        }
    }

    #[test]
    fn test_unreadable_state_is_malformed() {
        let registry = ctrl_gui();
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);
        let mut ev = UnreadableState {
            modifiers: Mods::LEFT_CTRL,
        };
        let report = interceptor.on_modifier_event(Some(&mut ev));
        assert_eq!(report.skip_reason(), Some(SkipReason::Malformed));
        assert_eq!(ev.modifiers, Mods::LEFT_CTRL);
    }

    #[test]
    fn test_units_chain_in_index_order() {
        let registry = registry_with(&[
            (0, Mods::LEFT_CTRL, Mods::LEFT_GUI),
            (1, Mods::LEFT_ALT, Mods::LEFT_SHIFT),
        ]);
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);

        let mut ev = ModifierEvent::pressed(Mods::from_bits(0x01));
        let report = interceptor.on_modifier_event(Some(&mut ev));
        assert_eq!(ev.modifiers.bits(), 0x08);
        let SwapReport::Applied { outcomes, .. } = report else {
            panic!("expected applied report");
        };
        assert_eq!(
            outcomes.as_slice(),
            &[
                UnitOutcome {
                    index: 0,
                    outcome: SwapOutcome::FirstToSecond
                },
                UnitOutcome {
                    index: 1,
                    outcome: SwapOutcome::Absent
                },
            ]
        );
    }

    #[test]
    fn test_later_unit_sees_earlier_result() {
        // Ctrl->Gui, then Gui<->Alt: the second unit acts on the Gui the first produced
        let registry = registry_with(&[
            (0, Mods::LEFT_CTRL, Mods::LEFT_GUI),
            (1, Mods::LEFT_GUI, Mods::LEFT_ALT),
        ]);
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);

        let mut ev = ModifierEvent::pressed(Mods::LEFT_CTRL);
        interceptor.on_modifier_event(Some(&mut ev));
        assert_eq!(ev.modifiers, Mods::LEFT_ALT);
    }

    #[test]
    fn test_keycode_event_rewritten() {
        let registry = ctrl_gui();
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);

        let mut ev = KeycodeEvent::new(0x06, Action::Press).with_explicit(Mods::LEFT_CTRL);
        let report = interceptor.on_modifier_event(Some(&mut ev));
        assert!(report.changed());
        assert_eq!(ev.explicit_modifiers, Mods::LEFT_GUI);
        assert_eq!(ev.implicit_modifiers, Mods::NONE);
        assert_eq!(ev.keycode, 0x06);
    }

    #[test]
    fn test_empty_registry_applies_nothing() {
        let registry = SwapRegistry::new(4);
        let active = ActivationState::new(true);
        let interceptor = EventInterceptor::new(&registry, &active);

        let mut ev = ModifierEvent::pressed(Mods::LEFT_CTRL);
        let report = interceptor.on_modifier_event(Some(&mut ev));
        assert!(!report.changed());
        assert_eq!(ev.modifiers, Mods::LEFT_CTRL);
    }
}
