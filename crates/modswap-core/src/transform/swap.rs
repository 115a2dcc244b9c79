// Modswap Swap Rule
// Relabels one asserted modifier of a configured pair as the other

use strum_macros::Display;

use crate::config::SwapConfig;
use crate::input::ModifierNotification;
use crate::Mods;

/// What a unit's rule did to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SwapOutcome {
    /// Only the first modifier was held; it now reads as the second
    FirstToSecond,
    /// Only the second modifier was held; it now reads as the first
    SecondToFirst,
    /// Both were held, left alone
    Balanced,
    /// Neither was held
    Absent,
}

impl SwapOutcome {
    pub fn is_swap(self) -> bool {
        matches!(self, SwapOutcome::FirstToSecond | SwapOutcome::SecondToFirst)
    }
}

/// One configured swap pair and its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapUnit {
    config: SwapConfig,
}

impl SwapUnit {
    pub fn new(config: SwapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    pub fn index(&self) -> u8 {
        self.config.index()
    }

    /// Decide what the rule does for the given asserted modifiers
    pub fn classify(&self, mods: Mods) -> SwapOutcome {
        let first_on = mods.intersects(self.config.first_mod());
        let second_on = mods.intersects(self.config.second_mod());
        match (first_on, second_on) {
            (true, false) => SwapOutcome::FirstToSecond,
            (false, true) => SwapOutcome::SecondToFirst,
            (true, true) => SwapOutcome::Balanced,
            (false, false) => SwapOutcome::Absent,
        }
    }

    /// Apply the rule to a bare mask
    pub fn swap_mask(&self, mut mods: Mods) -> Mods {
        let outcome = self.classify(mods);
        if let Some((from, to)) = self.direction(outcome) {
            relabel(&mut mods, from, to);
        }
        mods
    }

    /// Apply the rule to an event in place.
    ///
    /// The pair is judged on the union of the event's masks; the moved bit is
    /// then relabeled inside whichever masks carry it.
    pub fn apply<E: ModifierNotification + ?Sized>(&self, event: &mut E) -> SwapOutcome {
        let outcome = self.classify(event.modifiers());
        if let Some((from, to)) = self.direction(outcome) {
            for mask in event.modifier_masks_mut() {
                relabel(mask, from, to);
            }
        }
        outcome
    }

    fn direction(&self, outcome: SwapOutcome) -> Option<(Mods, Mods)> {
        let first = self.config.first_mod();
        let second = self.config.second_mod();
        match outcome {
            SwapOutcome::FirstToSecond => Some((first, second)),
            SwapOutcome::SecondToFirst => Some((second, first)),
            SwapOutcome::Balanced | SwapOutcome::Absent => None,
        }
    }
}

fn relabel(mask: &mut Mods, from: Mods, to: Mods) {
    if mask.intersects(from) {
        mask.remove(from);
        mask.insert(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeycodeEvent, ModifierEvent};
    use crate::{Action, ModifierBit};
    use strum::IntoEnumIterator;

    fn ctrl_gui() -> SwapUnit {
        SwapUnit::new(SwapConfig::with_defaults(0))
    }

    #[test]
    fn test_ctrl_becomes_gui() {
        assert_eq!(
            ctrl_gui().swap_mask(Mods::from_bits(0x01)),
            Mods::from_bits(0x08)
        );
    }

    #[test]
    fn test_gui_becomes_ctrl() {
        assert_eq!(
            ctrl_gui().swap_mask(Mods::LEFT_GUI | Mods::RIGHT_SHIFT),
            Mods::LEFT_CTRL | Mods::RIGHT_SHIFT
        );
    }

    #[test]
    fn test_balanced_and_absent_untouched() {
        let unit = ctrl_gui();
        assert_eq!(unit.classify(Mods::from_bits(0x09)), SwapOutcome::Balanced);
        assert_eq!(
            unit.swap_mask(Mods::from_bits(0x09)),
            Mods::from_bits(0x09)
        );
        assert_eq!(unit.classify(Mods::LEFT_ALT), SwapOutcome::Absent);
        assert_eq!(unit.swap_mask(Mods::LEFT_ALT), Mods::LEFT_ALT);
    }

    #[test]
    fn test_rule_is_self_inverse_for_every_pair_and_mask() {
        for first in ModifierBit::iter() {
            for second in ModifierBit::iter().filter(|b| *b != first) {
                let unit = SwapUnit::new(SwapConfig::new(0, first.mask(), second.mask()).unwrap());
                for bits in 0..=u8::MAX {
                    let mods = Mods::from_bits(bits);
                    let once = unit.swap_mask(mods);
                    assert_eq!(unit.swap_mask(once), mods, "{first}<->{second} on 0x{bits:02x}");
                    // Pure relabeling: population and bits outside the pair are preserved
                    assert_eq!(once.bits().count_ones(), bits.count_ones());
                    let pair = first.mask() | second.mask();
                    assert_eq!(once & !pair, mods & !pair);
                }
            }
        }
    }

    #[test]
    fn test_apply_on_modifier_event() {
        let mut ev = ModifierEvent::pressed(Mods::LEFT_CTRL | Mods::LEFT_SHIFT);
        assert_eq!(ctrl_gui().apply(&mut ev), SwapOutcome::FirstToSecond);
        assert_eq!(ev.modifiers, Mods::LEFT_GUI | Mods::LEFT_SHIFT);
        assert_eq!(ev.state, Action::Press);
    }

    #[test]
    fn test_apply_on_keycode_event_uses_union() {
        // Ctrl explicit, Gui implicit: both asserted overall, nothing moves
        let mut ev = KeycodeEvent::new(0x04, Action::Press)
            .with_explicit(Mods::LEFT_CTRL)
            .with_implicit(Mods::LEFT_GUI);
        assert_eq!(ctrl_gui().apply(&mut ev), SwapOutcome::Balanced);
        assert_eq!(ev.explicit_modifiers, Mods::LEFT_CTRL);
        assert_eq!(ev.implicit_modifiers, Mods::LEFT_GUI);

        // Ctrl only in the implicit mask moves there
        let mut ev = KeycodeEvent::new(0x04, Action::Press)
            .with_explicit(Mods::LEFT_SHIFT)
            .with_implicit(Mods::LEFT_CTRL);
        assert_eq!(ctrl_gui().apply(&mut ev), SwapOutcome::FirstToSecond);
        assert_eq!(ev.explicit_modifiers, Mods::LEFT_SHIFT);
        assert_eq!(ev.implicit_modifiers, Mods::LEFT_GUI);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(SwapOutcome::FirstToSecond.to_string(), "first-to-second");
        assert!(SwapOutcome::SecondToFirst.is_swap());
        assert!(!SwapOutcome::Balanced.is_swap());
    }
}
