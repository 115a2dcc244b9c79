// Modswap Input Layer - Host Notifications
// Modifier-state and keycode-state events, plus the narrow mutation contract

use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::{Action, Mods};

/// Contract between the host's event and the interceptor.
///
/// The interceptor reads the pressed state and may overwrite the modifier
/// mask field(s); nothing else about the event is reachable through it.
pub trait ModifierNotification {
    /// Pressed/released state, `None` when the host's flag is unreadable
    fn action(&self) -> Option<Action>;

    /// Mutable handles to every modifier mask the event carries
    fn modifier_masks_mut(&mut self) -> SmallVec<[&mut Mods; 2]>;

    /// Union of all modifier masks
    fn modifiers(&self) -> Mods;
}

/// Modifier-state change: the full modifier byte plus its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierEvent {
    pub modifiers: Mods,
    pub state: Action,
}

impl ModifierEvent {
    pub fn new(modifiers: Mods, state: Action) -> Self {
        Self { modifiers, state }
    }

    pub fn pressed(modifiers: Mods) -> Self {
        Self::new(modifiers, Action::Press)
    }

    pub fn released(modifiers: Mods) -> Self {
        Self::new(modifiers, Action::Release)
    }

    /// Build from the host's raw fields; `None` when the state flag is unreadable
    pub fn from_raw(modifiers: u8, state: i32) -> Option<Self> {
        Action::from_i32(state).map(|state| Self::new(Mods::from_bits(modifiers), state))
    }
}

impl ModifierNotification for ModifierEvent {
    fn action(&self) -> Option<Action> {
        Some(self.state)
    }

    fn modifier_masks_mut(&mut self) -> SmallVec<[&mut Mods; 2]> {
        smallvec![&mut self.modifiers]
    }

    fn modifiers(&self) -> Mods {
        self.modifiers
    }
}

impl fmt::Display for ModifierEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mods {} {} (0x{:02x})",
            self.state,
            self.modifiers,
            self.modifiers.bits()
        )
    }
}

/// Keycode-state change. Modifiers arrive split into those the user holds
/// (explicit) and those the keycode itself implies (implicit, e.g. the shift
/// behind a `!` binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeycodeEvent {
    pub keycode: u16,
    pub state: Action,
    pub explicit_modifiers: Mods,
    pub implicit_modifiers: Mods,
}

impl KeycodeEvent {
    pub fn new(keycode: u16, state: Action) -> Self {
        Self {
            keycode,
            state,
            explicit_modifiers: Mods::NONE,
            implicit_modifiers: Mods::NONE,
        }
    }

    pub fn with_explicit(mut self, mods: Mods) -> Self {
        self.explicit_modifiers = mods;
        self
    }

    pub fn with_implicit(mut self, mods: Mods) -> Self {
        self.implicit_modifiers = mods;
        self
    }
}

impl ModifierNotification for KeycodeEvent {
    fn action(&self) -> Option<Action> {
        Some(self.state)
    }

    fn modifier_masks_mut(&mut self) -> SmallVec<[&mut Mods; 2]> {
        SmallVec::from_buf([&mut self.explicit_modifiers, &mut self.implicit_modifiers])
    }

    fn modifiers(&self) -> Mods {
        self.explicit_modifiers | self.implicit_modifiers
    }
}

impl fmt::Display for KeycodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key {} 0x{:02x} explicit {} implicit {}",
            self.state, self.keycode, self.explicit_modifiers, self.implicit_modifiers
        )
    }
}
