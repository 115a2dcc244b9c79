// Modswap Action
// Pressed/released edges reported by the host

use std::fmt;

/// Pressed/released state carried by binding and modifier notifications.
///
/// The host reports the state as a raw integer flag:
///   0 == 'released'
///   1 == 'pressed'
/// Anything else is unreadable and treated as a malformed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Action {
    Release = 0,
    Press = 1,
}

impl Action {
    /// Returns true for the pressed edge
    pub fn is_pressed(self) -> bool {
        matches!(self, Action::Press)
    }

    /// Returns true for the released edge
    pub fn is_released(self) -> bool {
        matches!(self, Action::Release)
    }

    /// Create Action from the host's raw state flag
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Action::Release),
            1 => Some(Action::Press),
            _ => None,
        }
    }

    /// Convert Action to its raw flag
    pub fn to_i32(self) -> i32 {
        self as i32
    }
}

impl From<bool> for Action {
    fn from(pressed: bool) -> Self {
        if pressed {
            Action::Press
        } else {
            Action::Release
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Release => write!(f, "release"),
            Action::Press => write!(f, "press"),
        }
    }
}

pub const PRESS: Action = Action::Press;
pub const RELEASE: Action = Action::Release;
