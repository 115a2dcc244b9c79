// Modswap Modifier System
// HID modifier bits (Ctrl, Shift, Alt, Gui, left and right) and their 8-bit mask

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// One modifier key, numbered by its bit position in the HID modifier byte.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum ModifierBit {
    #[strum(serialize = "L_CONTROL", serialize = "LC", serialize = "LCtl", to_string = "LCtrl")]
    LeftCtrl = 0,
    #[strum(serialize = "L_SHIFT", serialize = "LS", serialize = "LSft", to_string = "LShift")]
    LeftShift = 1,
    #[strum(
        serialize = "L_ALT",
        serialize = "LA",
        serialize = "LOpt",
        serialize = "LOption",
        to_string = "LAlt"
    )]
    LeftAlt = 2,
    #[strum(
        serialize = "L_META",
        serialize = "LG",
        serialize = "LSuper",
        serialize = "LWin",
        serialize = "LCmd",
        serialize = "LCommand",
        serialize = "LMeta",
        to_string = "LGui"
    )]
    LeftGui = 3,
    #[strum(serialize = "R_CONTROL", serialize = "RC", serialize = "RCtl", to_string = "RCtrl")]
    RightCtrl = 4,
    #[strum(serialize = "R_SHIFT", serialize = "RS", serialize = "RSft", to_string = "RShift")]
    RightShift = 5,
    #[strum(
        serialize = "R_ALT",
        serialize = "RA",
        serialize = "ROpt",
        serialize = "ROption",
        serialize = "AltGr",
        to_string = "RAlt"
    )]
    RightAlt = 6,
    #[strum(
        serialize = "R_META",
        serialize = "RG",
        serialize = "RSuper",
        serialize = "RWin",
        serialize = "RCmd",
        serialize = "RCommand",
        serialize = "RMeta",
        to_string = "RGui"
    )]
    RightGui = 7,
}

impl ModifierBit {
    /// Bit position in the modifier byte
    pub fn position(self) -> u8 {
        self as u8
    }

    /// Single-bit mask selecting this modifier
    pub fn mask(self) -> Mods {
        Mods(1 << self.position())
    }

    /// Modifier for a single-bit mask, `None` for empty or multi-bit masks
    pub fn from_mask(mods: Mods) -> Option<Self> {
        if !mods.is_single_bit() {
            return None;
        }
        ModifierBit::iter().find(|bit| bit.mask() == mods)
    }
}

/// Set of asserted modifiers, laid out like the HID report modifier byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Mods(u8);

impl Mods {
    pub const NONE: Mods = Mods(0);
    pub const LEFT_CTRL: Mods = Mods(0x01);
    pub const LEFT_SHIFT: Mods = Mods(0x02);
    pub const LEFT_ALT: Mods = Mods(0x04);
    pub const LEFT_GUI: Mods = Mods(0x08);
    pub const RIGHT_CTRL: Mods = Mods(0x10);
    pub const RIGHT_SHIFT: Mods = Mods(0x20);
    pub const RIGHT_ALT: Mods = Mods(0x40);
    pub const RIGHT_GUI: Mods = Mods(0x80);

    pub const fn from_bits(bits: u8) -> Self {
        Mods(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when exactly one modifier bit is set
    pub const fn is_single_bit(self) -> bool {
        self.0.count_ones() == 1
    }

    /// True when every bit of `other` is set in `self`
    pub const fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set in `self`
    pub const fn intersects(self, other: Mods) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Mods) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Mods) {
        self.0 &= !other.0;
    }

    /// Asserted modifiers in bit order
    pub fn iter(self) -> impl Iterator<Item = ModifierBit> {
        ModifierBit::iter().filter(move |bit| self.intersects(bit.mask()))
    }
}

impl From<u8> for Mods {
    fn from(bits: u8) -> Self {
        Mods(bits)
    }
}

impl From<ModifierBit> for Mods {
    fn from(bit: ModifierBit) -> Self {
        bit.mask()
    }
}

impl BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}

impl BitAnd for Mods {
    type Output = Mods;

    fn bitand(self, rhs: Mods) -> Mods {
        Mods(self.0 & rhs.0)
    }
}

impl Not for Mods {
    type Output = Mods;

    fn not(self) -> Mods {
        Mods(!self.0)
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for bit in self.iter() {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{}", bit)?;
            first = false;
        }
        Ok(())
    }
}

/// Parses `none`, a raw number (`0x09`, `0b1001`, `9`) or names joined by `+`
/// (`LCtrl+LGui`).
impl FromStr for Mods {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Mods::NONE);
        }
        if let Some(bits) = parse_mask_number(trimmed) {
            return Ok(Mods(bits));
        }
        let mut mods = Mods::NONE;
        for part in trimmed.split('+') {
            mods.insert(parse_modifier_name(part.trim())?.mask());
        }
        Ok(mods)
    }
}

/// Errors that can occur when resolving modifier names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    #[error("unknown modifier '{0}'")]
    Unknown(String),

    #[error("'{name}' covers both sides of the keyboard; use '{left}' or '{right}'")]
    Generic {
        name: String,
        left: ModifierBit,
        right: ModifierBit,
    },
}

/// Resolve a single modifier name or alias, rejecting side-less names like `Ctrl`
pub fn parse_modifier_name(name: &str) -> Result<ModifierBit, ModifierError> {
    if let Ok(bit) = ModifierBit::from_str(name) {
        return Ok(bit);
    }
    if let Some((left, right)) = generic_sides(name) {
        return Err(ModifierError::Generic {
            name: name.to_string(),
            left,
            right,
        });
    }
    Err(ModifierError::Unknown(name.to_string()))
}

/// Resolve a swap operand: a modifier name or a raw mask number.
///
/// The mask is returned as given; single-bit validation belongs to the swap
/// configuration so the error can name the offending field.
pub fn parse_swap_operand(value: &str) -> Result<Mods, ModifierError> {
    let trimmed = value.trim();
    if let Some(bits) = parse_mask_number(trimmed) {
        return Ok(Mods(bits));
    }
    parse_modifier_name(trimmed).map(ModifierBit::mask)
}

fn generic_sides(name: &str) -> Option<(ModifierBit, ModifierBit)> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" | "c" => Some((ModifierBit::LeftCtrl, ModifierBit::RightCtrl)),
        "shift" => Some((ModifierBit::LeftShift, ModifierBit::RightShift)),
        "alt" | "a" | "opt" | "option" => Some((ModifierBit::LeftAlt, ModifierBit::RightAlt)),
        "gui" | "super" | "win" | "meta" | "cmd" | "command" => {
            Some((ModifierBit::LeftGui, ModifierBit::RightGui))
        }
        _ => None,
    }
}

fn parse_mask_number(s: &str) -> Option<u8> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        return u8::from_str_radix(bin, 2).ok();
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }
    None
}
