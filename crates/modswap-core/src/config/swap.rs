// Modswap Swap Config
// Immutable per-unit records, built once at startup

use std::fmt;

use crate::config::ConfigError;
use crate::Mods;

/// Modifier swapped away from when no `first` is configured
pub const DEFAULT_FIRST_MOD: Mods = Mods::LEFT_CTRL;

/// Modifier swapped to when no `second` is configured
pub const DEFAULT_SECOND_MOD: Mods = Mods::LEFT_GUI;

/// Number of registry slots when the configuration does not declare one
pub const DEFAULT_CAPACITY: usize = 8;

/// Configuration of one swap unit: which two modifier bits trade places.
///
/// Both masks are validated on construction to be non-zero, single-bit and
/// distinct, so a `SwapConfig` in hand is always usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapConfig {
    index: u8,
    first_mod: Mods,
    second_mod: Mods,
}

impl SwapConfig {
    pub fn new(index: u8, first_mod: Mods, second_mod: Mods) -> Result<Self, ConfigError> {
        check_operand(index, "first_mod", first_mod)?;
        check_operand(index, "second_mod", second_mod)?;
        if first_mod == second_mod {
            return Err(ConfigError::SameModifier {
                index: index as usize,
                modifier: first_mod,
            });
        }
        Ok(Self {
            index,
            first_mod,
            second_mod,
        })
    }

    /// Ctrl/Gui swap at `index`
    pub fn with_defaults(index: u8) -> Self {
        Self {
            index,
            first_mod: DEFAULT_FIRST_MOD,
            second_mod: DEFAULT_SECOND_MOD,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn first_mod(&self) -> Mods {
        self.first_mod
    }

    pub fn second_mod(&self) -> Mods {
        self.second_mod
    }
}

impl fmt::Display for SwapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}<->{}", self.index, self.first_mod, self.second_mod)
    }
}

fn check_operand(index: u8, field: &'static str, mask: Mods) -> Result<(), ConfigError> {
    if mask.is_single_bit() {
        Ok(())
    } else {
        Err(ConfigError::NotSingleBit {
            index: index as usize,
            field,
            mask: mask.bits(),
        })
    }
}

/// Whole-behavior configuration: registry size, initial state and units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModSwapConfig {
    /// Declared index range of the registry
    pub capacity: usize,
    /// Activation state at startup
    pub start_active: bool,
    /// Units in configuration order
    pub swaps: Vec<SwapConfig>,
}

impl ModSwapConfig {
    /// Configuration with no units
    pub fn empty() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            start_active: false,
            swaps: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_swap(mut self, swap: SwapConfig) -> Self {
        self.swaps.push(swap);
        self
    }
}

/// A single Ctrl/Gui unit at index 0
impl Default for ModSwapConfig {
    fn default() -> Self {
        Self::empty().with_swap(SwapConfig::with_defaults(0))
    }
}
