// Modswap Config API
// Swap-unit configuration records and their validation

pub mod swap;

#[cfg(feature = "toml-config")]
pub mod parser;

pub use swap::{ModSwapConfig, SwapConfig, DEFAULT_CAPACITY, DEFAULT_FIRST_MOD, DEFAULT_SECOND_MOD};

use crate::modifier::ModifierError;
use crate::state::RegistryError;
use crate::Mods;

/// Configuration errors.
///
/// `Io` and `TomlParse` fail the whole load. `CapacityOutOfRange` is reported
/// and the capacity clamped. Every other variant concerns a single swap unit
/// and only keeps that unit out of the registry.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("capacity {capacity} is out of range 0..=256, using {used}")]
    CapacityOutOfRange { capacity: i64, used: usize },

    #[error("swap entry {position}: index {index} does not fit in 0..=255")]
    InvalidIndex { position: usize, index: i64 },

    #[error("swap {index}: {field} mask {value} does not fit in a modifier byte")]
    MaskOutOfRange {
        index: usize,
        field: &'static str,
        value: i64,
    },

    #[error("swap {index}: invalid {field}: {source}")]
    InvalidModifier {
        index: usize,
        field: &'static str,
        #[source]
        source: ModifierError,
    },

    #[error("swap {index}: {field} must select exactly one modifier bit, got 0x{mask:02x}")]
    NotSingleBit {
        index: usize,
        field: &'static str,
        mask: u8,
    },

    #[error("swap {index}: first_mod and second_mod are both {modifier}")]
    SameModifier { index: usize, modifier: Mods },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
