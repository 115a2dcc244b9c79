// Modswap Config Parser - TOML with Serde
// Loads the behavior configuration from a TOML file

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{ConfigError, ModSwapConfig, SwapConfig, DEFAULT_CAPACITY};
use crate::config::{DEFAULT_FIRST_MOD, DEFAULT_SECOND_MOD};
use crate::modifier::parse_swap_operand;
use crate::state::MAX_CAPACITY;
use crate::Mods;

/// Root TOML table
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    behavior: Option<BehaviorToml>,

    #[serde(default)]
    swap: Vec<SwapTomlEntry>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BehaviorToml {
    /// Range-checked after parsing so a bad value cannot fail the document
    #[serde(default)]
    capacity: Option<i64>,

    #[serde(default)]
    start_active: Option<bool>,
}

/// One `[[swap]]` table
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SwapTomlEntry {
    /// Registry slot; defaults to the entry's position
    #[serde(default)]
    index: Option<i64>,

    #[serde(default)]
    first: Option<ModifierSpec>,

    #[serde(default)]
    second: Option<ModifierSpec>,
}

/// Modifier given either by name (`"LCtrl"`) or as a raw mask (`0x01`)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ModifierSpec {
    Mask(i64),
    Name(String),
}

impl ModifierSpec {
    fn resolve(&self, index: usize, field: &'static str) -> Result<Mods, ConfigError> {
        match self {
            ModifierSpec::Mask(value) => u8::try_from(*value)
                .map(Mods::from_bits)
                .map_err(|_| ConfigError::MaskOutOfRange {
                    index,
                    field,
                    value: *value,
                }),
            ModifierSpec::Name(name) => {
                parse_swap_operand(name).map_err(|source| ConfigError::InvalidModifier {
                    index,
                    field,
                    source,
                })
            }
        }
    }
}

impl SwapTomlEntry {
    fn to_swap_config(&self, position: usize) -> Result<SwapConfig, ConfigError> {
        let requested = self
            .index
            .unwrap_or_else(|| i64::try_from(position).unwrap_or(i64::MAX));
        let slot = u8::try_from(requested).map_err(|_| ConfigError::InvalidIndex {
            position,
            index: requested,
        })?;
        let index = slot as usize;

        let first = match &self.first {
            Some(spec) => spec.resolve(index, "first_mod")?,
            None => DEFAULT_FIRST_MOD,
        };
        let second = match &self.second {
            Some(spec) => spec.resolve(index, "second_mod")?,
            None => DEFAULT_SECOND_MOD,
        };
        SwapConfig::new(slot, first, second)
    }
}

impl ModSwapConfig {
    /// Load configuration from a TOML file
    ///
    /// Returns the usable configuration together with the swap entries that
    /// were rejected. Only unreadable or syntactically invalid files fail
    /// outright.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<(Self, Vec<ConfigError>), ConfigError> {
        let content = fs::read_to_string(&path)?;
        log::debug!("loading config from {}", path.as_ref().display());
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<(Self, Vec<ConfigError>), ConfigError> {
        let parsed: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        let mut config = Self::empty();
        let mut rejected = Vec::new();
        if let Some(behavior) = parsed.behavior {
            if let Some(requested) = behavior.capacity {
                config.capacity = checked_capacity(requested, &mut rejected);
            }
            config.start_active = behavior.start_active.unwrap_or(false);
        }

        for (position, entry) in parsed.swap.iter().enumerate() {
            match entry.to_swap_config(position) {
                Ok(swap) => config.swaps.push(swap),
                Err(e) => {
                    log::warn!("ignoring swap entry {}: {}", position, e);
                    rejected.push(e);
                }
            }
        }
        Ok((config, rejected))
    }

    /// Default config path (~/.config/modswap/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("modswap").join("config.toml"))
    }

    /// Load from the default location, falling back to a single Ctrl/Gui unit
    pub fn load_default() -> Result<(Self, Vec<ConfigError>), ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok((Self::default(), Vec::new()))
    }
}

/// Clamp a configured capacity into `0..=MAX_CAPACITY`, reporting any change
fn checked_capacity(requested: i64, rejected: &mut Vec<ConfigError>) -> usize {
    let used = requested.clamp(0, MAX_CAPACITY as i64) as usize;
    if used as i64 != requested {
        let e = ConfigError::CapacityOutOfRange {
            capacity: requested,
            used,
        };
        log::warn!("{}", e);
        rejected.push(e);
    }
    used
}

/// Example configuration written on first run
pub fn default_config_content() -> &'static str {
    r#"# Modswap configuration
# Place this file at: ~/.config/modswap/config.toml

[behavior]
# Number of swap slots; every index must be below this
capacity = 8
# Start with swapping already enabled
start_active = false

# Each [[swap]] exchanges two modifiers while swapping is active.
# Names: LCtrl LShift LAlt LGui RCtrl RShift RAlt RGui (plus aliases such as
# LCmd, LSuper, LWin, LOpt) or a raw single-bit mask like 0x08.
[[swap]]
index = 0
first = "LCtrl"
second = "LGui"
"#
}
