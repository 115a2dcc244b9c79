// Modswap Core Library
// Runtime-toggleable exchange of two modifier keys in a keyboard event pipeline

pub mod action;
pub mod behavior;
pub mod config;
pub mod event;
pub mod input;
pub mod modifier;
pub mod state;
pub mod transform;

pub use action::Action;
pub use behavior::ModSwapBehavior;
pub use config::{ConfigError, ModSwapConfig, SwapConfig};
pub use event::{parse_script, Delivered, HostBus, HostEvent, ScriptError};
pub use input::{KeycodeEvent, ModifierEvent, ModifierNotification};
pub use modifier::{ModifierBit, ModifierError, Mods};
pub use state::{ActivationState, RegistryError, SwapRegistry};
pub use transform::{
    EventInterceptor, SkipReason, SwapOutcome, SwapReport, SwapUnit, ToggleController,
    UnitOutcome,
};
