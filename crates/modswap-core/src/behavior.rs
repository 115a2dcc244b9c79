// Modswap Behavior
// One registry of swap units plus the activation flag they share

use crate::config::{ConfigError, ModSwapConfig};
use crate::input::ModifierNotification;
use crate::state::{ActivationState, SwapRegistry, MAX_CAPACITY};
use crate::transform::{EventInterceptor, SwapReport, SwapUnit, ToggleController};

/// Host-facing entry point of the modifier swap behavior.
///
/// Owns the registry and the activation flag; the toggle controller and the
/// interceptor borrow both, so no state lives outside this value. Put it in an
/// `Arc` to share it between listeners.
#[derive(Debug)]
pub struct ModSwapBehavior {
    registry: SwapRegistry,
    activation: ActivationState,
}

impl ModSwapBehavior {
    /// Wrap an already filled registry; swapping starts inactive
    pub fn new(registry: SwapRegistry) -> Self {
        Self {
            registry,
            activation: ActivationState::default(),
        }
    }

    /// Register every configured unit.
    ///
    /// Units that cannot be registered (index out of range or taken) are
    /// reported back and left out; the rest are kept. A capacity above
    /// `MAX_CAPACITY` is reported and capped.
    pub fn from_config(config: &ModSwapConfig) -> (Self, Vec<ConfigError>) {
        let mut rejected = Vec::new();
        if config.capacity > MAX_CAPACITY {
            let e = ConfigError::CapacityOutOfRange {
                capacity: i64::try_from(config.capacity).unwrap_or(i64::MAX),
                used: MAX_CAPACITY,
            };
            log::warn!("{}", e);
            rejected.push(e);
        }
        let mut registry = SwapRegistry::new(config.capacity);

        for swap in &config.swaps {
            match registry.register(SwapUnit::new(*swap), swap.index() as usize) {
                Ok(()) => log::debug!("registered swap {}", swap),
                Err(e) => {
                    log::warn!("swap {} not registered: {}", swap, e);
                    rejected.push(ConfigError::from(e));
                }
            }
        }

        let behavior = Self {
            registry,
            activation: ActivationState::new(config.start_active),
        };
        (behavior, rejected)
    }

    pub fn registry(&self) -> &SwapRegistry {
        &self.registry
    }

    pub fn toggle_controller(&self) -> ToggleController<'_> {
        ToggleController::new(&self.activation)
    }

    pub fn interceptor(&self) -> EventInterceptor<'_> {
        EventInterceptor::new(&self.registry, &self.activation)
    }

    /// Binding pressed: flip swapping on/off, returning the new state
    pub fn binding_pressed(&self) -> bool {
        self.toggle_controller().on_binding_pressed()
    }

    /// Binding released: no effect
    pub fn binding_released(&self) -> bool {
        self.toggle_controller().on_binding_released()
    }

    /// Modifier or keycode notification from the host
    pub fn on_modifier_event<E: ModifierNotification + ?Sized>(
        &self,
        event: Option<&mut E>,
    ) -> SwapReport {
        self.interceptor().on_modifier_event(event)
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    /// Force the flag, e.g. when the host restores persisted state
    pub fn set_active(&self, active: bool) {
        self.activation.set(active);
        log::info!(
            "mod swap set {}",
            crate::transform::toggle::state_name(active)
        );
    }
}

impl Default for ModSwapBehavior {
    fn default() -> Self {
        Self::from_config(&ModSwapConfig::default()).0
    }
}
