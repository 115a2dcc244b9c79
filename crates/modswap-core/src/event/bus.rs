// Modswap Host Bus
// Sequential dispatch standing in for the firmware's event manager

use std::fmt;

use crate::behavior::ModSwapBehavior;
use crate::input::{KeycodeEvent, ModifierEvent};
use crate::Action;

/// Event entering the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Edge of the key bound to the behavior
    Binding(Action),
    Modifiers(ModifierEvent),
    Keycode(KeycodeEvent),
}

/// Event leaving the bus toward the HID layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivered {
    Modifiers(ModifierEvent),
    Keycode(KeycodeEvent),
}

impl fmt::Display for Delivered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivered::Modifiers(ev) => write!(f, "{}", ev),
            Delivered::Keycode(ev) => write!(f, "{}", ev),
        }
    }
}

/// Dispatches one event at a time through the behavior.
///
/// Binding edges are consumed by the toggle controller. Modifier and keycode
/// notifications pass through the interceptor and are delivered exactly once.
#[derive(Debug)]
pub struct HostBus {
    behavior: ModSwapBehavior,
    delivered: Vec<Delivered>,
}

impl HostBus {
    pub fn new(behavior: ModSwapBehavior) -> Self {
        Self {
            behavior,
            delivered: Vec::new(),
        }
    }

    pub fn behavior(&self) -> &ModSwapBehavior {
        &self.behavior
    }

    /// Everything delivered downstream so far, in order
    pub fn delivered(&self) -> &[Delivered] {
        &self.delivered
    }

    /// Dispatch a single event, returning what reached the HID layer
    pub fn dispatch(&mut self, event: HostEvent) -> Option<Delivered> {
        let delivered = match event {
            HostEvent::Binding(action) => {
                self.behavior.toggle_controller().on_binding(action);
                return None;
            }
            HostEvent::Modifiers(mut ev) => {
                self.behavior.on_modifier_event(Some(&mut ev));
                Delivered::Modifiers(ev)
            }
            HostEvent::Keycode(mut ev) => {
                self.behavior.on_modifier_event(Some(&mut ev));
                Delivered::Keycode(ev)
            }
        };
        self.delivered.push(delivered);
        Some(delivered)
    }

    /// Dispatch events in order, returning the delivered ones
    pub fn dispatch_all<I>(&mut self, events: I) -> Vec<Delivered>
    where
        I: IntoIterator<Item = HostEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| self.dispatch(event))
            .collect()
    }
}
