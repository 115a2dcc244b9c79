// Modswap Activation State
// The single on/off flag gating every swap unit

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether swapping is currently applied.
///
/// One flag serves all units of a behavior. It is atomic so a behavior can
/// sit behind an `Arc` on a host with concurrent dispatch; with sequential
/// dispatch the atomics are simply uncontended.
#[derive(Debug, Default)]
pub struct ActivationState {
    active: AtomicBool,
}

impl ActivationState {
    pub fn new(active: bool) -> Self {
        Self {
            active: AtomicBool::new(active),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Negate the flag and return the new value
    pub fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn set(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}
