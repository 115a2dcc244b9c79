// Modswap Transform Module
// Toggle handling and the in-place modifier relabeling

pub mod engine;
pub mod swap;
pub mod toggle;

pub use engine::{EventInterceptor, SkipReason, SwapReport, UnitOutcome};
pub use swap::{SwapOutcome, SwapUnit};
pub use toggle::ToggleController;
