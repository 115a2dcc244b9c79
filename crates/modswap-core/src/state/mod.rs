// Modswap State
// Process-lifetime state shared by every swap unit of one behavior

pub mod activation;
pub mod registry;

pub use activation::ActivationState;
pub use registry::{RegistryError, SwapRegistry, MAX_CAPACITY};
