// Modswap Input Layer
// Host-owned notifications the interceptor is allowed to rewrite

pub mod event;

pub use event::{KeycodeEvent, ModifierEvent, ModifierNotification};
