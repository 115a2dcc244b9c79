// Modswap Event Handling
// Sequential host bus and the replay script that drives it

pub mod bus;
pub mod script;

pub use bus::{Delivered, HostBus, HostEvent};
pub use script::{parse_script, ScriptError, ScriptResult};
