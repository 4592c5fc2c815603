// This module re-exports the configuration pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod logging;
pub mod settings;

pub use logging::*;
pub use settings::*;
