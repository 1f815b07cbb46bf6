//! System orchestration: startup, the provider scope, shutdown, configuration
//! and logging setup.

pub mod cart_system;
pub mod config;
pub mod logging;

pub use cart_system::*;
pub use config::*;
pub use logging::*;
