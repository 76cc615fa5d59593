//! Configuration and dependency initialization.

mod dependencies;
mod environment;

pub use dependencies::{wait_for_service, Dependencies};
pub use environment::{ConnectionMode, DemoConfig};
