//! # Docstore Demo
//!
//! Demonstration runner for the document store client. It reads connection
//! settings from the environment, verifies the service is reachable and runs
//! one of the sample scenarios against it.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`samples`]: Sample mappings, documents and queries
//! - [`scenarios`]: The demonstration sequences
//! - [`errors`]: Error types for the demo

pub mod config;
pub mod errors;
pub mod samples;
pub mod scenarios;

pub use config::Dependencies;
pub use errors::DemoError;
pub use scenarios::Scenario;
