//! Error types for the demo binary.

use docstore_repository::DocumentStoreError;
use thiserror::Error;

/// Errors that can occur while configuring or running a scenario.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A document store operation failed.
    #[error("Document store error: {0}")]
    Store(#[from] DocumentStoreError),
}

impl DemoError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
