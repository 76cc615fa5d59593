//! Dependency initialization and wiring for the demo.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{ConnectionMode, DemoConfig};
use crate::DemoError;
use docstore_repository::DocumentStoreClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// A client whose connection has been verified.
    pub client: DocumentStoreClient,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(DemoError)` - If configuration is invalid, or the service is
    ///   unreachable in fail-fast mode
    pub async fn new() -> Result<Self, DemoError> {
        let config = DemoConfig::from_env()?;

        info!(
            url = %config.client.credentials.base_url(),
            username = %config.client.credentials.username,
            verify_certs = config.client.verify_certs,
            connection_mode = ?config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let client = DocumentStoreClient::connect(&config.client)?;

        wait_for_service(&client, config.connection_mode, config.retry_interval).await?;

        info!("Document store connection established");

        Ok(Self { client })
    }
}

/// Verify the connection, retrying on `retry_interval` in retry mode.
pub async fn wait_for_service(
    client: &DocumentStoreClient,
    mode: ConnectionMode,
    retry_interval: Duration,
) -> Result<(), DemoError> {
    loop {
        match client.verify_connection().await {
            Ok(()) => return Ok(()),
            Err(e) => match mode {
                ConnectionMode::FailFast => return Err(e.into()),
                ConnectionMode::Retry => {
                    warn!(
                        error = %e,
                        retry_interval_secs = retry_interval.as_secs(),
                        "Failed to connect to document store, retrying..."
                    );
                    sleep(retry_interval).await;
                }
            },
        }
    }
}
