//! Configuration types for the DocumentStoreClient.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default deadline applied to every client operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection parameters for the document search service.
///
/// Immutable for the lifetime of a client. `Debug` output never contains the
/// password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Host name, optionally with a scheme (`https://es.internal`).
    pub host: String,
    /// Port the service listens on.
    pub port: u16,
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
}

impl Credentials {
    /// Create a new set of credentials.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    /// The base URL of the service, `host:port`.
    ///
    /// A host without a scheme is assumed to be served over HTTPS. A trailing
    /// slash on the host is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use docstore_repository::Credentials;
    ///
    /// let creds = Credentials::new("localhost", 9200, "elastic", "changeme");
    /// assert_eq!(creds.base_url(), "https://localhost:9200");
    ///
    /// let creds = Credentials::new("http://localhost", 9200, "elastic", "changeme");
    /// assert_eq!(creds.base_url(), "http://localhost:9200");
    /// ```
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.contains("://") {
            format!("{}:{}", host, self.port)
        } else {
            format!("https://{}:{}", host, self.port)
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for the DocumentStoreClient.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where and how to connect.
    pub credentials: Credentials,
    /// Validate the service's TLS certificate. Defaults to `true`.
    pub verify_certs: bool,
    /// Optional PEM file with the CA certificate used to validate the service.
    pub ca_cert_path: Option<PathBuf>,
    /// Deadline applied to every operation. `None` waits indefinitely.
    pub operation_timeout: Option<Duration>,
    /// Maximum number of documents allowed in a single bulk request.
    ///
    /// `None`, the default, sends batches of any size.
    pub max_batch_size: Option<usize>,
}

impl ClientConfig {
    /// Create a config with the default deadline, no batch limit and
    /// certificate validation enabled.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            verify_certs: true,
            ca_cert_path: None,
            operation_timeout: Some(DEFAULT_OPERATION_TIMEOUT),
            max_batch_size: None,
        }
    }

    /// Set the per-operation deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Disable the per-operation deadline.
    pub fn without_timeout(mut self) -> Self {
        self.operation_timeout = None;
        self
    }

    /// Reject bulk batches larger than `max_batch_size`.
    ///
    /// Very large bulk bodies are held in memory in full and may exceed the
    /// service's request size limit.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }

    /// Remove the batch size limit.
    pub fn unlimited_batches(mut self) -> Self {
        self.max_batch_size = None;
        self
    }

    /// Validate the service certificate against a specific CA.
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    /// Skip certificate validation.
    ///
    /// # Warning
    ///
    /// Only for local development against self-signed clusters.
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.verify_certs = false;
        self
    }
}
