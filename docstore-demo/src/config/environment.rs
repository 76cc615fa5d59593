//! Configuration read from the process environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::DemoError;
use docstore_repository::{ClientConfig, Credentials};

/// Default host when `HOST` is unset.
const DEFAULT_HOST: &str = "localhost";

/// Default port when `PORT` is unset.
const DEFAULT_PORT: u16 = 9200;

/// Default basic auth user when `ELASTIC_USER` is unset.
const DEFAULT_USER: &str = "elastic";

/// Default operation deadline in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// How to react when the service is unreachable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if the connection check fails.
    FailFast,
    /// Retry the connection check on an interval until it succeeds.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Unset or invalid values fall back to fail-fast.
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            None => Self::FailFast,
            Some("fail-fast") | Some("failfast") | Some("fail_fast") => Self::FailFast,
            Some("retry") => Self::Retry,
            Some(other) => {
                warn!(
                    value = %other,
                    "Invalid DOCSTORE_CONNECTION_MODE, defaulting to 'fail-fast'"
                );
                Self::FailFast
            }
        }
    }
}

/// Everything the demo needs to build a client.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Configuration handed to the document store client.
    pub client: ClientConfig,
    /// Startup connection behavior.
    pub connection_mode: ConnectionMode,
    /// Pause between connection attempts in retry mode.
    pub retry_interval: Duration,
}

impl DemoConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: Service host, optionally with scheme (default: localhost, served over https)
    /// - `PORT`: Service port (default: 9200)
    /// - `ELASTIC_USER`: Basic auth user (default: elastic)
    /// - `PASSWORD`: Basic auth password (required)
    /// - `DOCSTORE_VERIFY_CERTS`: Validate TLS certificates (default: true)
    /// - `DOCSTORE_CA_CERT`: PEM file with the CA certificate (optional)
    /// - `DOCSTORE_TIMEOUT_SECS`: Per-operation deadline, 0 disables it (default: 30)
    /// - `DOCSTORE_MAX_BATCH_SIZE`: Bulk batch limit, 0 disables it (default: 0)
    /// - `DOCSTORE_CONNECTION_MODE`: "fail-fast" or "retry" (default: fail-fast)
    /// - `DOCSTORE_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let username = lookup("ELASTIC_USER").unwrap_or_else(|| DEFAULT_USER.to_string());
        let password = lookup("PASSWORD")
            .ok_or_else(|| DemoError::config("PASSWORD must be set"))?;

        let mut client = ClientConfig::new(Credentials::new(host, port, username, password));

        if !parse_bool("DOCSTORE_VERIFY_CERTS", lookup("DOCSTORE_VERIFY_CERTS"), true)? {
            client = client.danger_accept_invalid_certs();
        }
        if let Some(path) = lookup("DOCSTORE_CA_CERT") {
            client = client.with_ca_cert(path);
        }

        client = match parse_or(
            "DOCSTORE_TIMEOUT_SECS",
            lookup("DOCSTORE_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )? {
            0 => client.without_timeout(),
            secs => client.with_timeout(Duration::from_secs(secs)),
        };

        client = match parse_or(
            "DOCSTORE_MAX_BATCH_SIZE",
            lookup("DOCSTORE_MAX_BATCH_SIZE"),
            0,
        )? {
            0 => client.unlimited_batches(),
            size => client.with_max_batch_size(size),
        };

        let connection_mode = ConnectionMode::parse(lookup("DOCSTORE_CONNECTION_MODE").as_deref());
        let retry_interval = Duration::from_secs(parse_or(
            "DOCSTORE_RETRY_INTERVAL_SECS",
            lookup("DOCSTORE_RETRY_INTERVAL_SECS"),
            DEFAULT_RETRY_INTERVAL_SECS,
        )?);

        Ok(Self {
            client,
            connection_mode,
            retry_interval,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, DemoError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DemoError::config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool, DemoError> {
    match value.as_deref().map(str::trim).map(str::to_lowercase).as_deref() {
        None => Ok(default),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some("false") | Some("0") | Some("no") => Ok(false),
        Some(other) => Err(DemoError::config(format!(
            "{} has invalid value '{}'",
            key, other
        ))),
    }
}
