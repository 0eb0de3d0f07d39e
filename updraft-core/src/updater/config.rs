//! Configuration for update tasks

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::connectivity::{DEFAULT_PROBE_TIMEOUT, DEFAULT_PROBE_URL};
use crate::remote::FetchConfig;
use crate::transfer::DEFAULT_BUFFER_SIZE;

/// Configuration for one update task.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// URL of the remote copy of the resource.
    pub remote_url: String,

    /// Name of the local resource, resolved under `storage_root`.
    pub resource_name: String,

    /// Application-private storage root holding the local resource.
    pub storage_root: PathBuf,

    /// Endpoint used by the connectivity gate.
    pub probe_url: String,

    /// Time-out for the connectivity gate.
    pub probe_timeout: Duration,

    /// Connection establishment time-out for the remote handshake.
    pub connect_timeout: Duration,

    /// Read time-out for the remote response.
    pub read_timeout: Duration,

    /// Transfer buffer size for the download.
    pub buffer_size: usize,
}

impl UpdateConfig {
    /// Creates a config with default probe endpoint, timeouts (1000 ms
    /// connect and read), and transfer buffer.
    pub fn new(
        remote_url: impl Into<String>,
        resource_name: impl Into<String>,
        storage_root: impl Into<PathBuf>,
    ) -> Self {
        UpdateConfig {
            remote_url: remote_url.into(),
            resource_name: resource_name.into(),
            storage_root: storage_root.into(),
            probe_url: DEFAULT_PROBE_URL.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            connect_timeout: Duration::from_millis(1000),
            read_timeout: Duration::from_millis(1000),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Uses a custom connectivity probe endpoint.
    pub fn with_probe_url(mut self, probe_url: impl Into<String>) -> Self {
        self.probe_url = probe_url.into();
        self
    }

    /// Uses a custom connectivity probe time-out.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Uses custom connect and read time-outs for the remote handshake.
    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    /// Uses a custom transfer buffer size.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Checks the parts of the config that are caller mistakes rather than
    /// runtime conditions.
    ///
    /// The remote URL is deliberately not validated here - a malformed
    /// remote URL is reported through the error-listener protocol when the
    /// task runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if reqwest::Url::parse(&self.probe_url).is_err() {
            return Err(ConfigError::MalformedProbeUrl(self.probe_url.clone()));
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(())
    }

    /// Timeouts for the remote handshake as a fetch config.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        }
    }
}

/// Caller mistakes in an update config, reported at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The connectivity probe URL could not be parsed.
    #[error("Malformed probe URL: {0}")]
    MalformedProbeUrl(String),

    /// The transfer buffer size is zero.
    #[error("Transfer buffer size must be positive")]
    ZeroBufferSize,
}
