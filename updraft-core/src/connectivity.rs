//! Connectivity probe
//!
//! Answers one question: does an outbound HTTP round-trip to a known test
//! endpoint currently succeed within a timeout?

use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Default endpoint for probes that check internet reachability.
pub const DEFAULT_PROBE_URL: &str = "http://www.google.com";

/// Default time-out for probes that check internet reachability.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Capability for checking whether outbound network access works right now.
///
/// Implementations perform a blocking network round-trip and must only be
/// called from a background context, never from an interactive thread.
pub trait ConnectivityProbe: Send + Sync {
    /// Returns true only when a live HTTP round-trip to `test_url` completes
    /// with status 200 within `timeout`.
    ///
    /// A malformed `test_url` is a caller mistake and is reported as an
    /// error immediately. Everything that merely means "not reachable right
    /// now" - no route, refused connection, timeout, non-200 status - is
    /// reported as `Ok(false)`.
    fn is_connected(&self, test_url: &str, timeout: Duration) -> Result<bool, ProbeError>;
}

/// Probe backed by a plain HTTP GET.
#[derive(Debug, Default)]
pub struct HttpProbe;

impl HttpProbe {
    /// Creates a new HTTP probe.
    pub fn new() -> Self {
        HttpProbe
    }
}

impl ConnectivityProbe for HttpProbe {
    fn is_connected(&self, test_url: &str, timeout: Duration) -> Result<bool, ProbeError> {
        let url = reqwest::Url::parse(test_url)
            .map_err(|_| ProbeError::MalformedTestUrl(test_url.to_string()))?;

        let client = reqwest::blocking::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        // The connection handle is released on every exit path when the
        // response (or the failed send) drops at the end of this scope.
        match client.get(url).send() {
            Ok(response) => Ok(response.status() == reqwest::StatusCode::OK),
            Err(fault) => {
                // An unexpected transport fault is indistinguishable from
                // "offline" to callers; the fault itself is still logged so
                // operators can tell the two apart.
                warn!(url = test_url, error = %fault, "connectivity probe failed, treating as offline");
                Ok(false)
            }
        }
    }
}

/// Errors raised synchronously by a probe for invalid input.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probe target URL could not be parsed.
    #[error("Malformed probe URL: {0}")]
    MalformedTestUrl(String),

    /// The HTTP client for the probe could not be constructed.
    #[error("Probe client error: {0}")]
    Client(#[from] reqwest::Error),
}
