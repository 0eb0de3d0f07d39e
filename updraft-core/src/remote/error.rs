//! Remote fetch error types.

use std::io;

use thiserror::Error;

/// Errors that can occur while opening or reading a remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote URL could not be parsed.
    #[error("Malformed remote URL: {0}")]
    MalformedUrl(String),

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The round-trip did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The redirect limit was exceeded while following the URL.
    #[error("Too many redirects: {0}")]
    TooManyRedirects(String),

    /// Transport-level fault that fits no other category.
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error while reading the body stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let detail = err.to_string();
        if err.is_timeout() {
            FetchError::Timeout(detail)
        } else if err.is_redirect() {
            FetchError::TooManyRedirects(detail)
        } else if err.is_connect() {
            FetchError::Connect(detail)
        } else if err.is_builder() {
            FetchError::MalformedUrl(detail)
        } else {
            FetchError::Transport(detail)
        }
    }
}
