//! HTTP remote source
//!
//! Opens remote resources over plain HTTP GET with short, separately
//! configurable connect and read timeouts.

use std::io::Read;
use std::time::SystemTime;

use chrono::DateTime;
use reqwest::blocking::{Client, Response};
use reqwest::header::LAST_MODIFIED;

use super::error::FetchError;
use super::types::{FetchConfig, RemoteConnection, RemoteMetadata, RemoteSource};

/// Remote source backed by a blocking HTTP client.
#[derive(Debug, Default)]
pub struct HttpSource;

impl HttpSource {
    /// Creates a new HTTP source.
    pub fn new() -> Self {
        HttpSource
    }
}

impl RemoteSource for HttpSource {
    fn open(
        &self,
        url: &str,
        config: &FetchConfig,
    ) -> Result<Box<dyn RemoteConnection>, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| FetchError::MalformedUrl(format!("{}: {}", url, e)))?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()?;

        let response = client.get(parsed).send()?;

        let metadata = RemoteMetadata {
            status: response.status().as_u16(),
            last_modified: response
                .headers()
                .get(LAST_MODIFIED)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_http_date),
            content_length: response.content_length(),
        };

        Ok(Box::new(HttpConnection { metadata, response }))
    }
}

/// One established HTTP connection; dropped when the cycle ends.
struct HttpConnection {
    metadata: RemoteMetadata,
    response: Response,
}

impl RemoteConnection for HttpConnection {
    fn metadata(&self) -> &RemoteMetadata {
        &self.metadata
    }

    fn body(&mut self) -> &mut (dyn Read + Send) {
        &mut self.response
    }
}

/// Parses an HTTP date header value (RFC 2822 format) into a `SystemTime`.
fn parse_http_date(value: &str) -> Option<SystemTime> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(SystemTime::from)
}
