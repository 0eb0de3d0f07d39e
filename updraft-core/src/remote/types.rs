//! Remote endpoint types
//!
//! Metadata and configuration for one check/fetch cycle against a remote
//! resource.

use std::io::Read;
use std::time::{Duration, SystemTime};

/// HTTP status code meaning success for a remote resource.
pub const HTTP_STATUS_OK: u16 = 200;

/// Metadata observed when a remote resource is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMetadata {
    /// HTTP status code of the response.
    pub status: u16,
    /// Last-modified timestamp advertised by the server, if any.
    pub last_modified: Option<SystemTime>,
    /// Body size advertised by the server, if any.
    pub content_length: Option<u64>,
}

impl RemoteMetadata {
    /// Returns true if the remote answered with the success status.
    pub fn is_ok(&self) -> bool {
        self.status == HTTP_STATUS_OK
    }
}

/// Timeouts applied when opening a remote resource.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Read timeout for the response.
    pub read_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            connect_timeout: Duration::from_millis(1000),
            read_timeout: Duration::from_millis(1000),
        }
    }
}

/// An open connection to a remote resource.
///
/// Couples the response metadata with the body byte stream. The connection
/// exists for the duration of one check/fetch cycle and is released exactly
/// once, on every exit path, when the value drops.
pub trait RemoteConnection: Send {
    /// Metadata observed for this connection.
    fn metadata(&self) -> &RemoteMetadata;

    /// The response body as a readable byte stream.
    fn body(&mut self) -> &mut (dyn Read + Send);
}

/// Capability for opening connections to remote resources.
///
/// Implementations perform blocking network I/O; the engine only calls this
/// from its background task. Swapping the implementation (real HTTP versus
/// a scripted mock) never changes the engine.
pub trait RemoteSource: Send + Sync {
    /// Opens `url` and returns the established connection.
    ///
    /// Opening succeeds as long as a response was obtained - a non-success
    /// HTTP status is reported through
    /// [`RemoteMetadata::status`](RemoteMetadata), not as an `Err`, so the
    /// caller can distinguish transport faults from remote refusals.
    fn open(
        &self,
        url: &str,
        config: &FetchConfig,
    ) -> Result<Box<dyn RemoteConnection>, super::FetchError>;
}
