// SPDX-FileCopyrightText: 2026 Updraft Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock remote source
//!
//! Scripted implementation of [`RemoteSource`] for exercising the engine
//! without a network: fixed status, last-modified metadata, body bytes, and
//! optional injected faults.

use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::FetchError;
use super::types::{FetchConfig, RemoteConnection, RemoteMetadata, RemoteSource};

/// Scripted remote source for tests.
///
/// Clones share the open-attempt counter, so a test can keep one clone and
/// hand the other to the engine.
///
/// # Example
///
/// ```
/// use updraft_core::remote::{FetchConfig, MockSource, RemoteSource};
///
/// let source = MockSource::new().with_body(b"DBDATA".to_vec());
/// let observer = source.clone();
///
/// let connection = source.open("http://example.com/db", &FetchConfig::default()).unwrap();
/// assert!(connection.metadata().is_ok());
/// assert_eq!(observer.open_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockSource {
    status: u16,
    last_modified: Option<SystemTime>,
    advertise_length: bool,
    body: Vec<u8>,
    connect_fault: bool,
    body_fault_after: Option<u64>,
    opened: Arc<AtomicUsize>,
}

impl Default for MockSource {
    fn default() -> Self {
        MockSource {
            status: 200,
            last_modified: None,
            advertise_length: true,
            body: Vec::new(),
            connect_fault: false,
            body_fault_after: None,
            opened: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockSource {
    /// Creates a mock that answers 200 with an empty body.
    pub fn new() -> Self {
        MockSource::default()
    }

    /// Sets the HTTP status the mock answers with.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Sets the last-modified timestamp the mock advertises.
    pub fn with_last_modified(mut self, time: SystemTime) -> Self {
        self.last_modified = Some(time);
        self
    }

    /// Sets the body bytes the mock serves.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Makes every open attempt fail at the transport level.
    pub fn with_connect_fault(mut self) -> Self {
        self.connect_fault = true;
        self
    }

    /// Injects an I/O fault into the body stream after `bytes` bytes have
    /// been read. The body must be longer than `bytes` for the fault to
    /// trigger.
    pub fn with_body_fault_after(mut self, bytes: u64) -> Self {
        self.body_fault_after = Some(bytes);
        self
    }

    /// Stops advertising a content length.
    pub fn without_content_length(mut self) -> Self {
        self.advertise_length = false;
        self
    }

    /// Number of open attempts made against this mock (shared with clones).
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl RemoteSource for MockSource {
    fn open(
        &self,
        _url: &str,
        _config: &FetchConfig,
    ) -> Result<Box<dyn RemoteConnection>, FetchError> {
        self.opened.fetch_add(1, Ordering::SeqCst);

        if self.connect_fault {
            return Err(FetchError::Connect("simulated connect fault".into()));
        }

        let metadata = RemoteMetadata {
            status: self.status,
            last_modified: self.last_modified,
            content_length: self
                .advertise_length
                .then_some(self.body.len() as u64),
        };

        Ok(Box::new(MockConnection {
            metadata,
            body: ScriptedBody {
                data: Cursor::new(self.body.clone()),
                fault_after: self.body_fault_after,
            },
        }))
    }
}

struct MockConnection {
    metadata: RemoteMetadata,
    body: ScriptedBody,
}

impl RemoteConnection for MockConnection {
    fn metadata(&self) -> &RemoteMetadata {
        &self.metadata
    }

    fn body(&mut self) -> &mut (dyn Read + Send) {
        &mut self.body
    }
}

/// Body stream that raises an I/O fault once it reaches a scripted offset.
struct ScriptedBody {
    data: Cursor<Vec<u8>>,
    fault_after: Option<u64>,
}

impl Read for ScriptedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(limit) = self.fault_after else {
            return self.data.read(buf);
        };

        let position = self.data.position();
        if position >= limit {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionAborted,
                "simulated mid-stream fault",
            ));
        }

        let allowed = usize::try_from(limit - position)
            .unwrap_or(usize::MAX)
            .min(buf.len());
        self.data.read(&mut buf[..allowed])
    }
}
