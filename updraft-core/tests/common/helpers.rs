//! Test doubles and fixtures for driving the update engine without a
//! network.

use std::io::{self, Cursor, Read};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use updraft_core::{
    CancelToken, CompletionCallback, CompletionListener, CompletionStatus, ConnectivityProbe,
    ErrorCallback, ErrorListener, FetchConfig, FetchError, ProbeError, RemoteConnection,
    RemoteMetadata, RemoteSource, UpdateError,
};

/// Probe with a fixed answer; never touches a network.
pub struct StaticProbe {
    connected: bool,
}

impl ConnectivityProbe for StaticProbe {
    fn is_connected(&self, _test_url: &str, _timeout: Duration) -> Result<bool, ProbeError> {
        Ok(self.connected)
    }
}

/// A probe that always reports connectivity.
pub fn online() -> Box<dyn ConnectivityProbe> {
    Box::new(StaticProbe { connected: true })
}

/// A probe that always reports no connectivity.
pub fn offline() -> Box<dyn ConnectivityProbe> {
    Box::new(StaticProbe { connected: false })
}

/// A timestamp comfortably in the past.
pub fn past() -> SystemTime {
    SystemTime::now() - Duration::from_secs(3600)
}

/// A timestamp comfortably in the future.
pub fn future() -> SystemTime {
    SystemTime::now() + Duration::from_secs(3600)
}

/// Records every outcome delivered to the listeners it hands out.
///
/// Clones share the recorded state, so a test keeps one clone and registers
/// listeners from the other.
#[derive(Default, Clone)]
pub struct OutcomeRecorder {
    errors: Arc<Mutex<Vec<UpdateError>>>,
    completions: Arc<Mutex<Vec<CompletionStatus>>>,
}

impl OutcomeRecorder {
    pub fn new() -> Self {
        OutcomeRecorder::default()
    }

    /// An error listener appending into this recorder.
    pub fn error_listener(&self) -> Arc<dyn ErrorListener> {
        let errors = Arc::clone(&self.errors);
        Arc::new(ErrorCallback::new(move |error: &UpdateError| {
            errors.lock().unwrap().push(error.clone());
        }))
    }

    /// A completion listener appending into this recorder.
    pub fn completion_listener(&self) -> Arc<dyn CompletionListener> {
        let completions = Arc::clone(&self.completions);
        Arc::new(CompletionCallback::new(move |status| {
            completions.lock().unwrap().push(status);
        }))
    }

    pub fn errors(&self) -> Vec<UpdateError> {
        self.errors.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<CompletionStatus> {
        self.completions.lock().unwrap().clone()
    }

    /// Total number of outcomes observed, across both categories.
    pub fn outcome_count(&self) -> usize {
        self.errors().len() + self.completions().len()
    }
}

/// Remote source whose body requests cancellation once `cancel_after`
/// bytes have been served, simulating a user cancelling mid-transfer.
pub struct CancellingSource {
    pub body: Vec<u8>,
    pub last_modified: Option<SystemTime>,
    pub cancel_after: u64,
    pub token: CancelToken,
}

impl RemoteSource for CancellingSource {
    fn open(
        &self,
        _url: &str,
        _config: &FetchConfig,
    ) -> Result<Box<dyn RemoteConnection>, FetchError> {
        Ok(Box::new(CancellingConnection {
            metadata: RemoteMetadata {
                status: 200,
                last_modified: self.last_modified,
                content_length: Some(self.body.len() as u64),
            },
            body: CancellingBody {
                data: Cursor::new(self.body.clone()),
                cancel_after: self.cancel_after,
                token: self.token.clone(),
            },
        }))
    }
}

struct CancellingConnection {
    metadata: RemoteMetadata,
    body: CancellingBody,
}

impl RemoteConnection for CancellingConnection {
    fn metadata(&self) -> &RemoteMetadata {
        &self.metadata
    }

    fn body(&mut self) -> &mut (dyn Read + Send) {
        &mut self.body
    }
}

struct CancellingBody {
    data: Cursor<Vec<u8>>,
    cancel_after: u64,
    token: CancelToken,
}

impl Read for CancellingBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.data.read(buf)?;
        if self.data.position() >= self.cancel_after {
            self.token.cancel();
        }
        Ok(read)
    }
}
