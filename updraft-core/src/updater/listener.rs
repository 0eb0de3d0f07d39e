//! Outcome vocabulary and listener protocol
//!
//! Every update task produces exactly one terminal outcome: an error or a
//! completion. Outcomes fan out to registered listeners in registration
//! order, synchronously.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// All error conditions an update task can report.
///
/// Only a subset is raised by the engine itself (no connection, malformed
/// URL, internal write error, remote not found, user cancelled, generic
/// download fault); the remainder is reserved vocabulary for richer
/// transport implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The task was cancelled by the user.
    #[error("Update cancelled by the user")]
    UserCancelled,

    /// The provided remote URL could not be parsed.
    #[error("Malformed remote URL")]
    InputMalformedRemoteUrl,

    /// Internal storage could not be written.
    #[error("Unable to write to internal storage")]
    InternalStorageWriteError,

    /// External storage could not be written.
    #[error("Unable to write to external storage")]
    ExternalStorageWriteError,

    /// External storage is not mounted.
    #[error("External storage is not mounted")]
    ExternalStorageNotMounted,

    /// Not enough storage space to save the download.
    #[error("Insufficient storage space for download")]
    DownloadInsufficientSpace,

    /// A file with the same destination path already exists.
    #[error("Download destination already exists")]
    DownloadFileAlreadyExists,

    /// A previously interrupted download could not be resumed.
    #[error("Interrupted download cannot be resumed")]
    DownloadCannotResume,

    /// No storage medium was found for the download.
    #[error("Download storage device not found")]
    DownloadDeviceNotFound,

    /// Too many HTTP redirects were encountered.
    #[error("Too many redirects while downloading")]
    DownloadTooManyRedirects,

    /// Generic storage fault that fits no other download category.
    #[error("Download file error")]
    DownloadFileError,

    /// The downloaded HTTP data was corrupted.
    #[error("Corrupted HTTP data in download")]
    DownloadHttpDataError,

    /// The HTTP response code was not recognized or handled.
    #[error("Unhandled HTTP response code")]
    DownloadUnhandledHttpCode,

    /// Unknown download-related fault.
    #[error("Unknown download error")]
    DownloadErrorUnknown,

    /// The remote answered with a standards-defined HTTP status code,
    /// carried here as structured data.
    #[error("Remote answered with HTTP status {0}")]
    DownloadHttpStatus(u16),

    /// The remote resource could not be resolved.
    #[error("Remote resource not found")]
    DownloadRemoteNotFound,

    /// Fault that fits no other category.
    #[error("Unknown error")]
    UnknownError,

    /// No internet connection is available.
    #[error("No internet connection")]
    NoInternetConnection,
}

/// Terminal error outcome of an update task.
///
/// Immutable once constructed; `detail` carries the underlying fault's
/// description when one was available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateError {
    /// The error condition that best describes the fault.
    pub kind: ErrorKind,
    /// Description of the underlying cause, if one was available.
    pub detail: Option<String>,
}

impl UpdateError {
    /// Creates an error outcome with no underlying cause.
    pub fn new(kind: ErrorKind) -> Self {
        UpdateError { kind, detail: None }
    }

    /// Creates an error outcome wrapping an underlying cause.
    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        UpdateError {
            kind,
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.kind, detail),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for UpdateError {}

/// Conditions under which an update task completes successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// No update was required; the local resource was already current.
    AlreadyUpToDate,
    /// The local resource was successfully updated.
    UpdateCompleted,
}

/// Listener invoked when the update task reports an error.
///
/// Listeners are invoked synchronously on whatever thread drives the task;
/// implementations that need a particular context must forward the event
/// themselves.
pub trait ErrorListener: Send + Sync {
    /// Called with the task's error outcome.
    fn on_error(&self, error: &UpdateError);
}

/// Listener invoked when the update task completes without error.
pub trait CompletionListener: Send + Sync {
    /// Called with the condition under which the update completed.
    fn on_update_completed(&self, status: CompletionStatus);
}

/// Closure adapter for [`ErrorListener`].
pub struct ErrorCallback<F>
where
    F: Fn(&UpdateError) + Send + Sync,
{
    callback: F,
}

impl<F> ErrorCallback<F>
where
    F: Fn(&UpdateError) + Send + Sync,
{
    /// Wraps a closure as an error listener.
    pub fn new(callback: F) -> Self {
        ErrorCallback { callback }
    }
}

impl<F> ErrorListener for ErrorCallback<F>
where
    F: Fn(&UpdateError) + Send + Sync,
{
    fn on_error(&self, error: &UpdateError) {
        (self.callback)(error);
    }
}

/// Closure adapter for [`CompletionListener`].
pub struct CompletionCallback<F>
where
    F: Fn(CompletionStatus) + Send + Sync,
{
    callback: F,
}

impl<F> CompletionCallback<F>
where
    F: Fn(CompletionStatus) + Send + Sync,
{
    /// Wraps a closure as a completion listener.
    pub fn new(callback: F) -> Self {
        CompletionCallback { callback }
    }
}

impl<F> CompletionListener for CompletionCallback<F>
where
    F: Fn(CompletionStatus) + Send + Sync,
{
    fn on_update_completed(&self, status: CompletionStatus) {
        (self.callback)(status);
    }
}

/// Ordered collections of listeners for one task instance.
///
/// Registration order is preserved and significant: notification iterates
/// in the order listeners were added. Append-only; populated before the
/// task starts.
#[derive(Default)]
pub struct ListenerRegistry {
    error_listeners: Vec<Arc<dyn ErrorListener>>,
    completion_listeners: Vec<Arc<dyn CompletionListener>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ListenerRegistry::default()
    }

    /// Appends an error listener.
    pub fn add_error_listener(&mut self, listener: Arc<dyn ErrorListener>) {
        self.error_listeners.push(listener);
    }

    /// Appends a completion listener.
    pub fn add_completion_listener(&mut self, listener: Arc<dyn CompletionListener>) {
        self.completion_listeners.push(listener);
    }

    /// Returns the number of registered error listeners.
    pub fn error_listener_count(&self) -> usize {
        self.error_listeners.len()
    }

    /// Returns the number of registered completion listeners.
    pub fn completion_listener_count(&self) -> usize {
        self.completion_listeners.len()
    }

    /// Invokes every error listener in registration order.
    pub fn notify_error(&self, error: &UpdateError) {
        for listener in &self.error_listeners {
            listener.on_error(error);
        }
    }

    /// Invokes every completion listener in registration order.
    pub fn notify_completion(&self, status: CompletionStatus) {
        for listener in &self.completion_listeners {
            listener.on_update_completed(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_error_listeners_invoked_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.add_error_listener(Arc::new(ErrorCallback::new(move |_| {
                order.lock().unwrap().push(tag);
            })));
        }

        registry.notify_error(&UpdateError::new(ErrorKind::UnknownError));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_update_error_display() {
        let plain = UpdateError::new(ErrorKind::NoInternetConnection);
        assert_eq!(plain.to_string(), "No internet connection");

        let detailed =
            UpdateError::with_detail(ErrorKind::DownloadRemoteNotFound, "connection refused");
        assert_eq!(
            detailed.to_string(),
            "Remote resource not found: connection refused"
        );
    }

    #[test]
    fn test_http_status_kind_carries_code() {
        let kind = ErrorKind::DownloadHttpStatus(503);
        assert_eq!(kind.to_string(), "Remote answered with HTTP status 503");
    }
}
