// SPDX-FileCopyrightText: 2026 Updraft Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update coordinator
//!
//! Orchestrates the full check, fetch, commit-or-rollback sequence for one
//! local resource as a cancellable background unit of work.

use std::fs::File;
use std::io::{self, Read};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error, warn};

use crate::connectivity::{ConnectivityProbe, HttpProbe};
use crate::remote::{FetchError, HttpSource, RemoteSource};
use crate::resource::{LocalResource, RollbackSnapshot};
use crate::task::{CancelToken, TaskState};
use crate::transfer::{copy_stream_cancellable, CopyOutcome};
use crate::version::{TimestampVersionChecker, VersionChecker};

use super::config::{ConfigError, UpdateConfig};
use super::listener::{
    CompletionListener, CompletionStatus, ErrorKind, ErrorListener, ListenerRegistry, UpdateError,
};

/// Keeps one local resource in sync with its remote copy.
///
/// The coordinator runs once: it consults the connectivity probe, opens the
/// remote, asks the version checker whether an update is due, and if so
/// streams the remote bytes over the local resource - guarded by a rollback
/// snapshot captured up front. The single terminal outcome fans out to the
/// registered listeners; every error outcome implies the rollback has
/// already been attempted.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use updraft_core::updater::{
///     CompletionCallback, ErrorCallback, UpdateConfig, UpdateCoordinator,
/// };
///
/// let config = UpdateConfig::new(
///     "https://example.com/catalog.sqlite",
///     "catalog.sqlite",
///     data_dir,
/// );
/// let handle = UpdateCoordinator::new(config)?
///     .add_error_listener(Arc::new(ErrorCallback::new(|e| eprintln!("{e}"))))
///     .add_completion_listener(Arc::new(CompletionCallback::new(|s| println!("{s:?}"))))
///     .start()?;
///
/// // ... later, from the controlling thread:
/// let final_state = handle.join();
/// ```
pub struct UpdateCoordinator {
    config: UpdateConfig,
    resource: LocalResource,
    probe: Box<dyn ConnectivityProbe>,
    source: Box<dyn RemoteSource>,
    version_checker: Box<dyn VersionChecker>,
    listeners: ListenerRegistry,
    cancel: CancelToken,
    state: TaskState,
    rollback: Option<RollbackSnapshot>,
    created_this_run: bool,
}

impl UpdateCoordinator {
    /// Creates a coordinator for the resource and remote URL named by
    /// `config`, with the default HTTP probe, HTTP source, and timestamp
    /// version checker.
    ///
    /// Caller mistakes in the config (malformed probe URL, zero buffer)
    /// are reported here, synchronously - not deferred into the task.
    pub fn new(config: UpdateConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let resource = LocalResource::new(&config.storage_root, &config.resource_name);
        Ok(UpdateCoordinator {
            config,
            resource,
            probe: Box::new(HttpProbe::new()),
            source: Box::new(HttpSource::new()),
            version_checker: Box::new(TimestampVersionChecker),
            listeners: ListenerRegistry::new(),
            cancel: CancelToken::new(),
            state: TaskState::Idle,
            rollback: None,
            created_this_run: false,
        })
    }

    /// Replaces the connectivity probe.
    pub fn with_probe(mut self, probe: Box<dyn ConnectivityProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Replaces the remote source.
    pub fn with_source(mut self, source: Box<dyn RemoteSource>) -> Self {
        self.source = source;
        self
    }

    /// Replaces the version comparison strategy.
    pub fn with_version_checker(mut self, checker: Box<dyn VersionChecker>) -> Self {
        self.version_checker = checker;
        self
    }

    /// Appends an error listener. Listeners are invoked in the exact order
    /// they were added; register everything before the task starts.
    pub fn add_error_listener(mut self, listener: Arc<dyn ErrorListener>) -> Self {
        self.listeners.add_error_listener(listener);
        self
    }

    /// Appends a completion listener. Listeners are invoked in the exact
    /// order they were added; register everything before the task starts.
    pub fn add_completion_listener(mut self, listener: Arc<dyn CompletionListener>) -> Self {
        self.listeners.add_completion_listener(listener);
        self
    }

    /// Returns a token that cancels this coordinator's task.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the current task state.
    pub fn state(&self) -> TaskState {
        self.state.clone()
    }

    /// Returns the local resource this coordinator owns.
    pub fn resource(&self) -> &LocalResource {
        &self.resource
    }

    /// Spawns the task on a dedicated worker thread and returns a handle
    /// for cancellation and joining. The calling thread is never blocked
    /// by network I/O.
    pub fn start(mut self) -> io::Result<UpdateHandle> {
        let cancel = self.cancel.clone();
        let worker = thread::Builder::new()
            .name("updraft-update".into())
            .spawn(move || self.run())?;
        Ok(UpdateHandle { cancel, worker })
    }

    /// Drives the task to its terminal state on the current thread.
    ///
    /// This performs blocking network and file I/O; call it from a
    /// background context (or use [`start`](Self::start), which does).
    /// A coordinator runs once - calling `run` again after a terminal
    /// state returns that state unchanged.
    pub fn run(&mut self) -> TaskState {
        if self.state != TaskState::Idle {
            return self.state.clone();
        }
        self.state = TaskState::Running;
        debug!(url = %self.config.remote_url, "update task started");

        if self.check_cancelled() {
            return self.state.clone();
        }

        // Connectivity gate: the local resource is never touched before
        // the network looks usable.
        match self
            .probe
            .is_connected(&self.config.probe_url, self.config.probe_timeout)
        {
            Ok(true) => {}
            Ok(false) => {
                self.fail(UpdateError::new(ErrorKind::NoInternetConnection));
                return self.state.clone();
            }
            Err(fault) => {
                self.fail(UpdateError::with_detail(
                    ErrorKind::UnknownError,
                    fault.to_string(),
                ));
                return self.state.clone();
            }
        }

        if self.check_cancelled() {
            return self.state.clone();
        }

        // Remote handshake. The connection drops, and is thereby released,
        // on every path out of this function.
        let mut connection = match self
            .source
            .open(&self.config.remote_url, &self.config.fetch_config())
        {
            Ok(connection) => connection,
            Err(FetchError::MalformedUrl(detail)) => {
                self.fail(UpdateError::with_detail(
                    ErrorKind::InputMalformedRemoteUrl,
                    detail,
                ));
                return self.state.clone();
            }
            Err(fault) => {
                self.fail(UpdateError::with_detail(
                    ErrorKind::DownloadRemoteNotFound,
                    fault.to_string(),
                ));
                return self.state.clone();
            }
        };

        if !connection.metadata().is_ok() {
            let status = connection.metadata().status;
            self.fail(UpdateError::with_detail(
                ErrorKind::DownloadRemoteNotFound,
                format!("remote answered with HTTP status {}", status),
            ));
            return self.state.clone();
        }

        if self.check_cancelled() {
            return self.state.clone();
        }

        // Version decision. A resource that does not exist yet is always
        // due for an update; otherwise the injected strategy decides.
        let update_needed = !self.resource.exists()
            || self
                .version_checker
                .is_update_available(&self.resource, connection.metadata());
        if !update_needed {
            self.complete(CompletionStatus::AlreadyUpToDate);
            return self.state.clone();
        }

        if self.check_cancelled() {
            return self.state.clone();
        }

        // Prepare for mutation: snapshot an existing resource, or create
        // the storage path for a first-time download.
        if self.resource.exists() {
            match RollbackSnapshot::capture(&self.resource) {
                Ok(snapshot) => self.rollback = Some(snapshot),
                // Proceeding without a snapshot accepts the risk of an
                // unrecoverable failure; aborting an otherwise viable
                // update here would be worse.
                Err(fault) => {
                    warn!(error = %fault, "unable to capture rollback snapshot, continuing");
                }
            }
        } else if let Err(fault) = self.resource.create_empty() {
            self.fail(UpdateError::with_detail(
                ErrorKind::InternalStorageWriteError,
                fault.to_string(),
            ));
            return self.state.clone();
        } else {
            self.created_this_run = true;
        }

        // Transfer: stream the body over the resource, checking the cancel
        // token at every chunk boundary.
        match self.download(connection.body()) {
            Ok(CopyOutcome::Completed(bytes)) => {
                debug!(bytes, path = %self.resource.path().display(), "update downloaded");
                self.complete(CompletionStatus::UpdateCompleted);
            }
            Ok(CopyOutcome::Cancelled(_)) => {
                self.cancelled();
            }
            Err(fault) => {
                self.fail(UpdateError::with_detail(
                    ErrorKind::DownloadErrorUnknown,
                    fault.to_string(),
                ));
            }
        }

        self.state.clone()
    }

    /// Streams `body` into the local resource, overwriting its content.
    fn download(&self, body: &mut (dyn Read + Send)) -> io::Result<CopyOutcome> {
        let mut destination = File::create(self.resource.path())?;
        let outcome = copy_stream_cancellable(
            body,
            &mut destination,
            self.config.buffer_size,
            &self.cancel,
        )?;
        destination.sync_all()?;
        Ok(outcome)
    }

    /// Observes a pending cancellation request, if any, and finishes the
    /// task through the cancellation path.
    fn check_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.cancelled();
            return true;
        }
        false
    }

    fn complete(&mut self, status: CompletionStatus) {
        // Dropping the snapshot deletes its temp file; nothing outlives a
        // committed task.
        self.rollback = None;
        self.state = TaskState::Completed;
        debug!(?status, "update task completed");
        self.listeners.notify_completion(status);
    }

    fn fail(&mut self, outcome: UpdateError) {
        self.state = TaskState::Failed;
        error!(%outcome, "update task failed");
        self.roll_back();
        self.listeners.notify_error(&outcome);
    }

    fn cancelled(&mut self) {
        self.state = TaskState::Cancelled;
        debug!("update task cancelled");
        self.roll_back();
        self.listeners.notify_error(&UpdateError::new(ErrorKind::UserCancelled));
    }

    /// Undoes any mutation this run performed. Best effort: a rollback
    /// failure is logged and must never mask the outcome being reported.
    fn roll_back(&mut self) {
        if let Some(snapshot) = self.rollback.take() {
            match snapshot.restore(&self.resource) {
                Ok(()) => debug!(path = %self.resource.path().display(), "rolled back to prior content"),
                Err(fault) => warn!(error = %fault, "unable to restore rollback snapshot"),
            }
        } else if self.created_this_run && self.resource.exists() {
            // First-time download that failed: leave no resource behind.
            if let Err(fault) = self.resource.delete() {
                warn!(error = %fault, "unable to delete partially written resource");
            }
        }
    }
}

/// Handle to a spawned update task.
pub struct UpdateHandle {
    cancel: CancelToken,
    worker: thread::JoinHandle<TaskState>,
}

impl UpdateHandle {
    /// Requests cooperative cancellation of the running task.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns the task's cancel token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns true once the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the task and returns its terminal state.
    ///
    /// If the worker thread panicked, the task is reported as `Failed`.
    pub fn join(self) -> TaskState {
        self.worker.join().unwrap_or(TaskState::Failed)
    }
}
