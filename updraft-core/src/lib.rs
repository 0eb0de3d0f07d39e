//! Updraft Core Library
//!
//! Keeps a local copy of a server-hosted file up to date: probe
//! connectivity, compare versions, stream the remote bytes into place, and
//! roll back to the prior bytes if anything goes wrong mid-update.

pub mod connectivity;
pub mod remote;
pub mod resource;
pub mod task;
pub mod transfer;
pub mod updater;
pub mod version;

pub use connectivity::{
    ConnectivityProbe, HttpProbe, ProbeError, DEFAULT_PROBE_TIMEOUT, DEFAULT_PROBE_URL,
};
pub use remote::{
    FetchConfig, FetchError, HttpSource, MockSource, RemoteConnection, RemoteMetadata,
    RemoteSource, HTTP_STATUS_OK,
};
pub use resource::{LocalResource, ResourceError, RollbackSnapshot};
pub use task::{CancelToken, TaskState};
pub use transfer::{
    copy_stream, copy_stream_cancellable, copy_stream_with_default, CopyOutcome,
    DEFAULT_BUFFER_SIZE,
};
pub use updater::{
    CompletionCallback, CompletionListener, CompletionStatus, ConfigError, ErrorCallback,
    ErrorKind, ErrorListener, ListenerRegistry, UpdateConfig, UpdateCoordinator, UpdateError,
    UpdateHandle,
};
pub use version::{ContentLengthVersionChecker, TimestampVersionChecker, VersionChecker};
