// SPDX-FileCopyrightText: 2026 Updraft Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update orchestration
//!
//! The coordinator drives the full sequence for one local resource:
//! connectivity gate, remote handshake, version decision, snapshot-guarded
//! transfer, and commit or rollback. Terminal outcomes fan out to
//! registered listeners in registration order.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use updraft_core::updater::{ErrorCallback, UpdateConfig, UpdateCoordinator};
//!
//! let config = UpdateConfig::new(remote_url, "catalog.sqlite", data_dir);
//! let handle = UpdateCoordinator::new(config)?
//!     .add_error_listener(Arc::new(ErrorCallback::new(|e| eprintln!("{e}"))))
//!     .start()?;
//! ```

mod config;
mod coordinator;
mod listener;

pub use config::{ConfigError, UpdateConfig};
pub use coordinator::{UpdateCoordinator, UpdateHandle};
pub use listener::{
    CompletionCallback, CompletionListener, CompletionStatus, ErrorCallback, ErrorKind,
    ErrorListener, ListenerRegistry, UpdateError,
};
