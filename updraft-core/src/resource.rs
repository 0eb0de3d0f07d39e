// SPDX-FileCopyrightText: 2026 Updraft Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local resource and rollback snapshot
//!
//! The local resource is the on-device file being kept in sync with a
//! remote copy. Before an update mutates it, its prior bytes are captured
//! into an exclusively-owned temp file so a failed update can be undone.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::transfer::{copy_stream, DEFAULT_BUFFER_SIZE};

/// A named, byte-addressable local file resolved under an
/// application-private storage root.
///
/// The resource may not exist yet on first run; its own existence and
/// modification time are the only persisted state the engine relies on.
#[derive(Debug, Clone)]
pub struct LocalResource {
    path: PathBuf,
}

impl LocalResource {
    /// Resolves a resource named `name` under `storage_root`.
    pub fn new(storage_root: impl AsRef<Path>, name: &str) -> Self {
        LocalResource {
            path: storage_root.as_ref().join(name),
        }
    }

    /// Returns the resolved filesystem path of this resource.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the resource currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns the last-modified timestamp of the resource.
    pub fn modified(&self) -> Result<SystemTime, ResourceError> {
        Ok(fs::metadata(&self.path)?.modified()?)
    }

    /// Returns the size of the resource in bytes.
    pub fn len(&self) -> Result<u64, ResourceError> {
        Ok(fs::metadata(&self.path)?.len())
    }

    /// Returns true if the resource exists and is zero bytes long.
    pub fn is_empty(&self) -> Result<bool, ResourceError> {
        Ok(self.len()? == 0)
    }

    /// Ensures the resource's containing directory and the file itself
    /// exist, creating an empty file if needed.
    ///
    /// Existing content is left untouched. This establishes the storage
    /// path before a first-time download is attempted.
    pub fn create_empty(&self) -> Result<(), ResourceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        Ok(())
    }

    /// Removes the resource from disk.
    pub fn delete(&self) -> Result<(), ResourceError> {
        fs::remove_file(&self.path)?;
        Ok(())
    }
}

/// An exclusively-owned temporary copy of a resource's prior bytes.
///
/// The snapshot file is deleted when the snapshot drops - after a committed
/// update or a final rollback, nothing is left behind for temp-directory GC.
pub struct RollbackSnapshot {
    file: NamedTempFile,
}

impl RollbackSnapshot {
    /// Captures the current bytes of `resource` into a fresh temp file.
    pub fn capture(resource: &LocalResource) -> Result<Self, ResourceError> {
        if !resource.exists() {
            return Err(ResourceError::Missing(resource.path().to_path_buf()));
        }

        let mut file = NamedTempFile::new()?;
        let mut source = File::open(resource.path())?;
        let copied = copy_stream(&mut source, file.as_file_mut(), DEFAULT_BUFFER_SIZE)?;
        file.as_file_mut().sync_all()?;

        debug!(bytes = copied, path = %resource.path().display(), "captured rollback snapshot");
        Ok(RollbackSnapshot { file })
    }

    /// Overwrites `resource` with the snapshot's bytes, byte for byte.
    pub fn restore(&self, resource: &LocalResource) -> Result<(), ResourceError> {
        let mut source = File::open(self.file.path())?;
        let mut destination = File::create(resource.path())?;
        copy_stream(&mut source, &mut destination, DEFAULT_BUFFER_SIZE)?;
        destination.sync_all()?;
        Ok(())
    }

    /// Returns the path of the snapshot's temp file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Errors from local resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The resource does not exist on disk.
    #[error("Resource does not exist: {0}")]
    Missing(PathBuf),
}
