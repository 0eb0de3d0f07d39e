//! Version comparison strategies
//!
//! Pluggable policy answering "is the remote copy newer than the local
//! one?". The engine injects one strategy at construction; swapping the
//! strategy never changes the engine.

use crate::remote::RemoteMetadata;
use crate::resource::LocalResource;

/// Capability for deciding whether a newer version of a local resource is
/// available at the remote endpoint.
///
/// Only called for resources that already exist locally - a missing local
/// resource short-circuits straight to "update needed".
pub trait VersionChecker: Send {
    /// Returns true if the remote copy should replace the local one.
    fn is_update_available(&self, local: &LocalResource, remote: &RemoteMetadata) -> bool;
}

/// Default strategy: compares last-modified timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampVersionChecker;

impl VersionChecker for TimestampVersionChecker {
    /// True iff the remote's last-modified timestamp is strictly newer than
    /// the local file's. A remote that advertises no timestamp is never
    /// considered newer.
    fn is_update_available(&self, local: &LocalResource, remote: &RemoteMetadata) -> bool {
        let Some(remote_modified) = remote.last_modified else {
            return false;
        };
        match local.modified() {
            Ok(local_modified) => remote_modified > local_modified,
            // Unreadable local metadata counts as out of date.
            Err(_) => true,
        }
    }
}

/// Alternative strategy: compares advertised remote size against local size.
///
/// Useful against servers that do not emit Last-Modified but always serve a
/// full artifact whose size changes between revisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentLengthVersionChecker;

impl VersionChecker for ContentLengthVersionChecker {
    fn is_update_available(&self, local: &LocalResource, remote: &RemoteMetadata) -> bool {
        let Some(remote_length) = remote.content_length else {
            return false;
        };
        match local.len() {
            Ok(local_length) => local_length != remote_length,
            Err(_) => true,
        }
    }
}
