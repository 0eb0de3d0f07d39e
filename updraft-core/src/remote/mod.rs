// SPDX-FileCopyrightText: 2026 Updraft Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote resource access
//!
//! One remote resource exists for the duration of one check/fetch cycle:
//! open it, read its metadata (status, last-modified, size), stream its
//! body, and release the connection on every exit path.
//!
//! The [`RemoteSource`] trait is the seam between the engine and the
//! transport: [`HttpSource`] talks plain HTTP, [`MockSource`] serves
//! scripted responses for tests.

mod error;
mod http;
mod mock;
mod types;

pub use error::FetchError;
pub use http::HttpSource;
pub use mock::MockSource;
pub use types::{FetchConfig, RemoteConnection, RemoteMetadata, RemoteSource, HTTP_STATUS_OK};
