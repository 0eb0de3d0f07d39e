// SPDX-FileCopyrightText: 2026 Updraft Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task primitives
//!
//! State machine and cooperative cancellation for the background update task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle state of an update task.
///
/// A task starts in `Idle`, moves to `Running` when driven, and ends in
/// exactly one of the terminal states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    /// Not started yet.
    Idle,
    /// The task is executing.
    Running,
    /// The caller requested cancellation before a terminal state was reached.
    Cancelled,
    /// The task ended with an error outcome.
    Failed,
    /// The task ended with a completion outcome.
    Completed,
}

impl TaskState {
    /// Returns true if the task has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Cancelled | TaskState::Failed | TaskState::Completed
        )
    }
}

/// Shared cancellation flag for a running task.
///
/// Cancellation is cooperative: setting the flag does not interrupt an
/// in-flight I/O call, it is observed at the next checkpoint in the task
/// algorithm (including transfer chunk boundaries).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a new, unset token.
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Requests cancellation. Irrevocable for the task holding this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
