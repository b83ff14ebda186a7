// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded-concurrency task execution.
//!
//! # Architecture
//!
//! ```text
//! TaskPool::new(jobs)
//!   .with_quiet()  .with_observer()
//!   .run(tasks).await
//!        |
//!        |  Semaphore(jobs), acquired in input order
//!        v
//!   per task:  before_task --> spawn_blocking(run) --> after_task
//!        |                           |
//!        |            Err: cancel token, keep first error
//!        v
//!   NotStarted --> Running --> Completed | Cancelled
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Task`] | One unit of blocking work with lifecycle hooks |
//! | [`TaskContext`] | Lets a running task see pool cancellation |
//! | [`TaskPool`] | Runs tasks with a concurrency limit |
//! | [`PoolObserver`] | Batch and per-task progress callbacks |
//! | [`ProgressObserver`] | `indicatif` progress bar observer |
//! | [`RepoTask`] | Clone, fetch, update or inspect one repository |

pub mod pool;
pub mod progress;
pub mod repo;

use std::fmt;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

pub use pool::TaskPool;
pub use progress::ProgressObserver;
pub use repo::{RepoAction, RepoReport, RepoStatus, RepoTask};

/// A unit of work for the [`TaskPool`].
///
/// `run` is blocking (it spawns git processes) and is executed on tokio's
/// blocking thread pool; the hooks run on the async side around it.
pub trait Task: Send + Sync + 'static {
    /// Value produced by a successful run.
    type Output: Send + 'static;

    /// Human-readable name, used in logs, progress and error context.
    fn name(&self) -> &str;

    /// Called right before `run`, once the task holds a concurrency slot.
    fn before_task(&self) {}

    /// Do the work.
    ///
    /// # Errors
    ///
    /// Any error cancels the rest of the pool.
    fn run(&self, ctx: &TaskContext) -> Result<Self::Output>;

    /// Called after `run`, whether it succeeded or not.
    fn after_task(&self) {}
}

/// Execution context handed to [`Task::run`].
#[derive(Debug, Clone)]
pub struct TaskContext {
    cancel_token: CancellationToken,
}

impl TaskContext {
    #[must_use]
    pub const fn new(cancel_token: CancellationToken) -> Self {
        Self { cancel_token }
    }

    /// True once the owning pool has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }
}

/// Lifecycle of a [`TaskPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolState {
    #[default]
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

impl PoolState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one task's `run` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Failed,
    Panicked,
}

/// Progress callbacks around a pool run.
///
/// All methods default to doing nothing.
pub trait PoolObserver: Send + Sync {
    /// The batch is about to start with `count` tasks.
    fn before_tasks(&self, _count: usize) {}

    /// `name` acquired a slot and is about to run.
    fn before_task(&self, _name: &str) {}

    /// `name` finished.
    fn after_task(&self, _name: &str, _outcome: TaskOutcome) {}

    /// Every started task has finished; `state` is final.
    fn after_tasks(&self, _state: PoolState) {}
}
