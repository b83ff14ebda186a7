// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded-parallelism pool for independent [`Task`]s.
//!
//! ```text
//! for task in input order:
//!     select! { cancelled => stop admitting
//!               permit    => spawn(before -> spawn_blocking(run) -> after) }
//! join all spawned
//! ```
//!
//! A failing task cancels the shared token. Tasks that were admitted but
//! have not started yet see the token and skip their body; running bodies
//! are not interrupted and finish on their blocking thread.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::{PoolObserver, PoolState, Task, TaskContext, TaskOutcome};
use crate::error::{GoodleError, Result, TaskError};
use crate::logging;

/// First failure seen by the pool, already carrying the task name as context.
type Failure = Arc<Mutex<Option<anyhow::Error>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs tasks with at most `jobs` bodies in flight.
///
/// A pool is single-use: its cancellation token cannot be reset, so a
/// second [`TaskPool::run`] is rejected.
pub struct TaskPool {
    jobs: usize,
    quiet: bool,
    observer: Option<Arc<dyn PoolObserver>>,
    cancel_token: CancellationToken,
    state: Mutex<PoolState>,
}

impl fmt::Debug for TaskPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskPool")
            .field("jobs", &self.jobs)
            .field("quiet", &self.quiet)
            .field("observer", &self.observer.is_some())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl TaskPool {
    /// Creates a pool running at most `jobs` tasks at once (minimum 1).
    #[must_use]
    pub fn new(jobs: usize) -> Self {
        Self {
            jobs: jobs.max(1),
            quiet: false,
            observer: None,
            cancel_token: CancellationToken::new(),
            state: Mutex::new(PoolState::NotStarted),
        }
    }

    /// Suppresses non-error console output while the pool runs.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Attaches a progress observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PoolObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Uses an externally owned token, e.g. one tied to Ctrl+C.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    #[must_use]
    pub fn state(&self) -> PoolState {
        *lock(&self.state)
    }

    /// True once a task failed or [`TaskPool::cancel`] was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Stops admitting new tasks. Running bodies finish normally.
    pub fn cancel(&self) {
        info!("cancelling task pool");
        self.cancel_token.cancel();
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    fn set_state(&self, state: PoolState) {
        *lock(&self.state) = state;
    }

    fn notify(&self, f: impl FnOnce(&dyn PoolObserver)) {
        if let Some(observer) = &self.observer {
            f(observer.as_ref());
        }
    }

    /// Runs every task and collects the outputs of those that succeeded.
    ///
    /// Admission follows input order; completion order is not preserved,
    /// so the returned outputs are unordered.
    ///
    /// # Errors
    ///
    /// Returns the first task failure (or panic), after every started task
    /// has finished and all hooks have run. Returns
    /// [`TaskError::Cancelled`] if the pool was cancelled externally before
    /// all tasks were admitted. Returns an error if the pool already ran.
    pub async fn run<T: Task>(&self, tasks: Vec<T>) -> Result<Vec<T::Output>> {
        {
            let mut state = lock(&self.state);
            if *state != PoolState::NotStarted {
                return Err(GoodleError::other(format!("task pool already {state}")).into());
            }
            *state = PoolState::Running;
        }

        let _quiet = self.quiet.then(logging::quiet);
        let count = tasks.len();
        info!(count, jobs = self.jobs, "running tasks");
        self.notify(|o| o.before_tasks(count));

        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let results = Arc::new(Mutex::new(Vec::with_capacity(count)));
        let failure: Failure = Arc::new(Mutex::new(None));
        let mut set = JoinSet::new();
        let mut skipped = None;

        for task in tasks {
            let permit = tokio::select! {
                biased;
                () = self.cancel_token.cancelled() => None,
                permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                skipped = Some(task.name().to_owned());
                break;
            };

            let task = Arc::new(task);
            let token = self.cancel_token.clone();
            let observer = self.observer.clone();
            let results = Arc::clone(&results);
            let failure = Arc::clone(&failure);

            set.spawn(async move {
                let _permit = permit;
                let name = task.name().to_owned();
                if token.is_cancelled() {
                    debug!(task = %name, "pool cancelled, skipping");
                    return;
                }

                task.before_task();
                if let Some(observer) = &observer {
                    observer.before_task(&name);
                }

                let body = Arc::clone(&task);
                let ctx = TaskContext::new(token.clone());
                let outcome = match tokio::task::spawn_blocking(move || body.run(&ctx)).await {
                    Ok(Ok(output)) => {
                        lock(&results).push(output);
                        TaskOutcome::Succeeded
                    }
                    Ok(Err(err)) => {
                        error!(task = %name, "{err:#}");
                        record(&failure, err.context(format!("task '{name}' failed")));
                        token.cancel();
                        TaskOutcome::Failed
                    }
                    Err(join) => {
                        error!(task = %name, "task panicked: {join}");
                        record(&failure, GoodleError::from(TaskError::Panicked(name.clone())).into());
                        token.cancel();
                        TaskOutcome::Panicked
                    }
                };

                task.after_task();
                if let Some(observer) = &observer {
                    observer.after_task(&name, outcome);
                }
            });
        }

        while let Some(joined) = set.join_next().await {
            if let Err(err) = joined {
                error!("task hook panicked: {err}");
                record(
                    &failure,
                    GoodleError::from(TaskError::Panicked("<hook>".to_owned())).into(),
                );
                self.cancel_token.cancel();
            }
        }

        let state = if self.is_cancelled() {
            PoolState::Cancelled
        } else {
            PoolState::Completed
        };
        self.set_state(state);
        self.notify(|o| o.after_tasks(state));
        info!(state = %state, "tasks finished");

        if let Some(err) = lock(&failure).take() {
            return Err(err);
        }
        if let Some(name) = skipped {
            return Err(GoodleError::from(TaskError::Cancelled(name)))
                .context("task pool cancelled");
        }
        Ok(std::mem::take(&mut *lock(&results)))
    }
}

/// Keeps the first failure; later ones are only logged.
fn record(failure: &Mutex<Option<anyhow::Error>>, err: anyhow::Error) {
    let mut slot = lock(failure);
    if slot.is_none() {
        *slot = Some(err);
    }
}
