// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the task pool.
//!
//! Covers the quiet guard around a pool run. These live in their own test
//! binary because the quiet state is process-wide.

use std::sync::{Arc, Mutex};

use goodle::error::{GoodleError, Result};
use goodle::logging::is_quiet;
use goodle::task::{PoolState, Task, TaskContext, TaskPool};

/// Records whether output was suppressed while its body ran.
struct Probe {
    name: String,
    fail: bool,
    saw_quiet: Arc<Mutex<Vec<bool>>>,
}

impl Task for Probe {
    type Output = ();

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _ctx: &TaskContext) -> Result<()> {
        self.saw_quiet.lock().unwrap().push(is_quiet());
        if self.fail {
            return Err(GoodleError::other("probe failed").into());
        }
        Ok(())
    }
}

fn probes(count: usize, fail: Option<usize>, saw_quiet: &Arc<Mutex<Vec<bool>>>) -> Vec<Probe> {
    (0..count)
        .map(|i| Probe {
            name: format!("probe-{i}"),
            fail: fail == Some(i),
            saw_quiet: Arc::clone(saw_quiet),
        })
        .collect()
}

#[tokio::test]
async fn test_quiet_pool_restores_output() {
    let saw_quiet = Arc::new(Mutex::new(Vec::new()));

    assert!(!is_quiet());
    let pool = TaskPool::new(2).with_quiet(true);
    pool.run(probes(3, None, &saw_quiet)).await.unwrap();

    assert!(!is_quiet());
    assert_eq!(*saw_quiet.lock().unwrap(), [true, true, true]);
    assert_eq!(pool.state(), PoolState::Completed);

    // a failing run restores output too
    saw_quiet.lock().unwrap().clear();
    let pool = TaskPool::new(1).with_quiet(true);
    let err = pool.run(probes(3, Some(0), &saw_quiet)).await.unwrap_err();

    assert_eq!(err.root_cause().to_string(), "probe failed");
    assert!(!is_quiet());
    assert_eq!(*saw_quiet.lock().unwrap(), [true]);
    assert_eq!(pool.state(), PoolState::Cancelled);

    // loud pools leave the flag alone
    saw_quiet.lock().unwrap().clear();
    TaskPool::new(1)
        .run(probes(1, None, &saw_quiet))
        .await
        .unwrap();
    assert_eq!(*saw_quiet.lock().unwrap(), [false]);
}
