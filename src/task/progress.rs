// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Progress bar for pool runs.

use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::{PoolObserver, PoolState, TaskOutcome};

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// [`PoolObserver`] drawing one bar for the whole batch on stderr.
#[derive(Debug, Clone)]
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver {
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(bar_style());
        Self { bar }
    }

    /// An observer that tracks progress without drawing anything.
    #[must_use]
    pub fn hidden() -> Self {
        let observer = Self::new();
        observer.bar.set_draw_target(ProgressDrawTarget::hidden());
        observer
    }

    /// Finished tasks so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}

impl PoolObserver for ProgressObserver {
    fn before_tasks(&self, count: usize) {
        self.bar.set_length(count as u64);
        self.bar.set_position(0);
    }

    fn before_task(&self, name: &str) {
        self.bar.set_message(name.to_owned());
    }

    fn after_task(&self, name: &str, outcome: TaskOutcome) {
        if outcome != TaskOutcome::Succeeded {
            self.bar.println(format!("{name}: {outcome:?}"));
        }
        self.bar.inc(1);
    }

    fn after_tasks(&self, state: PoolState) {
        match state {
            PoolState::Completed => self.bar.finish_with_message("done"),
            _ => self.bar.abandon_with_message(state.to_string()),
        }
    }
}
