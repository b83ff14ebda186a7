// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository pool tasks.
//!
//! ```text
//! RepoTask { repo, action }
//!   Clone            --> Repo::clone_repo
//!   Fetch            --> Repo::fetch
//!   Pull             --> Repo::pull
//!   UpdateSubmodules --> Repo::update_submodules
//!   Status           --> RepoStatus snapshot
//! ```

use std::path::PathBuf;

use serde::Serialize;

use super::{Task, TaskContext};
use crate::error::{GoodleError, Result, TaskError};
use crate::git::model::Repo;
use crate::git::offline;
use crate::git::online::{CloneOptions, SubmoduleUpdateOptions};

/// What to do with one repository.
#[derive(Debug, Clone)]
pub enum RepoAction {
    Clone { url: String, options: CloneOptions },
    Fetch { prune: bool, tags: bool },
    Pull { rebase: bool },
    UpdateSubmodules(SubmoduleUpdateOptions),
    Status,
}

impl RepoAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clone { .. } => "clone",
            Self::Fetch { .. } => "fetch",
            Self::Pull { .. } => "pull",
            Self::UpdateSubmodules(_) => "update-submodules",
            Self::Status => "status",
        }
    }
}

/// Working tree summary produced by [`RepoAction::Status`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    pub branch: Option<String>,
    pub commit: Option<String>,
    pub dirty: bool,
    pub untracked: bool,
    pub detached: bool,
    pub shallow: bool,
    /// Local commits not on the upstream
    pub ahead: u32,
    /// Upstream commits not yet merged
    pub behind: u32,
}

impl RepoStatus {
    /// Snapshot of `repo`. A missing repository yields the default status.
    ///
    /// # Errors
    ///
    /// Returns an error if a git query cannot be spawned.
    pub fn of(repo: &Repo) -> Result<Self> {
        if !repo.exists() {
            return Ok(Self::default());
        }
        let path = repo.path();
        Ok(Self {
            branch: offline::current_branch(path)?,
            commit: offline::current_head_commit_sha(path, true)?,
            dirty: repo.is_dirty()?,
            untracked: repo.has_untracked_files()?,
            detached: repo.is_detached()?,
            shallow: repo.is_shallow()?,
            ahead: repo.new_commits_count(false)?,
            behind: repo.new_commits_count(true)?,
        })
    }
}

/// Result of one [`RepoTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReport {
    pub name: String,
    pub path: PathBuf,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RepoStatus>,
}

/// One action against one repository.
#[derive(Debug, Clone)]
pub struct RepoTask {
    name: String,
    repo: Repo,
    action: RepoAction,
}

impl RepoTask {
    /// Task named after the repository's directory.
    #[must_use]
    pub fn new(repo: Repo, action: RepoAction) -> Self {
        let name = repo.path().file_name().map_or_else(
            || repo.path().display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self { name, repo, action }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn repo(&self) -> &Repo {
        &self.repo
    }

    #[must_use]
    pub const fn action(&self) -> &RepoAction {
        &self.action
    }

    fn report(&self, status: Option<RepoStatus>) -> RepoReport {
        RepoReport {
            name: self.name.clone(),
            path: self.repo.path().to_path_buf(),
            action: self.action.as_str(),
            status,
        }
    }
}

impl Task for RepoTask {
    type Output = RepoReport;

    fn name(&self) -> &str {
        &self.name
    }

    fn before_task(&self) {
        tracing::debug!(repo = %self.name, action = self.action.as_str(), "starting");
    }

    fn run(&self, ctx: &TaskContext) -> Result<RepoReport> {
        if ctx.is_cancelled() {
            return Err(GoodleError::from(TaskError::Cancelled(self.name.clone())).into());
        }
        match &self.action {
            RepoAction::Clone { url, options } => self.repo.clone_repo(url, options)?,
            RepoAction::Fetch { prune, tags } => self.repo.fetch(*prune, *tags)?,
            RepoAction::Pull { rebase } => self.repo.pull(*rebase)?,
            RepoAction::UpdateSubmodules(options) => self.repo.update_submodules(options)?,
            RepoAction::Status => return Ok(self.report(Some(RepoStatus::of(&self.repo)?))),
        }
        Ok(self.report(None))
    }

    fn after_task(&self) {
        tracing::debug!(repo = %self.name, action = self.action.as_str(), "finished");
    }
}
