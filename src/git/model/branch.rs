// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local, remote and tracking branches.
//!
//! ```text
//!   absent --create--> local-only --push--> tracking
//!                          ^                   |
//!                          '----set_upstream---'
//!   remote-only --TrackingBranch::create--> tracking
//! ```
//!
//! Whether a branch tracks another is never stored: it is answered from
//! the factory's tracking-branch query, i.e. from the live git config.

use std::path::{Path, PathBuf};

use super::refs::{GitRef, validate};
use super::{Commit, Remote, announce, factory, skip};
use crate::error::{GitError, GoodleResult};
use crate::git::online::{self, FetchOptions, PushOptions};
use crate::git::{offline, parse};

fn ensure_attached(path: &Path) -> GoodleResult<()> {
    if offline::is_detached(path)? {
        return Err(GitError::DetachedHead {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(())
}

// --- LocalBranch ---

/// A branch under `refs/heads/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalBranch {
    path: PathBuf,
    name: String,
}

impl LocalBranch {
    /// # Errors
    ///
    /// Returns [`GitError::InvalidRefName`] if `name` is not a valid branch name.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> GoodleResult<Self> {
        let branch = Self::from_git(path, name);
        validate(&branch.formatted_ref())?;
        Ok(branch)
    }

    pub(crate) fn from_git(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn exists(&self) -> GoodleResult<bool> {
        factory::has_local_branch(&self.path, &self.name)
    }

    /// # Errors
    ///
    /// Returns an error if the tracking branches cannot be listed.
    pub fn is_tracking_branch(&self) -> GoodleResult<bool> {
        factory::has_tracking_branch(&self.path, &self.name)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn sha(&self) -> GoodleResult<Option<String>> {
        offline::branch_commit_sha(&self.path, &self.name, None)
    }

    /// Commit at the tip of the branch.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn commit(&self) -> GoodleResult<Option<Commit>> {
        Ok(self.sha()?.map(|sha| Commit::from_git(&self.path, sha)))
    }

    /// Create the branch at `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git branch` fails.
    pub fn create(&self) -> GoodleResult<()> {
        if self.exists()? {
            skip("local branch already exists", &self.name);
            return Ok(());
        }
        announce("create local branch", &self.name, || {
            offline::create_local_branch(&self.path, &self.name)
        })
    }

    /// Delete the branch; `force` also deletes it when unmerged.
    ///
    /// # Errors
    ///
    /// Returns an error if `git branch -d` fails.
    pub fn delete(&self, force: bool) -> GoodleResult<()> {
        if !self.exists()? {
            skip("local branch does not exist", &self.name);
            return Ok(());
        }
        announce("delete local branch", &self.name, || {
            offline::delete_local_branch(&self.path, &self.name, force)
        })
    }

    /// Push to `remote`, as `remote_branch` or under the same name.
    ///
    /// A branch that does not exist is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] when `HEAD` is detached, or the
    /// `git push` failure.
    pub fn push(&self, remote: &Remote, remote_branch: Option<&str>, force: bool) -> GoodleResult<()> {
        ensure_attached(&self.path)?;
        if !self.exists()? {
            skip("local branch does not exist", &self.name);
            return Ok(());
        }
        let options = PushOptions::builder()
            .local_branch(self.name.clone())
            .maybe_remote_branch(remote_branch)
            .remote(remote.name())
            .force(force)
            .build();
        announce("push local branch", &self.name, || {
            online::push(&self.path, &options)
        })
    }

    /// Make `upstream` this branch's upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if `git branch --set-upstream-to` fails.
    pub fn set_upstream(&self, upstream: &RemoteBranch) -> GoodleResult<()> {
        announce("set upstream branch", &self.name, || {
            offline::set_upstream_branch(
                &self.path,
                &self.name,
                upstream.name(),
                Some(upstream.remote().name()),
            )
        })
    }
}

impl GitRef for LocalBranch {
    fn path(&self) -> &Path {
        &self.path
    }

    fn short_ref(&self) -> String {
        self.name.clone()
    }

    fn formatted_ref(&self) -> String {
        parse::format_git_branch(&self.name)
    }

    fn checkout(&self) -> GoodleResult<()> {
        if offline::is_on_branch(&self.path, &self.name)? {
            skip("branch already checked out", &self.name);
            return Ok(());
        }
        announce("checkout branch", &self.name, || {
            offline::checkout(&self.path, &self.name)
        })
    }
}

// --- RemoteBranch ---

/// A branch on a [`Remote`].
///
/// Identity is the remote and the name; `is_default` is informational.
#[derive(Debug, Clone)]
pub struct RemoteBranch {
    remote: Remote,
    name: String,
    is_default: bool,
}

impl PartialEq for RemoteBranch {
    fn eq(&self, other: &Self) -> bool {
        self.remote == other.remote && self.name == other.name
    }
}

impl Eq for RemoteBranch {}

impl RemoteBranch {
    /// # Errors
    ///
    /// Returns [`GitError::InvalidRefName`] if `name` is not a valid branch name.
    pub fn new(remote: &Remote, name: impl Into<String>) -> GoodleResult<Self> {
        let branch = Self::from_git(remote.clone(), name, false);
        validate(&branch.formatted_ref())?;
        Ok(branch)
    }

    pub(crate) fn from_git(remote: Remote, name: impl Into<String>, is_default: bool) -> Self {
        Self {
            remote,
            name: name.into(),
            is_default,
        }
    }

    pub(crate) const fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn remote(&self) -> &Remote {
        &self.remote
    }

    /// True if the remote's `HEAD` points at this branch.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// True if a remote-tracking ref for this branch exists locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote branches cannot be listed.
    pub fn exists(&self) -> GoodleResult<bool> {
        factory::has_remote_branch(&self.remote, &self.name)
    }

    /// True if the branch exists on the remote right now (`ls-remote`).
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn exists_online(&self) -> GoodleResult<bool> {
        online::branch_exists_at_remote(Some(self.path()), self.remote.name(), &self.name)
    }

    /// True if some local branch tracks this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracking branches cannot be listed.
    pub fn is_tracking_branch(&self) -> GoodleResult<bool> {
        Ok(factory::tracking_branches(self.path())?
            .iter()
            .any(|t| t.upstream_branch() == self))
    }

    /// Sha of the local remote-tracking ref.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn sha(&self) -> GoodleResult<Option<String>> {
        offline::branch_commit_sha(self.path(), &self.name, Some(self.remote.name()))
    }

    /// Create the branch on the remote from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn create(&self, source: &LocalBranch) -> GoodleResult<()> {
        if self.exists_online()? {
            skip("remote branch already exists", &self.name);
            return Ok(());
        }
        let options = PushOptions::builder()
            .local_branch(source.name())
            .remote_branch(self.name.clone())
            .remote(self.remote.name())
            .build();
        announce("create remote branch", &self.name, || {
            online::push(self.path(), &options)
        })
    }

    /// Delete the branch on the remote.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn delete(&self) -> GoodleResult<()> {
        if !self.exists_online()? {
            skip("remote branch does not exist", &self.name);
            return Ok(());
        }
        announce("delete remote branch", &self.name, || {
            online::delete_remote_branch(self.path(), &self.name, self.remote.name())
        })
    }

    /// Pull this branch into the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if `git pull` fails.
    pub fn pull(&self, rebase: bool) -> GoodleResult<()> {
        announce("pull remote branch", &self.name, || {
            online::pull(self.path(), Some(self.remote.name()), Some(&self.name), rebase)
        })
    }

    /// Fetch only this branch.
    ///
    /// # Errors
    ///
    /// Returns an error if `git fetch` fails.
    pub fn fetch(&self) -> GoodleResult<()> {
        let options = FetchOptions::builder()
            .remote(self.remote.name())
            .reference(self.name.clone())
            .build();
        announce("fetch remote branch", &self.name, || {
            online::fetch(self.path(), &options)
        })
    }
}

impl GitRef for RemoteBranch {
    fn path(&self) -> &Path {
        self.remote.path()
    }

    fn short_ref(&self) -> String {
        self.name.clone()
    }

    /// The branch as named on the remote side.
    fn formatted_ref(&self) -> String {
        parse::format_git_branch(&self.name)
    }

    /// Detached checkout of the remote-tracking ref.
    fn checkout(&self) -> GoodleResult<()> {
        let tracking = format!("{}/{}", self.remote.name(), self.name);
        announce("checkout remote branch", &tracking, || {
            offline::checkout(self.path(), &tracking)
        })
    }
}

// --- TrackingBranch ---

/// A local branch linked to an upstream (and push) branch.
///
/// Equal when the local name and the upstream branch match.
#[derive(Debug, Clone)]
pub struct TrackingBranch {
    local: LocalBranch,
    upstream_branch: RemoteBranch,
    push_branch: RemoteBranch,
}

impl PartialEq for TrackingBranch {
    fn eq(&self, other: &Self) -> bool {
        self.local.name == other.local.name && self.upstream_branch == other.upstream_branch
    }
}

impl Eq for TrackingBranch {}

impl TrackingBranch {
    /// `push_branch` defaults to `upstream_branch`.
    #[must_use]
    pub fn new(
        local: LocalBranch,
        upstream_branch: RemoteBranch,
        push_branch: Option<RemoteBranch>,
    ) -> Self {
        let push_branch = push_branch.unwrap_or_else(|| upstream_branch.clone());
        Self {
            local,
            upstream_branch,
            push_branch,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.local.name
    }

    #[must_use]
    pub const fn local(&self) -> &LocalBranch {
        &self.local
    }

    #[must_use]
    pub const fn upstream_branch(&self) -> &RemoteBranch {
        &self.upstream_branch
    }

    #[must_use]
    pub const fn push_branch(&self) -> &RemoteBranch {
        &self.push_branch
    }

    /// `name/remote/branch`, used to order tracking branches.
    #[must_use]
    pub fn sort_key(&self) -> String {
        format!(
            "{}/{}/{}",
            self.local.name,
            self.upstream_branch.remote().name(),
            self.upstream_branch.name()
        )
    }

    /// True if git config links these branches.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracking branches cannot be listed.
    pub fn exists(&self) -> GoodleResult<bool> {
        Ok(factory::tracking_branches(self.path())?.contains(self))
    }

    /// Sha of the upstream's remote-tracking ref.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn upstream_sha(&self) -> GoodleResult<Option<String>> {
        self.upstream_branch.sha()
    }

    /// Create whichever side is missing and link them.
    ///
    /// A missing local branch starts at the upstream when that exists on
    /// the remote, otherwise at `HEAD`; a missing upstream is pushed from
    /// the local branch.
    ///
    /// # Errors
    ///
    /// Returns an error if any git step fails.
    pub fn create(&self) -> GoodleResult<()> {
        if self.exists()? {
            skip("tracking branch already exists", self.name());
            return Ok(());
        }
        if !self.local.exists()? && self.upstream_branch.exists_online()? {
            self.upstream_branch.fetch()?;
            let start_point = self.upstream_ref();
            announce("create local branch", self.name(), || {
                offline::create_local_branch_at(self.path(), self.name(), &start_point)
            })?;
            return self.set_upstream();
        }
        self.local.create()?;
        self.upstream_branch.create(&self.local)?;
        self.upstream_branch.fetch()?;
        self.set_upstream()
    }

    /// Delete the local branch, and the upstream too if `remote` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if any git step fails.
    pub fn delete(&self, remote: bool) -> GoodleResult<()> {
        self.local.delete(false)?;
        if remote {
            self.upstream_branch.delete()?;
        }
        Ok(())
    }

    /// Write the upstream link to git config.
    ///
    /// # Errors
    ///
    /// Returns an error if `git branch --set-upstream-to` fails.
    pub fn set_upstream(&self) -> GoodleResult<()> {
        self.local.set_upstream(&self.upstream_branch)
    }

    /// Local ref the upstream resolves to; `.` names a local upstream.
    fn upstream_ref(&self) -> String {
        match self.upstream_branch.remote().name() {
            "." => parse::format_git_branch(self.upstream_branch.name()),
            remote => parse::format_git_remote_branch(remote, self.upstream_branch.name()),
        }
    }

    /// Push the local branch and record the upstream in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push -u` fails.
    pub fn create_upstream(&self) -> GoodleResult<()> {
        if self.upstream_branch.exists_online()? {
            skip("upstream branch already exists", self.upstream_branch.name());
            return self.set_upstream();
        }
        announce("create upstream branch", self.name(), || {
            online::create_upstream_branch(
                self.path(),
                &self.local.name,
                self.upstream_branch.name(),
                self.upstream_branch.remote().name(),
            )
        })
    }

    /// Push local commits to the push branch.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn push(&self, force: bool) -> GoodleResult<()> {
        self.local.push(
            self.push_branch.remote(),
            Some(self.push_branch.name()),
            force,
        )
    }

    /// Pull the upstream into the local branch, which must be checked out.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] when `HEAD` is detached,
    /// [`GitError::NotOnBranch`] when another branch is checked out, or the
    /// `git pull` failure.
    pub fn pull(&self, rebase: bool) -> GoodleResult<()> {
        ensure_attached(self.path())?;
        if !offline::is_on_branch(self.path(), self.name())? {
            return Err(GitError::NotOnBranch {
                branch: self.name().to_string(),
                path: self.path().display().to_string(),
            }
            .into());
        }
        self.upstream_branch.pull(rebase)
    }
}

impl GitRef for TrackingBranch {
    fn path(&self) -> &Path {
        self.local.path()
    }

    fn short_ref(&self) -> String {
        self.local.short_ref()
    }

    fn formatted_ref(&self) -> String {
        self.local.formatted_ref()
    }

    fn checkout(&self) -> GoodleResult<()> {
        self.local.checkout()
    }
}
