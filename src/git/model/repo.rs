// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The repository aggregate.
//!
//! ```text
//!  Repo { path, default_remote }
//!    state      is_dirty / is_detached / is_shallow / is_rebase_in_progress
//!    validity   clean && no untracked && no rebase && submodules valid
//!    refs       remotes / branches / tags / current_branch / current_commit
//!    actions    clone / fetch / pull / reset / clean / stash / commit
//! ```

use std::path::{Path, PathBuf};

use super::{
    AllBranches, Commit, LocalBranch, LocalTag, Remote, RemoteBranch, Submodule, TrackingBranch,
    announce, factory, skip,
};
use crate::error::GoodleResult;
use crate::git::offline::{self, CleanFlags};
use crate::git::online::{self, CloneOptions, SubmoduleUpdateOptions};

/// A working tree and its git directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    path: PathBuf,
    default_remote: Option<Remote>,
}

impl Repo {
    /// Handle for the repository at `path` (made absolute).
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is needed and unavailable.
    pub fn new(path: impl AsRef<Path>, default_remote: Option<&str>) -> GoodleResult<Self> {
        let path = std::path::absolute(path.as_ref())?;
        let default_remote = default_remote.map(|name| Remote::new(&path, name));
        Ok(Self::from_absolute(path, default_remote))
    }

    pub(crate) const fn from_absolute(path: PathBuf, default_remote: Option<Remote>) -> Self {
        Self {
            path,
            default_remote,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Git directory, following `.git` files of submodules and worktrees.
    #[must_use]
    pub fn git_dir(&self) -> PathBuf {
        offline::git_dir(&self.path).unwrap_or_else(|| self.path.join(".git"))
    }

    #[must_use]
    pub const fn default_remote(&self) -> Option<&Remote> {
        self.default_remote.as_ref()
    }

    fn what(&self) -> String {
        self.path.display().to_string()
    }

    // --- State ---

    /// True once the git directory exists and is populated.
    #[must_use]
    pub fn exists(&self) -> bool {
        offline::git_dir(&self.path)
            .and_then(|dir| std::fs::read_dir(dir).ok())
            .is_some_and(|mut entries| entries.next().is_some())
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn is_dirty(&self) -> GoodleResult<bool> {
        offline::is_dirty(&self.path)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn has_untracked_files(&self) -> GoodleResult<bool> {
        offline::has_untracked_files(&self.path)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn is_detached(&self) -> GoodleResult<bool> {
        offline::is_detached(&self.path)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn is_shallow(&self) -> GoodleResult<bool> {
        offline::is_shallow(&self.path)
    }

    #[must_use]
    pub fn is_rebase_in_progress(&self) -> bool {
        offline::is_rebase_in_progress(&self.path)
    }

    /// Clean, without untracked files or a stopped rebase, and the same
    /// for every cloned submodule.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn is_valid(&self) -> GoodleResult<bool> {
        if self.is_dirty()? || self.has_untracked_files()? || self.is_rebase_in_progress() {
            return Ok(false);
        }
        for submodule in self.submodules()? {
            if submodule.is_cloned()? && !submodule.repo().is_valid()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Commits ahead of the upstream, or behind it when `upstream` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn new_commits_count(&self, upstream: bool) -> GoodleResult<u32> {
        offline::new_commits_count(&self.path, upstream)
    }

    // --- Refs ---

    /// # Errors
    ///
    /// Returns an error if the remotes cannot be listed.
    pub fn remotes(&self) -> GoodleResult<Vec<Remote>> {
        factory::remotes(&self.path)
    }

    /// # Errors
    ///
    /// Returns an error if the remotes cannot be listed.
    pub fn remote(&self, name: &str) -> GoodleResult<Option<Remote>> {
        factory::remote(&self.path, name)
    }

    /// # Errors
    ///
    /// Returns an error if the submodule config cannot be read.
    pub fn submodules(&self) -> GoodleResult<Vec<Submodule>> {
        factory::submodules(&self.path)
    }

    /// # Errors
    ///
    /// Returns an error if any branch listing fails.
    pub fn branches(&self) -> GoodleResult<AllBranches> {
        factory::all_branches(&self.path)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn local_branches(&self) -> GoodleResult<Vec<LocalBranch>> {
        factory::local_branches(&self.path)
    }

    /// Remote-tracking branches across all remotes.
    ///
    /// # Errors
    ///
    /// Returns an error if any listing fails.
    pub fn remote_branches(&self) -> GoodleResult<Vec<RemoteBranch>> {
        let mut branches = Vec::new();
        for remote in self.remotes()? {
            branches.extend(factory::remote_branches(&remote)?);
        }
        Ok(branches)
    }

    /// # Errors
    ///
    /// Returns an error if any listing fails.
    pub fn tracking_branches(&self) -> GoodleResult<Vec<TrackingBranch>> {
        factory::tracking_branches(&self.path)
    }

    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed.
    pub fn local_tags(&self) -> GoodleResult<Vec<LocalTag>> {
        factory::local_tags(&self.path)
    }

    /// The checked out branch, `None` when detached.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn current_branch(&self) -> GoodleResult<Option<LocalBranch>> {
        Ok(offline::current_branch(&self.path)?.map(|name| LocalBranch::from_git(&self.path, name)))
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn current_commit(&self) -> GoodleResult<Option<Commit>> {
        Ok(offline::current_head_commit_sha(&self.path, false)?
            .map(|sha| Commit::from_git(&self.path, sha)))
    }

    // --- Actions ---

    /// Clone `url` here unless a repository already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is non-empty or `git clone` fails.
    pub fn clone_repo(&self, url: &str, options: &CloneOptions) -> GoodleResult<()> {
        if self.exists() {
            skip("repository already cloned", &self.what());
            return Ok(());
        }
        announce("clone repository", url, || {
            online::clone(&self.path, url, options)
        })
    }

    /// Fetch the default remote, or every remote when none is set.
    ///
    /// # Errors
    ///
    /// Returns an error if `git fetch` fails.
    pub fn fetch(&self, prune: bool, tags: bool) -> GoodleResult<()> {
        match &self.default_remote {
            Some(remote) => remote.fetch(prune, tags),
            None => {
                for remote in self.remotes()? {
                    remote.fetch(prune, tags)?;
                }
                Ok(())
            }
        }
    }

    /// Pull the current branch's upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if `git pull` fails.
    pub fn pull(&self, rebase: bool) -> GoodleResult<()> {
        announce("pull", &self.what(), || {
            online::pull(&self.path, None, None, rebase)
        })
    }

    /// Download LFS objects for the checked out revision.
    ///
    /// # Errors
    ///
    /// Returns an error if `git lfs pull` fails.
    pub fn pull_lfs(&self) -> GoodleResult<()> {
        announce("pull lfs objects", &self.what(), || online::pull_lfs(&self.path))
    }

    /// Install the Git LFS hooks for this repository.
    ///
    /// # Errors
    ///
    /// Returns an error if `git lfs install --local` fails.
    pub fn install_lfs_hooks(&self) -> GoodleResult<()> {
        announce("install lfs hooks", &self.what(), || {
            offline::install_lfs_hooks(&self.path)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git add` fails.
    pub fn add(&self, files: &[&str]) -> GoodleResult<()> {
        announce("add files", &self.what(), || offline::add(&self.path, files))
    }

    /// # Errors
    ///
    /// Returns an error if `git commit` fails.
    pub fn commit(&self, message: &str) -> GoodleResult<()> {
        announce("commit", &self.what(), || offline::commit(&self.path, message))
    }

    /// # Errors
    ///
    /// Returns an error if `git stash` fails.
    pub fn stash(&self) -> GoodleResult<()> {
        if !self.is_dirty()? {
            skip("nothing to stash", &self.what());
            return Ok(());
        }
        announce("stash changes", &self.what(), || offline::stash(&self.path))
    }

    /// # Errors
    ///
    /// Returns an error if `git clean` fails.
    pub fn clean(&self, flags: CleanFlags) -> GoodleResult<()> {
        announce("clean", &self.what(), || offline::clean(&self.path, flags))
    }

    /// # Errors
    ///
    /// Returns an error if `git reset` fails.
    pub fn reset(&self, reference: &str, hard: bool) -> GoodleResult<()> {
        announce("reset", reference, || offline::reset(&self.path, reference, hard))
    }

    /// Hard reset to the last commit of `reference` before `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns an error if no commit matches or `git reset` fails.
    pub fn reset_timestamp(
        &self,
        timestamp: &str,
        reference: &str,
        author: Option<&str>,
    ) -> GoodleResult<()> {
        announce("reset to timestamp", timestamp, || {
            offline::reset_timestamp(&self.path, timestamp, reference, author)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git rebase --abort` fails.
    pub fn abort_rebase(&self) -> GoodleResult<()> {
        if !self.is_rebase_in_progress() {
            skip("no rebase in progress", &self.what());
            return Ok(());
        }
        announce("abort rebase", &self.what(), || offline::abort_rebase(&self.path))
    }

    /// Print `git status` to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if `git status` fails.
    pub fn status(&self, verbose: bool) -> GoodleResult<()> {
        offline::status(&self.path, verbose)
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule update` fails.
    pub fn update_submodules(&self, options: &SubmoduleUpdateOptions) -> GoodleResult<()> {
        if !offline::has_submodules(&self.path) {
            skip("no submodules", &self.what());
            return Ok(());
        }
        announce("update submodules", &self.what(), || {
            online::submodule_update(&self.path, options)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule sync` fails.
    pub fn sync_submodules(&self, recursive: bool) -> GoodleResult<()> {
        announce("sync submodules", &self.what(), || {
            offline::submodule_sync(&self.path, recursive)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule absorbgitdirs` fails.
    pub fn absorb_submodule_git_dirs(&self) -> GoodleResult<()> {
        announce("absorb submodule git dirs", &self.what(), || {
            offline::submodule_absorb_git_dirs(&self.path)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule foreach` fails.
    pub fn clean_submodules(&self, recursive: bool) -> GoodleResult<()> {
        announce("clean submodules", &self.what(), || {
            offline::clean_submodules(&self.path, recursive)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule foreach` fails.
    pub fn reset_submodules(&self, recursive: bool) -> GoodleResult<()> {
        announce("reset submodules", &self.what(), || {
            offline::reset_submodules(&self.path, recursive)
        })
    }
}
