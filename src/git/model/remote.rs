// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git remotes.
//!
//! ```text
//! default_branch()
//!   refs/remotes/<name>/HEAD present? --yes--> read it
//!          | no
//!          v
//!   ls-remote --symref <name> HEAD
//!          |
//!          v
//!   write refs/remotes/<name>/HEAD (first write wins)
//! ```

use std::path::{Path, PathBuf};

use super::{RemoteBranch, RemoteTag, announce, factory, skip};
use crate::error::GoodleResult;
use crate::git::online::{self, FetchOptions};
use crate::git::offline;

/// A named remote of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Remote {
    path: PathBuf,
    name: String,
}

impl Remote {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn fetch_url(&self) -> GoodleResult<Option<String>> {
        offline::remote_url(&self.path, &self.name)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn push_url(&self) -> GoodleResult<Option<String>> {
        offline::remote_push_url(&self.path, &self.name)
    }

    /// # Errors
    ///
    /// Returns an error if the remotes cannot be listed.
    pub fn exists(&self) -> GoodleResult<bool> {
        factory::has_remote(&self.path, &self.name)
    }

    /// Remote-tracking branches of this remote known locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the branches cannot be listed.
    pub fn branches(&self) -> GoodleResult<Vec<RemoteBranch>> {
        factory::remote_branches(self)
    }

    /// Tags currently on the remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be listed.
    pub fn tags(&self) -> GoodleResult<Vec<RemoteTag>> {
        factory::remote_tags(self)
    }

    /// Add the remote with `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git remote add` fails.
    pub fn create(&self, url: &str, fetch: bool, tags: bool) -> GoodleResult<()> {
        if self.exists()? {
            skip("remote already exists", &self.name);
            return Ok(());
        }
        announce("create remote", &self.name, || {
            offline::create_remote(&self.path, &self.name, url, fetch, tags)
        })
    }

    /// Rename the remote in git and in this handle.
    ///
    /// # Errors
    ///
    /// Returns an error if `git remote rename` fails.
    pub fn rename(&mut self, new_name: &str) -> GoodleResult<()> {
        if self.name == new_name {
            skip("remote already has this name", new_name);
            return Ok(());
        }
        announce("rename remote", &self.name, || {
            offline::rename_remote(&self.path, &self.name, new_name)
        })?;
        new_name.clone_into(&mut self.name);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `git fetch` fails.
    pub fn fetch(&self, prune: bool, tags: bool) -> GoodleResult<()> {
        let options = FetchOptions::builder()
            .remote(self.name.clone())
            .prune(prune)
            .tags(tags)
            .build();
        announce("fetch remote", &self.name, || {
            online::fetch(&self.path, &options)
        })
    }

    /// The branch the remote's `HEAD` points at, cache first.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned or the cache file cannot be
    /// read or written.
    pub fn default_branch(&self) -> GoodleResult<Option<RemoteBranch>> {
        self.default_branch_with(|path, remote| online::default_branch(Some(path), remote))
    }

    /// Like [`Remote::default_branch`], with the network lookup supplied by
    /// the caller. `lookup` receives the repository path and remote name and
    /// only runs when the cache file is absent.
    ///
    /// # Errors
    ///
    /// See [`Remote::default_branch`].
    pub fn default_branch_with<F>(&self, lookup: F) -> GoodleResult<Option<RemoteBranch>>
    where
        F: FnOnce(&Path, &str) -> GoodleResult<Option<String>>,
    {
        if let Some(name) = offline::default_branch(&self.path, &self.name)? {
            return Ok(Some(RemoteBranch::from_git(self.clone(), name, true)));
        }
        let Some(name) = lookup(&self.path, &self.name)? else {
            return Ok(None);
        };
        offline::save_default_branch(&self.path, &self.name, &name)?;
        Ok(Some(RemoteBranch::from_git(self.clone(), name, true)))
    }
}
