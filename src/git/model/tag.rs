// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local and remote tags.

use std::path::{Path, PathBuf};

use super::refs::{GitRef, validate};
use super::{Commit, Remote, announce, factory, skip};
use crate::error::GoodleResult;
use crate::git::{offline, online, parse};

/// A tag under `refs/tags/` in the local repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalTag {
    path: PathBuf,
    name: String,
}

impl LocalTag {
    /// # Errors
    ///
    /// Returns [`crate::error::GitError::InvalidRefName`] for an invalid tag name.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> GoodleResult<Self> {
        let tag = Self::from_git(path, name);
        validate(&tag.formatted_ref())?;
        Ok(tag)
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
    /// Returns an error if the tags cannot be listed.
    pub fn exists(&self) -> GoodleResult<bool> {
        factory::has_local_tag(&self.path, &self.name)
    }

    /// Sha of the tagged commit.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn sha(&self) -> GoodleResult<Option<String>> {
        offline::tag_commit_sha(&self.path, &self.name)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot be spawned.
    pub fn commit(&self) -> GoodleResult<Option<Commit>> {
        Ok(self.sha()?.map(|sha| Commit::from_git(&self.path, sha)))
    }

    /// Tag `target`, or `HEAD` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `git tag` fails.
    pub fn create(&self, target: Option<&str>) -> GoodleResult<()> {
        if self.exists()? {
            skip("local tag already exists", &self.name);
            return Ok(());
        }
        announce("create local tag", &self.name, || {
            offline::create_local_tag(&self.path, &self.name, target)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git tag --delete` fails.
    pub fn delete(&self) -> GoodleResult<()> {
        if !self.exists()? {
            skip("local tag does not exist", &self.name);
            return Ok(());
        }
        announce("delete local tag", &self.name, || {
            offline::delete_local_tag(&self.path, &self.name)
        })
    }

    /// Push the tag to `remote`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn push(&self, remote: &Remote, force: bool) -> GoodleResult<()> {
        announce("push tag", &self.name, || {
            online::push_tag(&self.path, &self.name, remote.name(), force)
        })
    }
}

impl GitRef for LocalTag {
    fn path(&self) -> &Path {
        &self.path
    }

    fn short_ref(&self) -> String {
        self.name.clone()
    }

    fn formatted_ref(&self) -> String {
        parse::format_git_tag(&self.name)
    }
}

/// A tag on a [`Remote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTag {
    remote: Remote,
    name: String,
}

impl RemoteTag {
    /// # Errors
    ///
    /// Returns [`crate::error::GitError::InvalidRefName`] for an invalid tag name.
    pub fn new(remote: &Remote, name: impl Into<String>) -> GoodleResult<Self> {
        let tag = Self::from_git(remote.clone(), name);
        validate(&tag.formatted_ref())?;
        Ok(tag)
    }

    pub(crate) fn from_git(remote: Remote, name: impl Into<String>) -> Self {
        Self {
            remote,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn remote(&self) -> &Remote {
        &self.remote
    }

    /// True if the tag exists on the remote (`ls-remote`).
    ///
    /// # Errors
    ///
    /// Returns an error if the remote tags cannot be listed.
    pub fn exists(&self) -> GoodleResult<bool> {
        factory::has_remote_tag(&self.remote, &self.name)
    }

    /// Sha the remote reports for this tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote tags cannot be listed.
    pub fn sha(&self) -> GoodleResult<Option<String>> {
        let mut tags = online::remote_tags_info(self.path(), self.remote.name())?;
        Ok(tags.remove(&self.name))
    }

    /// Push the local tag of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn create(&self) -> GoodleResult<()> {
        if self.exists()? {
            skip("remote tag already exists", &self.name);
            return Ok(());
        }
        announce("create remote tag", &self.name, || {
            online::push_tag(self.path(), &self.name, self.remote.name(), false)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn delete(&self) -> GoodleResult<()> {
        if !self.exists()? {
            skip("remote tag does not exist", &self.name);
            return Ok(());
        }
        announce("delete remote tag", &self.name, || {
            online::delete_remote_tag(self.path(), &self.name, self.remote.name())
        })
    }
}

impl GitRef for RemoteTag {
    fn path(&self) -> &Path {
        self.remote.path()
    }

    fn short_ref(&self) -> String {
        self.name.clone()
    }

    fn formatted_ref(&self) -> String {
        parse::format_git_tag(&self.name)
    }
}
