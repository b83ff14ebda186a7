// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::refs::{GitRef, validate};
use super::{announce, skip};
use crate::error::GoodleResult;
use crate::git::offline;

/// A commit, identified by its full sha.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Commit {
    path: PathBuf,
    sha: String,
}

impl Commit {
    /// # Errors
    ///
    /// Returns [`crate::error::GitError::InvalidRefName`] for a malformed sha.
    pub fn new(path: impl Into<PathBuf>, sha: impl Into<String>) -> GoodleResult<Self> {
        let commit = Self::from_git(path, sha);
        validate(&commit.sha)?;
        Ok(commit)
    }

    pub(crate) fn from_git(path: impl Into<PathBuf>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sha: sha.into(),
        }
    }

    #[must_use]
    pub fn sha(&self) -> &str {
        &self.sha
    }
}

impl GitRef for Commit {
    fn path(&self) -> &Path {
        &self.path
    }

    fn short_ref(&self) -> String {
        self.sha.clone()
    }

    fn formatted_ref(&self) -> String {
        self.sha.clone()
    }

    fn checkout(&self) -> GoodleResult<()> {
        let head = offline::current_head_commit_sha(&self.path, false)?;
        if head.as_deref() == Some(self.sha.as_str()) && offline::is_detached(&self.path)? {
            skip("commit already checked out", &self.sha);
            return Ok(());
        }
        announce("checkout commit", &self.sha, || {
            offline::checkout(&self.path, &self.sha)
        })
    }
}
