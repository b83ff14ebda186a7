// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodules of a superproject.
//!
//! ```text
//!   declared (.gitmodules)
//!       | init
//!       v
//!   initialized (.git/config)      is_initialized()
//!       | update
//!       v
//!   cloned (git dir populated)     is_cloned()
//! ```
//!
//! `url`, `commit`, `branch` and `active` are read once, when the factory
//! builds the handle; the states above are always re-queried.

use std::path::{Path, PathBuf};

use super::{Repo, announce, skip};
use crate::error::GoodleResult;
use crate::git::offline;
use crate::git::online::{self, SubmoduleUpdateOptions};

/// A repository nested in a parent repository.
#[derive(Debug, Clone)]
pub struct Submodule {
    repo: Repo,
    parent_path: PathBuf,
    submodule_path: PathBuf,
    name: String,
    url: Option<String>,
    commit: Option<String>,
    branch: Option<String>,
    active: bool,
}

impl PartialEq for Submodule {
    fn eq(&self, other: &Self) -> bool {
        self.parent_path == other.parent_path && self.submodule_path == other.submodule_path
    }
}

impl Eq for Submodule {}

/// Point-in-time superproject record for one submodule.
#[derive(Debug, Clone, Default)]
pub(crate) struct SubmoduleRecord {
    pub(crate) name: String,
    pub(crate) submodule_path: PathBuf,
    pub(crate) url: Option<String>,
    pub(crate) commit: Option<String>,
    pub(crate) branch: Option<String>,
    pub(crate) active: bool,
}

impl Submodule {
    pub(crate) fn from_record(parent_path: &Path, record: SubmoduleRecord) -> Self {
        let repo = Repo::from_absolute(parent_path.join(&record.submodule_path), None);
        Self {
            repo,
            parent_path: parent_path.to_path_buf(),
            submodule_path: record.submodule_path,
            name: record.name,
            url: record.url,
            commit: record.commit,
            branch: record.branch,
            active: record.active,
        }
    }

    /// The nested checkout as a repository.
    #[must_use]
    pub const fn repo(&self) -> &Repo {
        &self.repo
    }

    #[must_use]
    pub fn parent_path(&self) -> &Path {
        &self.parent_path
    }

    /// Path relative to the parent repository.
    #[must_use]
    pub fn submodule_path(&self) -> &Path {
        &self.submodule_path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Sha recorded by the superproject.
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    /// Branch configured for `--remote` updates.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// # Errors
    ///
    /// Returns an error if the submodule config cannot be read.
    pub fn is_initialized(&self) -> GoodleResult<bool> {
        offline::is_submodule_initialized(&self.parent_path, &self.submodule_path)
    }

    /// # Errors
    ///
    /// Returns an error if the submodule config cannot be read.
    pub fn is_cloned(&self) -> GoodleResult<bool> {
        offline::is_submodule_cloned(&self.parent_path, &self.submodule_path)
    }

    /// A submodule exists once it is cloned.
    ///
    /// # Errors
    ///
    /// Returns an error if the submodule config cannot be read.
    pub fn exists(&self) -> GoodleResult<bool> {
        self.is_cloned()
    }

    fn what(&self) -> String {
        self.submodule_path.display().to_string()
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule init` fails.
    pub fn init(&self) -> GoodleResult<()> {
        if self.is_initialized()? {
            skip("submodule already initialized", &self.what());
            return Ok(());
        }
        announce("initialize submodule", &self.what(), || {
            offline::submodule_init(&self.parent_path, &[&self.submodule_path])
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule deinit` fails.
    pub fn deinit(&self, force: bool) -> GoodleResult<()> {
        if !self.is_initialized()? {
            skip("submodule not initialized", &self.what());
            return Ok(());
        }
        announce("deinitialize submodule", &self.what(), || {
            offline::submodule_deinit(&self.parent_path, &self.submodule_path, force)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule sync` fails.
    pub fn sync(&self, recursive: bool) -> GoodleResult<()> {
        announce("sync submodule", &self.what(), || {
            offline::submodule_sync(&self.parent_path, recursive)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule set-branch` fails.
    pub fn set_branch(&self, branch: &str) -> GoodleResult<()> {
        if self.branch.as_deref() == Some(branch) {
            skip("submodule already tracks this branch", branch);
            return Ok(());
        }
        announce("set submodule branch", &self.what(), || {
            offline::submodule_set_branch(&self.parent_path, &self.submodule_path, branch)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule set-branch --default` fails.
    pub fn unset_branch(&self) -> GoodleResult<()> {
        if self.branch.is_none() {
            skip("submodule has no branch set", &self.what());
            return Ok(());
        }
        announce("unset submodule branch", &self.what(), || {
            offline::submodule_unset_branch(&self.parent_path, &self.submodule_path)
        })
    }

    /// # Errors
    ///
    /// Returns an error if `git submodule set-url` fails.
    pub fn set_url(&self, url: &str) -> GoodleResult<()> {
        if self.url.as_deref() == Some(url) {
            skip("submodule already uses this url", url);
            return Ok(());
        }
        announce("set submodule url", &self.what(), || {
            offline::submodule_set_url(&self.parent_path, &self.submodule_path, url)
        })
    }

    /// Update only this submodule; `options.paths` is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if `git submodule update` fails.
    pub fn update(&self, options: &SubmoduleUpdateOptions) -> GoodleResult<()> {
        let options = SubmoduleUpdateOptions {
            paths: vec![self.submodule_path.clone()],
            ..options.clone()
        };
        announce("update submodule", &self.what(), || {
            online::submodule_update(&self.parent_path, &options)
        })
    }
}
