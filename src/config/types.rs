// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, GitConfig, [RepoConfig]
//! GitConfig --> CloneOptions, FetchOptions, SubmoduleUpdateOptions
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, GitError, GoodleError, GoodleResult};
use crate::git::online::{
    CloneOptions, PartialCloneFilter, SubmoduleUpdateOptions, SubmoduleUpdateStrategy,
};
use crate::logging::LogLevel;

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Repositories processed at once.
    pub jobs: usize,
    /// Hide non-error console output while a batch runs.
    pub quiet: bool,
    /// Base directory for relative repository paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            jobs: default_jobs(),
            quiet: true,
            root: None,
        }
    }
}

/// Defaults for clone, fetch and submodule operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Remote used when a repository does not name one.
    pub remote: String,
    /// Shallow clone depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    pub single_branch: bool,
    /// `--filter=blob:none`
    pub blobless: bool,
    /// `--filter=tree:0`
    pub treeless: bool,
    /// Parallel submodule fetches inside one clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_jobs: Option<u32>,
    /// Recurse into nested submodules.
    pub recursive: bool,
    pub checkout: bool,
    pub rebase: bool,
    pub merge: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            depth: None,
            single_branch: false,
            blobless: false,
            treeless: false,
            clone_jobs: None,
            recursive: true,
            checkout: false,
            rebase: false,
            merge: false,
        }
    }
}

impl GitConfig {
    /// # Errors
    ///
    /// Returns [`GitError::ConflictingOptions`] if both filters are set.
    pub fn filter(&self) -> GoodleResult<Option<PartialCloneFilter>> {
        PartialCloneFilter::from_flags(self.blobless, self.treeless)
    }

    /// # Errors
    ///
    /// Returns [`GitError::ConflictingOptions`] if more than one strategy is set.
    pub fn update_strategy(&self) -> GoodleResult<Option<SubmoduleUpdateStrategy>> {
        SubmoduleUpdateStrategy::from_flags(self.checkout, self.rebase, self.merge)
    }

    /// Clone options for `branch`, or the remote's default branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter flags conflict.
    pub fn clone_options(&self, branch: Option<&str>) -> GoodleResult<CloneOptions> {
        Ok(CloneOptions {
            branch: branch.map(str::to_string),
            single_branch: self.single_branch,
            jobs: self.clone_jobs,
            depth: self.depth,
            filter: self.filter()?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the strategy flags conflict.
    pub fn submodule_update_options(&self) -> GoodleResult<SubmoduleUpdateOptions> {
        Ok(SubmoduleUpdateOptions::builder()
            .init(true)
            .single_branch(self.single_branch)
            .recursive(self.recursive)
            .maybe_depth(self.depth)
            .maybe_jobs(self.clone_jobs)
            .maybe_strategy(self.update_strategy()?)
            .build())
    }
}

/// One managed repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    pub name: String,
    /// Checkout location; `<root>/<name>` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Branch to check out on clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Overrides `git.remote`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl RepoConfig {
    /// URL to clone from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if no URL is configured.
    pub fn require_url(&self) -> GoodleResult<&str> {
        self.url.as_deref().ok_or_else(|| {
            ConfigError::InvalidValue {
                section: format!("repos.{}", self.name),
                key: "url".to_string(),
                message: "required to clone".to_string(),
            }
            .into()
        })
    }
}

pub(crate) fn conflict(section: &str, key: &str, err: GoodleError) -> GoodleError {
    let message = match err {
        GoodleError::Git(git) => match *git {
            GitError::ConflictingOptions { message } => message,
            other => other.to_string(),
        },
        other => other.to_string(),
    };
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message,
    }
    .into()
}
