// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for goodle.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. goodle.toml (cwd, optional)
//! 3. --config (repeatable)
//! 4. GOODLE_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GOODLE_GLOBAL__JOBS=8         → global.jobs = 8
//! GOODLE_GIT__REMOTE=upstream   → git.remote = "upstream"
//! GOODLE_GIT__SINGLE_BRANCH=1   → git.single_branch = true
//! ```
//!
//! # Repositories
//!
//! ```toml
//! [global]
//! root = "/src"
//!
//! [[repos]]
//! name = "goodle"
//! url = "https://example.com/goodle.git"
//!
//! [[repos]]
//! name = "vendored"
//! path = "third_party/vendored"   # relative to root
//! branch = "stable"
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, GoodleResult, Result};

pub use loader::ConfigLoader;
pub use types::{GitConfig, GlobalConfig, RepoConfig};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "goodle.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GOODLE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub git: GitConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repos: Vec<RepoConfig>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use goodle::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("goodle.toml")
    ///     .with_env_prefix("GOODLE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not validate.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Reject option combinations git would refuse or that make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first violation found.
    pub fn validate(&self) -> GoodleResult<()> {
        if self.global.jobs == 0 {
            return Err(invalid("global", "jobs", "must be at least 1"));
        }
        self.git
            .filter()
            .map_err(|err| types::conflict("git", "blobless", err))?;
        self.git
            .update_strategy()
            .map_err(|err| types::conflict("git", "checkout", err))?;

        let mut seen = BTreeSet::new();
        for repo in &self.repos {
            if repo.name.is_empty() {
                return Err(invalid("repos", "name", "must not be empty"));
            }
            if !seen.insert(repo.name.as_str()) {
                return Err(invalid(
                    "repos",
                    "name",
                    &format!("duplicate repository '{}'", repo.name),
                ));
            }
        }
        Ok(())
    }

    /// Repository named `name`.
    #[must_use]
    pub fn repo(&self, name: &str) -> Option<&RepoConfig> {
        self.repos.iter().find(|repo| repo.name == name)
    }

    /// The repositories named in `names`, or all of them when `names` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a name that is not configured.
    pub fn select(&self, names: &[String]) -> GoodleResult<Vec<&RepoConfig>> {
        if names.is_empty() {
            return Ok(self.repos.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                self.repo(name)
                    .ok_or_else(|| invalid("repos", name, "no such repository"))
            })
            .collect()
    }

    /// Base directory for relative repository paths.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.global
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Checkout location of `repo`.
    #[must_use]
    pub fn repo_path(&self, repo: &RepoConfig) -> PathBuf {
        match &repo.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.root().join(path),
            None => self.root().join(&repo.name),
        }
    }

    /// Remote used for `repo`.
    #[must_use]
    pub fn repo_remote<'a>(&'a self, repo: &'a RepoConfig) -> &'a str {
        repo.remote.as_deref().unwrap_or(&self.git.remote)
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered and key-aligned.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);
        self.format_repo_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        let global = &self.global;
        options.insert(
            "global.output_log_level".into(),
            global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(global.log_file.as_ref()));
        options.insert("global.jobs".into(), global.jobs.to_string());
        options.insert("global.quiet".into(), global.quiet.to_string());
        options.insert("global.root".into(), self.root().display().to_string());
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        let git = &self.git;
        let fmt_num = |n: Option<u32>| n.map_or_else(String::new, |n| n.to_string());

        options.insert("git.remote".into(), git.remote.clone());
        options.insert("git.depth".into(), fmt_num(git.depth));
        options.insert("git.single_branch".into(), git.single_branch.to_string());
        options.insert("git.blobless".into(), git.blobless.to_string());
        options.insert("git.treeless".into(), git.treeless.to_string());
        options.insert("git.clone_jobs".into(), fmt_num(git.clone_jobs));
        options.insert("git.recursive".into(), git.recursive.to_string());
        options.insert("git.checkout".into(), git.checkout.to_string());
        options.insert("git.rebase".into(), git.rebase.to_string());
        options.insert("git.merge".into(), git.merge.to_string());
    }

    fn format_repo_options(&self, options: &mut BTreeMap<String, String>) {
        for repo in &self.repos {
            let key = |field: &str| format!("repos.{}.{field}", repo.name);
            options.insert(key("path"), self.repo_path(repo).display().to_string());
            options.insert(key("remote"), self.repo_remote(repo).to_string());
            if let Some(url) = &repo.url {
                options.insert(key("url"), url.clone());
            }
            if let Some(branch) = &repo.branch {
                options.insert(key("branch"), branch.clone());
            }
        }
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}

fn invalid(section: &str, key: &str, message: &str) -> crate::error::GoodleError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
    .into()
}
