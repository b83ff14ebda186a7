// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network git operations.
//!
//! ```text
//!  clone  fetch  pull  push  ls-remote  submodule update
//!    |      |     |     |        |             |
//!    +------+-----+--+--+--------+-------------+
//!                    v
//!          *Options (bon builders)
//!                    v
//!            cmd::run / stdout
//! ```
//!
//! Mutually exclusive switches (clone filters, submodule update
//! strategies) are enums; `from_flags` rejects conflicting booleans coming
//! from configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cmd;
use super::parse;
use crate::error::{GitError, GoodleResult};

/// Partial clone filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialCloneFilter {
    /// `--filter=blob:none`: omit file contents
    Blobless,
    /// `--filter=tree:0`: omit trees and file contents
    Treeless,
}

impl PartialCloneFilter {
    /// Build a filter from independent `blobless`/`treeless` switches.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::ConflictingOptions`] if both are set.
    pub fn from_flags(blobless: bool, treeless: bool) -> GoodleResult<Option<Self>> {
        match (blobless, treeless) {
            (true, true) => Err(GitError::ConflictingOptions {
                message: "blobless and treeless clones are mutually exclusive".to_string(),
            }
            .into()),
            (true, false) => Ok(Some(Self::Blobless)),
            (false, true) => Ok(Some(Self::Treeless)),
            (false, false) => Ok(None),
        }
    }

    /// The `git clone` argument for this filter.
    #[must_use]
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::Blobless => "--filter=blob:none",
            Self::Treeless => "--filter=tree:0",
        }
    }
}

/// How `git submodule update` moves a submodule to its new commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmoduleUpdateStrategy {
    Checkout,
    Rebase,
    Merge,
}

impl SubmoduleUpdateStrategy {
    /// Build a strategy from independent switches; at most one may be set.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::ConflictingOptions`] if more than one is set.
    pub fn from_flags(checkout: bool, rebase: bool, merge: bool) -> GoodleResult<Option<Self>> {
        match (checkout, rebase, merge) {
            (false, false, false) => Ok(None),
            (true, false, false) => Ok(Some(Self::Checkout)),
            (false, true, false) => Ok(Some(Self::Rebase)),
            (false, false, true) => Ok(Some(Self::Merge)),
            _ => Err(GitError::ConflictingOptions {
                message: "only one of checkout, rebase and merge may be set".to_string(),
            }
            .into()),
        }
    }

    /// The `git submodule update` argument for this strategy.
    #[must_use]
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::Checkout => "--checkout",
            Self::Rebase => "--rebase",
            Self::Merge => "--merge",
        }
    }
}

/// Options for [`clone`].
#[derive(Debug, Clone, Default, Builder)]
pub struct CloneOptions {
    /// Branch or tag to check out instead of the remote's HEAD
    #[builder(into)]
    pub branch: Option<String>,
    #[builder(default)]
    pub single_branch: bool,
    /// Parallel submodule fetches
    pub jobs: Option<u32>,
    /// Shallow clone depth
    pub depth: Option<u32>,
    pub filter: Option<PartialCloneFilter>,
}

/// Clone `url` into `path`.
///
/// An existing empty directory is replaced; a non-empty one is refused.
///
/// # Errors
///
/// Returns [`GitError::CloneTargetNotEmpty`] for a populated target, or the
/// git failure.
pub fn clone(path: &Path, url: &str, options: &CloneOptions) -> GoodleResult<()> {
    if path.is_dir() {
        if fs::read_dir(path)?.next().is_some() {
            return Err(GitError::CloneTargetNotEmpty {
                path: path.display().to_string(),
            }
            .into());
        }
        fs::remove_dir(path)?;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let jobs = options.jobs.map(|j| j.to_string());
    let depth = options.depth.map(|d| d.to_string());
    let target = path.to_string_lossy();

    let mut args = vec!["clone"];
    if let Some(branch) = &options.branch {
        args.extend(["--branch", branch.as_str()]);
    }
    if options.single_branch {
        args.push("--single-branch");
    }
    if let Some(jobs) = &jobs {
        args.extend(["--jobs", jobs.as_str()]);
    }
    if let Some(depth) = &depth {
        args.extend(["--depth", depth.as_str()]);
    }
    if let Some(filter) = options.filter {
        args.push(filter.as_arg());
    }
    args.extend([url, &*target]);

    cmd::run_in(&args, None).map(drop)
}

/// Options for [`fetch`].
#[derive(Debug, Clone, Default, Builder)]
pub struct FetchOptions {
    /// Remote to fetch; git's default when unset
    #[builder(into)]
    pub remote: Option<String>,
    /// Ref to fetch from `remote`
    #[builder(into)]
    pub reference: Option<String>,
    #[builder(default)]
    pub prune: bool,
    #[builder(default)]
    pub tags: bool,
    pub depth: Option<u32>,
    #[builder(default)]
    pub unshallow: bool,
}

/// Fetch from a remote.
///
/// # Errors
///
/// Returns [`GitError::MissingOption`] for a `reference` without a
/// `remote`, or an error if the git command fails.
pub fn fetch(path: &Path, options: &FetchOptions) -> GoodleResult<()> {
    if options.remote.is_none()
        && let Some(reference) = &options.reference
    {
        return Err(GitError::MissingOption {
            option: "remote".to_string(),
            needed_by: format!("fetching '{reference}'"),
        }
        .into());
    }
    let depth = options.depth.map(|d| d.to_string());
    let mut args = vec!["fetch"];
    if options.prune {
        args.push("--prune");
    }
    if options.tags {
        args.push("--tags");
    }
    if let Some(depth) = &depth {
        args.extend(["--depth", depth.as_str()]);
    }
    if options.unshallow {
        args.push("--unshallow");
    }
    if let Some(remote) = &options.remote {
        args.push(remote);
        if let Some(reference) = &options.reference {
            args.push(reference);
        }
    }
    cmd::run(&args, path).map(drop)
}

/// Pull `branch` from `remote`, rebasing local commits if asked.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn pull(path: &Path, remote: Option<&str>, branch: Option<&str>, rebase: bool) -> GoodleResult<()> {
    let mut args = vec!["pull"];
    if rebase {
        args.push("--rebase");
    }
    if let Some(remote) = remote {
        args.push(remote);
        if let Some(branch) = branch {
            args.push(branch);
        }
    }
    cmd::run(&args, path).map(drop)
}

/// Download the LFS objects of the checked out revision.
///
/// # Errors
///
/// Returns an error if `git lfs pull` fails, including when Git LFS is not
/// installed.
pub fn pull_lfs(path: &Path) -> GoodleResult<()> {
    cmd::run(&["lfs", "pull"], path).map(drop)
}

/// Options for [`push`].
#[derive(Debug, Clone, Builder)]
pub struct PushOptions {
    /// Local branch to push; the current branch via plain `git push` if unset
    #[builder(into)]
    pub local_branch: Option<String>,
    /// Branch name on the remote; same as the local name if unset
    #[builder(into)]
    pub remote_branch: Option<String>,
    #[builder(into, default = "origin".to_string())]
    pub remote: String,
    #[builder(default)]
    pub force: bool,
}

/// Push a branch.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn push(path: &Path, options: &PushOptions) -> GoodleResult<()> {
    let Some(local) = &options.local_branch else {
        return if options.force {
            cmd::run(&["push", "--force"], path).map(drop)
        } else {
            cmd::run(&["push"], path).map(drop)
        };
    };
    let remote_branch = options.remote_branch.as_deref().unwrap_or(local);
    let refspec = format!(
        "{}:{}",
        parse::format_git_branch(local),
        parse::format_git_branch(remote_branch)
    );
    push_ref(path, &options.remote, &refspec, options.force)
}

/// Push an explicit refspec (`src:dst`, or `:dst` to delete).
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn push_ref(path: &Path, remote: &str, refspec: &str, force: bool) -> GoodleResult<()> {
    let mut args = vec!["push"];
    if force {
        args.push("--force");
    }
    args.extend([remote, refspec]);
    cmd::run(&args, path).map(drop)
}

/// Push `branch` to `remote` as `upstream_branch` and record the link.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn create_upstream_branch(
    path: &Path,
    branch: &str,
    upstream_branch: &str,
    remote: &str,
) -> GoodleResult<()> {
    let refspec = format!(
        "{}:{}",
        parse::format_git_branch(branch),
        parse::format_git_branch(upstream_branch)
    );
    cmd::run(&["push", "-u", remote, &refspec], path).map(drop)
}

/// Delete a branch on `remote`.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn delete_remote_branch(path: &Path, branch: &str, remote: &str) -> GoodleResult<()> {
    let refspec = format!(":{}", parse::format_git_branch(branch));
    push_ref(path, remote, &refspec, false)
}

/// Push a local tag to `remote`.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn push_tag(path: &Path, tag: &str, remote: &str, force: bool) -> GoodleResult<()> {
    let formatted = parse::format_git_tag(tag);
    push_ref(path, remote, &format!("{formatted}:{formatted}"), force)
}

/// Delete a tag on `remote`.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn delete_remote_tag(path: &Path, tag: &str, remote: &str) -> GoodleResult<()> {
    let refspec = format!(":{}", parse::format_git_tag(tag));
    push_ref(path, remote, &refspec, false)
}

/// Branches on `remote` mapped to their shas.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or the listing is malformed.
pub fn remote_branches_info(
    path: &Path,
    remote: &str,
) -> GoodleResult<BTreeMap<String, String>> {
    match cmd::stdout(&["ls-remote", "--heads", remote], path)? {
        Some(output) => parse::shas(&output, parse::HEADS_PREFIX),
        None => Ok(BTreeMap::new()),
    }
}

/// Tags on `remote` mapped to their shas.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or the listing is malformed.
pub fn remote_tags_info(
    path: &Path,
    remote: &str,
) -> GoodleResult<BTreeMap<String, String>> {
    match cmd::stdout(&["ls-remote", "--tags", remote], path)? {
        Some(output) => parse::shas(&output, parse::TAGS_PREFIX),
        None => Ok(BTreeMap::new()),
    }
}

/// True if `branch` exists on a remote name or URL.
///
/// `cwd` is needed to resolve remote names; URLs work without it.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn branch_exists_at_remote(
    cwd: Option<&Path>,
    remote_or_url: &str,
    branch: &str,
) -> GoodleResult<bool> {
    let reference = parse::format_git_branch(branch);
    let output = cmd::stdout_in(&["ls-remote", "--heads", remote_or_url, &reference], cwd)?;
    Ok(output.is_some_and(|out| !out.is_empty()))
}

/// True if `tag` exists on a remote name or URL.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn tag_exists_at_remote(
    cwd: Option<&Path>,
    remote_or_url: &str,
    tag: &str,
) -> GoodleResult<bool> {
    let reference = parse::format_git_tag(tag);
    let output = cmd::stdout_in(&["ls-remote", "--tags", remote_or_url, &reference], cwd)?;
    Ok(output.is_some_and(|out| !out.is_empty()))
}

/// Branch that `HEAD` points at on a remote name or URL.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn default_branch(cwd: Option<&Path>, remote_or_url: &str) -> GoodleResult<Option<String>> {
    debug!(remote = remote_or_url, "querying default branch");
    Ok(cmd::stdout_in(&["ls-remote", "--symref", remote_or_url, "HEAD"], cwd)?
        .and_then(|out| parse::symref_head(&out)))
}

/// Options for [`submodule_update`].
#[derive(Debug, Clone, Default, Builder)]
pub struct SubmoduleUpdateOptions {
    #[builder(default)]
    pub init: bool,
    pub depth: Option<u32>,
    #[builder(default)]
    pub single_branch: bool,
    pub jobs: Option<u32>,
    #[builder(default)]
    pub recursive: bool,
    /// Update to the tracked remote branch instead of the recorded sha
    #[builder(default)]
    pub remote: bool,
    #[builder(default)]
    pub no_fetch: bool,
    pub strategy: Option<SubmoduleUpdateStrategy>,
    /// Limit the update to these submodule paths
    #[builder(default)]
    pub paths: Vec<PathBuf>,
}

/// Update submodules to the commits recorded in the superproject.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_update(path: &Path, options: &SubmoduleUpdateOptions) -> GoodleResult<()> {
    let depth = options.depth.map(|d| d.to_string());
    let jobs = options.jobs.map(|j| j.to_string());
    let paths: Vec<String> = options
        .paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    let mut args = vec!["submodule", "update"];
    if options.init {
        args.push("--init");
    }
    if let Some(depth) = &depth {
        args.extend(["--depth", depth.as_str()]);
    }
    if options.single_branch {
        args.push("--single-branch");
    }
    if let Some(jobs) = &jobs {
        args.extend(["--jobs", jobs.as_str()]);
    }
    if options.recursive {
        args.push("--recursive");
    }
    if options.remote {
        args.push("--remote");
    }
    if options.no_fetch {
        args.push("--no-fetch");
    }
    if let Some(strategy) = options.strategy {
        args.push(strategy.as_arg());
    }
    if !paths.is_empty() {
        args.push("--");
        args.extend(paths.iter().map(String::as_str));
    }
    cmd::run(&args, path).map(drop)
}
