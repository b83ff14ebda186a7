// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Builds sorted, deduplicated entity collections from git queries.
//!
//! ```text
//!  offline / online listing
//!          |
//!          v
//!   entities (unchecked constructors: names come from git)
//!          |
//!          v
//!   sort by name (tracking: "name/remote/branch") + dedup
//! ```
//!
//! `has_*` helpers list the whole collection and search it; collections
//! are repository-sized.

use std::path::{Path, PathBuf};

use super::submodule::SubmoduleRecord;
use super::{LocalBranch, LocalTag, Remote, RemoteBranch, RemoteTag, Submodule, TrackingBranch};
use crate::error::GoodleResult;
use crate::git::{offline, online};

fn sorted_by_key<T: PartialEq, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items.dedup();
    items
}

// --- Remotes ---

/// # Errors
///
/// Returns an error if `git remote -v` fails to parse.
pub fn remotes(path: &Path) -> GoodleResult<Vec<Remote>> {
    let remotes = offline::remotes(path)?
        .into_keys()
        .map(|name| Remote::new(path, name))
        .collect();
    Ok(sorted_by_key(remotes, |r: &Remote| r.name().to_string()))
}

/// # Errors
///
/// See [`remotes`].
pub fn remote(path: &Path, name: &str) -> GoodleResult<Option<Remote>> {
    Ok(remotes(path)?.into_iter().find(|r| r.name() == name))
}

/// # Errors
///
/// See [`remotes`].
pub fn has_remote(path: &Path, name: &str) -> GoodleResult<bool> {
    Ok(remote(path, name)?.is_some())
}

// --- Branches ---

/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn local_branches(path: &Path) -> GoodleResult<Vec<LocalBranch>> {
    let branches = offline::local_branches(path)?
        .into_iter()
        .map(|name| LocalBranch::from_git(path, name))
        .collect();
    Ok(sorted_by_key(branches, |b: &LocalBranch| b.name().to_string()))
}

/// # Errors
///
/// See [`local_branches`].
pub fn has_local_branch(path: &Path, name: &str) -> GoodleResult<bool> {
    Ok(local_branches(path)?.iter().any(|b| b.name() == name))
}

/// Remote-tracking branches of `remote`, the default one flagged.
///
/// # Errors
///
/// Returns an error if the listing fails to parse.
pub fn remote_branches(remote: &Remote) -> GoodleResult<Vec<RemoteBranch>> {
    let listing = offline::remote_branches(remote.path(), remote.name())?;
    let mut branches: Vec<RemoteBranch> = listing
        .branches
        .into_iter()
        .map(|name| RemoteBranch::from_git(remote.clone(), name, false))
        .collect();
    if let Some(default) = &listing.default_branch {
        for branch in branches.iter_mut().filter(|b| b.name() == default) {
            branch.set_default(true);
        }
    }
    Ok(sorted_by_key(branches, |b: &RemoteBranch| b.name().to_string()))
}

/// # Errors
///
/// See [`remote_branches`].
pub fn has_remote_branch(remote: &Remote, name: &str) -> GoodleResult<bool> {
    Ok(remote_branches(remote)?.iter().any(|b| b.name() == name))
}

fn to_remote_branch(path: &Path, target: (Option<String>, String)) -> RemoteBranch {
    let (remote, name) = target;
    // A local upstream (`git branch --track a b`) is modelled as the `.` remote
    let remote = Remote::new(path, remote.unwrap_or_else(|| ".".to_string()));
    RemoteBranch::from_git(remote, name, false)
}

/// Local branches with an upstream, ordered by `name/remote/branch`.
///
/// # Errors
///
/// Returns an error if an upstream ref fails to parse.
pub fn tracking_branches(path: &Path) -> GoodleResult<Vec<TrackingBranch>> {
    let mut tracking = Vec::new();
    for local in local_branches(path)? {
        let Some(upstream) = offline::upstream_branch(path, local.name())? else {
            continue;
        };
        let push = offline::push_branch(path, local.name())?;
        let upstream = to_remote_branch(path, upstream);
        let push = push.map(|target| to_remote_branch(path, target));
        tracking.push(TrackingBranch::new(local, upstream, push));
    }
    Ok(sorted_by_key(tracking, TrackingBranch::sort_key))
}

/// # Errors
///
/// See [`tracking_branches`].
pub fn has_tracking_branch(path: &Path, name: &str) -> GoodleResult<bool> {
    Ok(tracking_branches(path)?.iter().any(|t| t.name() == name))
}

/// Local, remote and tracking branches of one repository.
///
/// A branch on either side of a tracking relationship is only listed in
/// `tracking`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllBranches {
    local: Vec<LocalBranch>,
    remote: Vec<RemoteBranch>,
    tracking: Vec<TrackingBranch>,
}

impl AllBranches {
    #[must_use]
    pub fn new(
        local: Vec<LocalBranch>,
        remote: Vec<RemoteBranch>,
        tracking: Vec<TrackingBranch>,
    ) -> Self {
        let local = local
            .into_iter()
            .filter(|b| !tracking.iter().any(|t| t.local() == b))
            .collect();
        let remote = remote
            .into_iter()
            .filter(|b| {
                !tracking
                    .iter()
                    .any(|t| t.upstream_branch() == b || t.push_branch() == b)
            })
            .collect();
        Self {
            local,
            remote,
            tracking,
        }
    }

    /// Local branches without an upstream.
    #[must_use]
    pub fn local(&self) -> &[LocalBranch] {
        &self.local
    }

    /// Remote branches no local branch tracks.
    #[must_use]
    pub fn remote(&self) -> &[RemoteBranch] {
        &self.remote
    }

    #[must_use]
    pub fn tracking(&self) -> &[TrackingBranch] {
        &self.tracking
    }
}

/// # Errors
///
/// Returns an error if any listing fails.
pub fn all_branches(path: &Path) -> GoodleResult<AllBranches> {
    let mut remote = Vec::new();
    for r in remotes(path)? {
        remote.extend(remote_branches(&r)?);
    }
    Ok(AllBranches::new(
        local_branches(path)?,
        remote,
        tracking_branches(path)?,
    ))
}

// --- Tags ---

/// # Errors
///
/// Returns an error if `show-ref --tags` fails to parse.
pub fn local_tags(path: &Path) -> GoodleResult<Vec<LocalTag>> {
    let tags = offline::local_tags_info(path)?
        .into_keys()
        .map(|name| LocalTag::from_git(path, name))
        .collect();
    Ok(sorted_by_key(tags, |t: &LocalTag| t.name().to_string()))
}

/// # Errors
///
/// See [`local_tags`].
pub fn has_local_tag(path: &Path, name: &str) -> GoodleResult<bool> {
    Ok(local_tags(path)?.iter().any(|t| t.name() == name))
}

/// Tags on the remote (network).
///
/// # Errors
///
/// Returns an error if `ls-remote --tags` fails to parse.
pub fn remote_tags(remote: &Remote) -> GoodleResult<Vec<RemoteTag>> {
    let tags = online::remote_tags_info(remote.path(), remote.name())?
        .into_keys()
        .map(|name| RemoteTag::from_git(remote.clone(), name))
        .collect();
    Ok(sorted_by_key(tags, |t: &RemoteTag| t.name().to_string()))
}

/// # Errors
///
/// See [`remote_tags`].
pub fn has_remote_tag(remote: &Remote, name: &str) -> GoodleResult<bool> {
    Ok(remote_tags(remote)?.iter().any(|t| t.name() == name))
}

// --- Submodules ---

/// Submodules from `.gitmodules` overlaid with the local config.
///
/// # Errors
///
/// Returns an error if the submodule config cannot be read.
pub fn submodules(path: &Path) -> GoodleResult<Vec<Submodule>> {
    let mut submodules = Vec::new();
    for (name, values) in offline::merged_submodule_info(path)? {
        let submodule_path = PathBuf::from(values.get("path").unwrap_or(&name));
        let commit = offline::submodule_commit(path, &submodule_path)?;
        let record = SubmoduleRecord {
            active: values.get("active").is_some_and(|v| v == "true"),
            url: values.get("url").cloned(),
            branch: values.get("branch").cloned(),
            commit,
            submodule_path,
            name,
        };
        submodules.push(Submodule::from_record(path, record));
    }
    Ok(sorted_by_key(submodules, |s: &Submodule| {
        s.submodule_path().to_path_buf()
    }))
}

/// # Errors
///
/// See [`submodules`].
pub fn has_submodule(path: &Path, submodule_path: &Path) -> GoodleResult<bool> {
    Ok(submodules(path)?
        .iter()
        .any(|s| s.submodule_path() == submodule_path))
}
