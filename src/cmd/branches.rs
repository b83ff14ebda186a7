// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `branches` command: the local/remote/tracking split of one repository.

use serde::Serialize;

use crate::cli::repo::BranchesArgs;
use crate::config::Config;
use crate::error::{GitError, GoodleError, Result};
use crate::git::model::{AllBranches, RemoteBranch, Repo};

/// Remote-tracking branch not followed by any local branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteEntry {
    pub remote: String,
    pub name: String,
    pub default: bool,
}

/// Local branch with its upstream and push targets, as `remote/branch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingEntry {
    pub local: String,
    pub upstream: String,
    pub push: String,
}

/// Serializable view of [`AllBranches`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchListing {
    pub local: Vec<String>,
    pub remote: Vec<RemoteEntry>,
    pub tracking: Vec<TrackingEntry>,
}

fn remote_ref(branch: &RemoteBranch) -> String {
    format!("{}/{}", branch.remote().name(), branch.name())
}

impl From<&AllBranches> for BranchListing {
    fn from(all: &AllBranches) -> Self {
        Self {
            local: all.local().iter().map(|b| b.name().to_string()).collect(),
            remote: all
                .remote()
                .iter()
                .map(|b| RemoteEntry {
                    remote: b.remote().name().to_string(),
                    name: b.name().to_string(),
                    default: b.is_default(),
                })
                .collect(),
            tracking: all
                .tracking()
                .iter()
                .map(|b| TrackingEntry {
                    local: b.name().to_string(),
                    upstream: remote_ref(b.upstream_branch()),
                    push: remote_ref(b.push_branch()),
                })
                .collect(),
        }
    }
}

/// Branch listing of the configured repository `name`.
///
/// # Errors
///
/// Returns an error if `name` is not configured, the repository is not
/// cloned, or a branch query fails.
pub fn branch_listing(config: &Config, name: &str) -> Result<BranchListing> {
    let repo_config = config
        .select(&[name.to_string()])?
        .into_iter()
        .next()
        .ok_or_else(|| GoodleError::other(format!("no such repository '{name}'")))?;
    let path = config.repo_path(repo_config);
    let repo = Repo::new(&path, Some(config.repo_remote(repo_config)))?;
    if !repo.exists() {
        return Err(GoodleError::from(GitError::RepoNotFound {
            path: path.display().to_string(),
        })
        .into());
    }
    Ok(BranchListing::from(&repo.branches()?))
}

/// Human-readable listing, one branch per line.
#[must_use]
pub fn format_branches(listing: &BranchListing) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &listing.tracking {
        let push = if entry.push == entry.upstream {
            String::new()
        } else {
            format!(" (push {})", entry.push)
        };
        lines.push(format!("  {} -> {}{push}", entry.local, entry.upstream));
    }
    for name in &listing.local {
        lines.push(format!("  {name}"));
    }
    for entry in &listing.remote {
        let marker = if entry.default { " (default)" } else { "" };
        lines.push(format!("  {}/{}{marker}", entry.remote, entry.name));
    }
    lines
}

/// Handler for `branches`.
///
/// # Errors
///
/// See [`branch_listing`].
pub fn run_branches_command(args: &BranchesArgs, config: &Config) -> Result<()> {
    let listing = branch_listing(config, &args.repo)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for line in format_branches(&listing) {
            println!("{line}");
        }
    }
    Ok(())
}
