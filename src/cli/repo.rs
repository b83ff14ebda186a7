// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command arguments.
//!
//! ```text
//! clone  [repos...] [--depth N] [--blobless|--treeless] [--single-branch]
//! fetch  [repos...] [--prune] [--tags]
//! pull   [repos...] [--rebase]
//! update [repos...] [--checkout|--rebase|--merge] [--remote]
//! status [repos...] [--json]
//! branches <repo>   [--json]
//! ```
//!
//! An empty repository list means every configured repository.

use clap::{ArgGroup, Args};

/// Arguments for the `clone` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CloneArgs {
    /// Repositories to clone (default: all).
    #[arg(value_name = "REPO")]
    pub repos: Vec<String>,

    /// Creates shallow clones with this many commits.
    #[arg(long, value_name = "N")]
    pub depth: Option<u32>,

    /// Omits all blobs until they are needed.
    #[arg(long, conflicts_with = "treeless")]
    pub blobless: bool,

    /// Omits all trees and blobs until they are needed.
    #[arg(long)]
    pub treeless: bool,

    /// Clones only the history of the checked out branch.
    #[arg(long = "single-branch")]
    pub single_branch: bool,
}

/// Arguments for the `fetch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    /// Repositories to fetch (default: all).
    #[arg(value_name = "REPO")]
    pub repos: Vec<String>,

    /// Removes remote-tracking refs that no longer exist on the remote.
    #[arg(short = 'p', long)]
    pub prune: bool,

    /// Fetches all tags.
    #[arg(short = 't', long)]
    pub tags: bool,
}

/// Arguments for the `pull` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PullArgs {
    /// Repositories to pull (default: all).
    #[arg(value_name = "REPO")]
    pub repos: Vec<String>,

    /// Rebases instead of merging.
    #[arg(short = 'r', long)]
    pub rebase: bool,
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, Default, Args)]
#[command(group(ArgGroup::new("strategy").args(["checkout", "rebase", "merge"])))]
pub struct UpdateArgs {
    /// Repositories whose submodules to update (default: all).
    #[arg(value_name = "REPO")]
    pub repos: Vec<String>,

    /// Checks out the recorded commit.
    #[arg(long)]
    pub checkout: bool,

    /// Rebases the submodule branch onto the recorded commit.
    #[arg(long)]
    pub rebase: bool,

    /// Merges the recorded commit into the submodule branch.
    #[arg(long)]
    pub merge: bool,

    /// Updates to the tip of each submodule's tracked branch.
    #[arg(long)]
    pub remote: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Repositories to inspect (default: all).
    #[arg(value_name = "REPO")]
    pub repos: Vec<String>,

    /// Prints JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `branches` command.
#[derive(Debug, Clone, Args)]
pub struct BranchesArgs {
    /// Repository to list.
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Prints JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}
