// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for goodle using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! goodle [global options] <command>
//! version
//! options
//! clone    [repos...]
//! fetch    [repos...]
//! pull     [repos...]
//! update   [repos...]
//! status   [repos...]
//! branches <repo>
//! ```

pub mod global;
pub mod repo;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::repo::{BranchesArgs, CloneArgs, FetchArgs, PullArgs, StatusArgs, UpdateArgs};
use clap::{Parser, Subcommand};

/// Git Repository Toolkit
///
/// Clones, fetches and inspects a configured set of git repositories.
#[derive(Debug, Parser)]
#[command(
    name = "goodle",
    author,
    version,
    about = "Git Repository Toolkit",
    long_about = "goodle Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs git operations over a configured set of repositories,\n\
                  several at a time. See `goodle <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  goodle reads `goodle.toml` from the current directory if it\n\
                  exists, then every file given with --config, in order. Later\n\
                  files override earlier ones. GOODLE_<SECTION>__<KEY> environment\n\
                  variables and --set override all files. Use --no-default-config\n\
                  to skip `goodle.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Clones repositories that are not cloned yet.
    Clone(CloneArgs),

    /// Fetches repositories.
    Fetch(FetchArgs),

    /// Pulls the current branch of each repository.
    Pull(PullArgs),

    /// Updates submodules.
    Update(UpdateArgs),

    /// Shows branch, commit and working tree state.
    Status(StatusArgs),

    /// Lists the local, remote and tracking branches of one repository.
    Branches(BranchesArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
