// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!                 model (Repo, Remote, branches, tags, submodules)
//!                   |                       |
//!                   v                       v
//!   offline.rs (local state)       online.rs (talks to remotes)
//!                   \                       /
//!                    v                     v
//!               cmd.rs (git process) --> parse.rs (text -> data)
//!                          |
//!                          v
//!               core::process::ProcessBuilder
//! ```
//!
//! Everything goes through the installed `git` binary; nothing here
//! reads git's object store directly.

pub mod cmd;
pub mod model;
pub mod offline;
pub mod online;
pub mod parse;

#[cfg(test)]
pub(crate) mod testing;
