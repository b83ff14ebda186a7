// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   options            config
//!   clone/fetch/pull   repo   --> TaskPool
//!   update/status      repo   --> TaskPool
//!   branches           branches
//! ```

pub mod branches;
pub mod config;
pub mod repo;

#[cfg(test)]
mod tests;
