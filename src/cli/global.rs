// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --jobs N          ← global.jobs override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > env > --config > goodle.toml > defaults
//! ```

use anyhow::anyhow;
use clap::Args;
use std::path::PathBuf;

use crate::config::{ConfigLoader, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Number of repositories processed at once.
    #[arg(short = 'j', long = "jobs", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// Shows console output while repositories are processed.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Sets an option, such as 'git.remote=upstream'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of goodle.toml, only uses --config.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    ///
    /// `--set` entries come first so the dedicated flags win.
    ///
    /// # Errors
    ///
    /// Returns an error for a `--set` entry without `=`.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>> {
        let mut overrides = Vec::new();
        for option in &self.options {
            let (key, value) = option
                .split_once('=')
                .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{option}'"))?;
            overrides.push((key.trim().to_string(), value.trim().to_string()));
        }

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level".into(), level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".into(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".into(), path.display().to_string()));
        }

        if let Some(jobs) = self.jobs {
            overrides.push(("global.jobs".into(), jobs.to_string()));
        }

        if self.verbose {
            overrides.push(("global.quiet".into(), "false".into()));
        }

        Ok(overrides)
    }

    /// Loader for every configuration source these options name.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix(ENV_PREFIX);
        for (key, value) in self.to_config_overrides()? {
            loader = loader.set(&key, value)?;
        }
        Ok(loader)
    }
}
