// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             GoodleError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+----------+
//!   |      |      |       |      |      |          |
//!   v      v      v       v      v      v          v
//!  Git   Parse  Process  Cfg   Task    Io       Other
//!  Box    Box    Box     Box    Box    Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     CommandFailed, InvalidRefName, CloneTargetNotEmpty
//!   Parse   TrackingBranch, RemoteBranchLine, RemoteKind
//!   Process SpawnFailed, NonZeroExit
//!   Config  ParseError, InvalidValue
//!   Task    ExecutionFailed, Cancelled, Panicked
//!
//! All variants boxed => GoodleError fits in 24 bytes.
//! ```
//!
//! Absence is never an error here: a missing branch, tag or remote is
//! reported as `false`, an empty collection or `None` by the callers.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GoodleError`].
pub type GoodleResult<T> = std::result::Result<T, GoodleError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum GoodleError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Git produced output of an unexpected shape.
    #[error("parse error: {0}")]
    Parse(#[from] Box<ParseError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Task execution error.
    #[error("task error: {0}")]
    Task(#[from] Box<TaskError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl GoodleError {
    /// Create a [`GoodleError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }

    /// Exit code of a failed git command, if this error is one.
    #[must_use]
    pub fn command_exit_code(&self) -> Option<i32> {
        match self {
            Self::Git(err) => match err.as_ref() {
                GitError::CommandFailed { code, .. } => Some(*code),
                _ => None,
            },
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GoodleError {
                fn from(err: $error) -> Self {
                    GoodleError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ParseError => Parse,
    ProcessError => Process,
    ConfigError => Config,
    TaskError => Task,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// A checked git command exited with a non-zero code.
    #[error("git command failed ({code}): {command}\n{output}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },

    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Ref name rejected by `git check-ref-format`.
    #[error("invalid ref name: {name}")]
    InvalidRefName { name: String },

    /// Clone target exists and is not empty.
    #[error("clone target is not empty: {path}")]
    CloneTargetNotEmpty { path: String },

    /// Mutually exclusive options were requested together.
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// An option was given without the option it depends on.
    #[error("{needed_by} requires a {option}")]
    MissingOption { option: String, needed_by: String },

    /// Operation needs a branch but HEAD is detached.
    #[error("HEAD is detached in {path}")]
    DetachedHead { path: String },

    /// Operation needs `branch` checked out, but another one is.
    #[error("branch '{branch}' is not checked out in {path}")]
    NotOnBranch { branch: String, path: String },

    /// Remote not found.
    #[error("remote not found: {remote}")]
    RemoteNotFound { remote: String },
}

// --- Parse Errors ---

/// Unexpected git output.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Line of a `<sha> <ref>` listing without both fields.
    #[error("malformed sha line: '{line}'")]
    ShaLine { line: String },

    /// Symbolic ref that is neither a local nor a remote branch.
    #[error("unrecognized tracking branch ref: '{output}'")]
    TrackingBranch { output: String },

    /// `git branch -r` line with an unexpected token count.
    #[error("malformed remote branch line: '{line}'")]
    RemoteBranchLine { line: String },

    /// `git remote -v` line with an unexpected token count.
    #[error("malformed remote line: '{line}'")]
    RemoteLine { line: String },

    /// `git remote -v` line whose indicator is not `(fetch)` or `(push)`.
    #[error("unknown remote url kind '{kind}' in line '{line}'")]
    RemoteKind { line: String, kind: String },

    /// `git config --get-regexp submodule` line of the wrong shape.
    #[error("malformed submodule config line: '{line}'")]
    SubmoduleLine { line: String },

    /// Numeric output that did not parse.
    #[error("malformed count output: '{output}'")]
    Count { output: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a code outside its success codes.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Task Errors ---

/// Task execution errors.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task body returned an error.
    #[error("task '{name}' failed: {message}")]
    ExecutionFailed { name: String, message: String },

    /// Task was skipped because its pool was cancelled.
    #[error("task '{0}' was cancelled")]
    Cancelled(String),

    /// Task body panicked on its worker thread.
    #[error("task '{0}' panicked")]
    Panicked(String),
}

#[cfg(test)]
mod tests;
