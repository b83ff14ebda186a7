// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command execution.
//!
//! ```text
//!  run()      checked, captured   --> CommandFailed on exit != 0
//!  output()   unchecked, captured --> exit code preserved
//!  stdout()   unchecked, captured --> None on exit != 0
//!  display()  checked, inherited  --> output goes to the terminal
//!                  |
//!                  v
//!        ProcessBuilder("git")
//!        GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never
//! ```

use std::path::Path;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{GitError, GoodleResult};

/// Build a git process with the non-interactive environment.
///
/// `git` is resolved through PATH once and cached; if the lookup fails the
/// bare name is used so the spawn error carries the real cause.
fn git(args: &[&str], cwd: Option<&Path>) -> ProcessBuilder {
    let builder = ProcessBuilder::which("git")
        .unwrap_or_else(|_| ProcessBuilder::new("git"))
        .name("git")
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GCM_INTERACTIVE", "never")
        .flag(ProcessFlags::ALLOW_FAILURE);
    match cwd {
        Some(dir) => builder.cwd(dir),
        None => builder,
    }
}

fn command_failed(builder: &ProcessBuilder, output: &ProcessOutput) -> GitError {
    GitError::CommandFailed {
        command: builder.command_line(),
        code: output.exit_code(),
        output: output.combined(),
    }
}

/// Run a git command and fail on a non-zero exit code.
///
/// # Errors
///
/// Returns [`GitError::CommandFailed`] carrying the exit code and the
/// captured output, or a process error if git cannot be spawned.
pub fn run(args: &[&str], cwd: &Path) -> GoodleResult<ProcessOutput> {
    run_in(args, Some(cwd))
}

/// Like [`run`], with an optional working directory.
///
/// # Errors
///
/// See [`run`].
pub fn run_in(args: &[&str], cwd: Option<&Path>) -> GoodleResult<ProcessOutput> {
    let builder = git(args, cwd).capture_output();
    let output = builder.run()?;
    if output.success() {
        Ok(output)
    } else {
        Err(command_failed(&builder, &output).into())
    }
}

/// Run a git command and return its output whatever the exit code.
///
/// # Errors
///
/// Returns a process error only if git cannot be spawned.
pub fn output(args: &[&str], cwd: &Path) -> GoodleResult<ProcessOutput> {
    git(args, Some(cwd)).capture_output().run()
}

/// Like [`output`], with an optional working directory.
///
/// # Errors
///
/// See [`output`].
pub fn output_in(args: &[&str], cwd: Option<&Path>) -> GoodleResult<ProcessOutput> {
    git(args, cwd).capture_output().run()
}

/// Run a git command and return its trimmed stdout.
///
/// A failing command yields `Ok(None)`: for read-only queries a missing
/// object is an empty result, not an error.
///
/// # Errors
///
/// Returns a process error only if git cannot be spawned.
pub fn stdout(args: &[&str], cwd: &Path) -> GoodleResult<Option<String>> {
    stdout_in(args, Some(cwd))
}

/// Like [`stdout`], with an optional working directory.
///
/// # Errors
///
/// See [`stdout`].
pub fn stdout_in(args: &[&str], cwd: Option<&Path>) -> GoodleResult<Option<String>> {
    let output = output_in(args, cwd)?;
    Ok(output
        .success()
        .then(|| output.stdout().trim().to_string()))
}

/// Run a git command with stdout/stderr inherited from this process.
///
/// # Errors
///
/// Returns [`GitError::CommandFailed`] on a non-zero exit (output was
/// already shown, so it is not repeated in the error).
pub fn display(args: &[&str], cwd: &Path) -> GoodleResult<()> {
    let builder = git(args, Some(cwd)).inherit_stdio();
    let output = builder.run()?;
    if output.success() {
        Ok(())
    } else {
        Err(command_failed(&builder, &output).into())
    }
}
