// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()   args, cwd, env, stdio
//!   |
//!   v
//! output() / status()
//!   |
//!   v
//! forward captured lines to trace log
//!   |
//!   v
//! validate exit_code (skip if ALLOW_FAILURE)
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::fmt::Write as _;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::{GoodleResult, ProcessError};

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging and errors).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.display_name();
        for arg in self.args_slice() {
            if arg.is_empty() || arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Runs the process to completion on the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::SpawnFailed`] if the process cannot be started,
    /// and [`ProcessError::NonZeroExit`] if it exits outside its success codes
    /// while `ALLOW_FAILURE` is not set.
    pub fn run(&self) -> GoodleResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let spawn_failed = |source| ProcessError::SpawnFailed {
            command: cmd_line.clone(),
            source,
        };

        let output = if self.captures() {
            let raw = command.output().map_err(spawn_failed)?;
            let stdout = self.collect(self.stdout_config(), &raw.stdout, &name, "stdout");
            let stderr = self.collect(self.stderr_config(), &raw.stderr, &name, "stderr");
            ProcessOutput::new(raw.status.code().unwrap_or(-1), stdout, stderr)
        } else {
            let status = command.status().map_err(spawn_failed)?;
            ProcessOutput::new(status.code().unwrap_or(-1), String::new(), String::new())
        };

        if !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            && !self.success_code_set().contains(&output.exit_code())
        {
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn captures(&self) -> bool {
        let wanted = StreamFlags::KEEP_IN_STRING | StreamFlags::FORWARD_TO_LOG;
        self.stdout_config().intersects(wanted) || self.stderr_config().intersects(wanted)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }
        for (key, value) in self.env_vars() {
            command.env(key, value);
        }
        command
            .stdin(Stdio::null())
            .stdout(stdio_for(self.stdout_config()))
            .stderr(stdio_for(self.stderr_config()));
        command
    }

    #[allow(clippy::unused_self)]
    fn collect(&self, flags: StreamFlags, bytes: &[u8], name: &str, stream: &str) -> String {
        let text = String::from_utf8_lossy(bytes);
        if flags.contains(StreamFlags::FORWARD_TO_LOG) {
            for line in text.lines().filter(|l| !l.trim().is_empty()) {
                trace!(process = %name, stream, "{line}");
            }
        }
        if flags.contains(StreamFlags::KEEP_IN_STRING) {
            text.into_owned()
        } else {
            String::new()
        }
    }
}

fn stdio_for(flags: StreamFlags) -> Stdio {
    if flags.contains(StreamFlags::INHERIT) {
        Stdio::inherit()
    } else if flags.intersects(StreamFlags::KEEP_IN_STRING | StreamFlags::FORWARD_TO_LOG) {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}
