// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blocking process execution.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .capture_output()
//!   .run()
//!       --> std::process::Command
//!           capture | inherit | discard
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! Processes run to completion on the calling thread. Callers that must
//! stay responsive (the task pool) move the call onto a blocking worker.

pub mod builder;
mod runner;
