// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Temporary repositories for unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub(crate) fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Run git in `cwd`, panicking on failure; returns trimmed stdout.
pub(crate) fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "protocol.file.allow=always"])
        .args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn configure(path: &Path) {
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    git(path, &["config", "tag.gpgsign", "false"]);
}

/// `git init` on branch `main` with one empty commit.
pub(crate) fn init_repo(path: &Path) {
    fs::create_dir_all(path).expect("failed to create repo dir");
    git(path, &["init", "--quiet", "--initial-branch=main"]);
    configure(path);
    git(path, &["commit", "--allow-empty", "--quiet", "-m", "Initial commit"]);
}

/// Write `name` and commit it.
pub(crate) fn commit_file(path: &Path, name: &str, contents: &str, message: &str) {
    fs::write(path.join(name), contents).expect("failed to write file");
    git(path, &["add", "--", name]);
    git(path, &["commit", "--quiet", "-m", message]);
}

/// A bare `origin` with a `main` and a `feature` branch, and a clone of it.
pub(crate) struct Fixture {
    _temp: TempDir,
    pub(crate) root: PathBuf,
    pub(crate) origin: PathBuf,
    pub(crate) work: PathBuf,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let temp = temp_dir();
        let root = temp.path().to_path_buf();
        let seed = root.join("seed");
        init_repo(&seed);
        commit_file(&seed, "README", "hello\n", "Add readme");
        git(&seed, &["branch", "feature"]);

        let origin = root.join("origin.git");
        git(
            &root,
            &["clone", "--quiet", "--bare", "seed", "origin.git"],
        );
        let work = root.join("work");
        git(&root, &["clone", "--quiet", "origin.git", "work"]);
        configure(&work);

        Self {
            _temp: temp,
            root,
            origin,
            work,
        }
    }

    /// `file://` URL of the bare origin.
    pub(crate) fn origin_url(&self) -> String {
        format!("file://{}", self.origin.display())
    }

    /// A second clone of origin, for pushing commits behind `work`'s back.
    pub(crate) fn other_clone(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        git(&self.root, &["clone", "--quiet", "origin.git", name]);
        configure(&path);
        path
    }
}
