// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the git layer.
//!
//! Tests the public model against real temporary repositories: a bare
//! `origin.git` and a working clone of it.

use goodle::error::{GitError, GoodleError};
use goodle::git::model::{
    GitRef, LocalBranch, LocalTag, Remote, RemoteBranch, RemoteTag, Repo, TrackingBranch,
};
use goodle::git::online::CloneOptions;
use goodle::git::{cmd, parse};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `cwd`, panicking on failure; returns trimmed stdout.
fn run_git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Bare origin seeded with one commit on `main`, plus an empty slot for a clone.
struct Origin {
    _temp: TempDir,
    root: PathBuf,
    bare: PathBuf,
}

impl Origin {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp.path().to_path_buf();
        let seed = root.join("seed");
        fs::create_dir(&seed).unwrap();
        run_git(&seed, &["init", "-q", "--initial-branch=main"]);
        run_git(&seed, &["config", "commit.gpgsign", "false"]);
        fs::write(seed.join("README.md"), "# Test").unwrap();
        run_git(&seed, &["add", "README.md"]);
        run_git(&seed, &["commit", "-q", "-m", "Initial commit"]);
        run_git(&root, &["clone", "-q", "--bare", "seed", "origin.git"]);
        let bare = root.join("origin.git");
        Self {
            _temp: temp,
            root,
            bare,
        }
    }

    fn url(&self) -> String {
        format!("file://{}", self.bare.display())
    }

    /// Clone through the library and configure a committer.
    fn clone(&self, name: &str) -> Repo {
        let repo = Repo::new(self.root.join(name), Some("origin")).unwrap();
        repo.clone_repo(&self.url(), &CloneOptions::default())
            .unwrap();
        run_git(repo.path(), &["config", "user.email", "test@test.com"]);
        run_git(repo.path(), &["config", "user.name", "Test"]);
        run_git(repo.path(), &["config", "tag.gpgsign", "false"]);
        repo
    }

    fn has_branch(&self, name: &str) -> bool {
        !run_git(&self.bare, &["branch", "--list", name]).is_empty()
    }

    fn has_tag(&self, name: &str) -> bool {
        !run_git(&self.bare, &["tag", "--list", name]).is_empty()
    }
}

// =============================================================================
// Ref formatting
// =============================================================================

#[test]
fn git_ref_round_trip() {
    for name in ["main", "feature/x", "release-1.0", "a/b/c"] {
        assert_eq!(parse::truncate_ref(&parse::format_git_branch(name)), name);
        assert_eq!(parse::truncate_ref(&parse::format_git_tag(name)), name);
    }
}

#[test]
fn git_invalid_names_rejected() {
    let origin = Origin::new();
    let repo = origin.clone("work");
    for bad in ["bad..name", "ends.lock", "has space"] {
        let err = LocalBranch::new(repo.path(), bad).unwrap_err();
        assert!(
            matches!(&err, GoodleError::Git(git) if matches!(**git, GitError::InvalidRefName { .. })),
            "{bad}: {err}"
        );
    }
    assert!(LocalTag::new(repo.path(), "v1..0").is_err());
}

// =============================================================================
// Clone and queries
// =============================================================================

#[test]
fn git_clone_and_inspect() {
    let origin = Origin::new();
    let repo = origin.clone("work");

    assert!(repo.exists());
    assert!(repo.is_valid().unwrap());
    assert!(!repo.is_dirty().unwrap());
    assert_eq!(repo.current_branch().unwrap().unwrap().name(), "main");

    let remotes: Vec<_> = repo
        .remotes()
        .unwrap()
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(remotes, ["origin"]);

    let origin_remote = repo.remote("origin").unwrap().unwrap();
    assert_eq!(origin_remote.fetch_url().unwrap(), Some(origin.url()));
    let default = origin_remote.default_branch().unwrap().unwrap();
    assert_eq!(default.name(), "main");

    let head = repo.current_commit().unwrap().unwrap();
    assert_eq!(head.sha().len(), 40);
}

#[test]
fn git_clone_existing_repo_is_skipped() {
    let origin = Origin::new();
    let repo = origin.clone("work");
    repo.clone_repo("file:///nonexistent", &CloneOptions::default())
        .unwrap();
    assert!(repo.exists());
}

#[test]
fn git_command_failure_carries_exit_code() {
    let origin = Origin::new();
    let repo = origin.clone("work");
    let err = cmd::run(&["rev-parse", "--verify", "--quiet", "nope"], repo.path()).unwrap_err();
    assert_eq!(err.command_exit_code(), Some(1));
    assert_eq!(
        cmd::stdout(&["rev-parse", "--verify", "--quiet", "nope"], repo.path()).unwrap(),
        None
    );
}

// =============================================================================
// Branches
// =============================================================================

#[test]
fn git_tracking_branch_lifecycle() {
    let origin = Origin::new();
    let repo = origin.clone("work");
    let remote = Remote::new(repo.path(), "origin");

    let tracking = TrackingBranch::new(
        LocalBranch::new(repo.path(), "topic").unwrap(),
        RemoteBranch::new(&remote, "topic").unwrap(),
        None,
    );
    assert!(!tracking.exists().unwrap());

    tracking.create().unwrap();
    assert!(tracking.exists().unwrap());
    assert!(origin.has_branch("topic"));
    assert!(repo.tracking_branches().unwrap().contains(&tracking));

    // second create is a no-op
    tracking.create().unwrap();

    tracking.delete(true).unwrap();
    assert!(!origin.has_branch("topic"));
    assert!(!tracking.local().exists().unwrap());
}

#[test]
fn git_all_branches_never_double_count() {
    let origin = Origin::new();
    let other = origin.clone("other");
    run_git(other.path(), &["push", "-q", "origin", "main:side"]);

    let repo = origin.clone("work");
    LocalBranch::new(repo.path(), "scratch")
        .unwrap()
        .create()
        .unwrap();

    let all = repo.branches().unwrap();
    let local: Vec<_> = all.local().iter().map(LocalBranch::name).collect();
    let remote: Vec<_> = all.remote().iter().map(RemoteBranch::name).collect();
    let tracking: Vec<_> = all.tracking().iter().map(TrackingBranch::name).collect();
    assert_eq!(local, ["scratch"]);
    assert_eq!(remote, ["side"]);
    assert_eq!(tracking, ["main"]);
}

#[test]
fn git_local_branch_checkout() {
    let origin = Origin::new();
    let repo = origin.clone("work");
    let branch = LocalBranch::new(repo.path(), "dev").unwrap();
    branch.create().unwrap();
    branch.checkout().unwrap();
    assert_eq!(repo.current_branch().unwrap().unwrap(), branch);
    assert_eq!(branch.formatted_ref(), "refs/heads/dev");
}

// =============================================================================
// Tags
// =============================================================================

#[test]
fn git_tags_push_and_delete() {
    let origin = Origin::new();
    let repo = origin.clone("work");
    let remote = Remote::new(repo.path(), "origin");

    let tag = LocalTag::new(repo.path(), "v1.0").unwrap();
    tag.create(None).unwrap();
    assert!(tag.exists().unwrap());
    assert_eq!(tag.sha().unwrap(), repo.current_commit().unwrap().map(|c| c.sha().to_string()));

    let remote_tag = RemoteTag::new(&remote, "v1.0").unwrap();
    assert!(!remote_tag.exists().unwrap());
    remote_tag.create().unwrap();
    assert!(origin.has_tag("v1.0"));
    assert_eq!(remote_tag.sha().unwrap(), tag.sha().unwrap());

    remote_tag.delete().unwrap();
    assert!(!origin.has_tag("v1.0"));
    tag.delete().unwrap();
    assert!(!tag.exists().unwrap());
}
