// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GitError, GoodleError};
use crate::git::model::{
    AllBranches, Commit, GitRef, LocalBranch, LocalTag, Ref, Remote, RemoteBranch, Repo,
    TrackingBranch, factory,
};
use crate::git::testing::{Fixture, commit_file, git, init_repo, temp_dir};
use crate::git::{offline, online};

fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
    items.iter().map(name).collect()
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_local_branch_create_is_idempotent() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);

    let branch = LocalBranch::new(repo, "topic").expect("valid name");
    assert!(!branch.exists().expect("query"));
    branch.create().expect("create");
    let sha = branch.sha().expect("query");

    git(repo, &["commit", "--allow-empty", "--quiet", "-m", "Move HEAD"]);
    branch.create().expect("second create is a no-op");
    assert_eq!(branch.sha().expect("query"), sha);

    branch.delete(false).expect("delete");
    branch.delete(false).expect("second delete is a no-op");
    assert!(!branch.exists().expect("query"));
}

#[test]
fn test_local_tag_create_is_idempotent() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);

    let tag = LocalTag::new(repo, "v1.0").expect("valid name");
    tag.create(None).expect("create");
    let sha = tag.sha().expect("query");
    git(repo, &["commit", "--allow-empty", "--quiet", "-m", "Move HEAD"]);

    tag.create(None).expect("second create is a no-op");
    assert_eq!(tag.sha().expect("query"), sha);
    assert_eq!(
        tag.commit().expect("query").map(|c| c.sha().to_string()),
        sha
    );

    tag.delete().expect("delete");
    tag.delete().expect("second delete is a no-op");
}

#[test]
fn test_remote_create_keeps_existing_url() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);

    let remote = Remote::new(repo, "upstream");
    remote
        .create("https://example.com/a.git", false, false)
        .expect("create");
    remote
        .create("https://example.com/b.git", false, false)
        .expect("second create is a no-op");
    assert_eq!(
        remote.fetch_url().expect("query").as_deref(),
        Some("https://example.com/a.git")
    );
}

#[test]
fn test_remote_rename_updates_handle() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);

    let mut remote = Remote::new(repo, "upstream");
    remote
        .create("https://example.com/a.git", false, false)
        .expect("create");
    remote.rename("mirror").expect("rename");
    assert_eq!(remote.name(), "mirror");
    assert!(remote.exists().expect("query"));
    assert!(!factory::has_remote(repo, "upstream").expect("query"));
}

#[test]
fn test_remote_branch_create_and_delete_are_idempotent() {
    let fx = Fixture::new();
    let origin = Remote::new(&fx.work, "origin");
    let local = LocalBranch::new(&fx.work, "main").expect("valid name");
    let remote_branch = RemoteBranch::new(&origin, "published").expect("valid name");

    remote_branch.create(&local).expect("create");
    remote_branch.create(&local).expect("second create is a no-op");
    assert!(remote_branch.exists_online().expect("query"));

    remote_branch.delete().expect("delete");
    remote_branch.delete().expect("second delete is a no-op");
    assert!(!remote_branch.exists_online().expect("query"));
}

#[test]
fn test_config_unset_is_idempotent() {
    let temp = temp_dir();
    init_repo(temp.path());
    offline::git_config_unset_all_local(temp.path(), "branch.none.merge").expect("first");
    offline::git_config_unset_all_local(temp.path(), "branch.none.merge").expect("second");
}

// =============================================================================
// Validation and refs
// =============================================================================

#[test]
fn test_invalid_names_are_rejected() {
    let temp = temp_dir();
    let err = LocalBranch::new(temp.path(), "bad..name").unwrap_err();
    assert!(matches!(
        &err,
        GoodleError::Git(inner) if matches!(**inner, GitError::InvalidRefName { .. })
    ));
    assert!(LocalTag::new(temp.path(), "has space").is_err());
    assert!(Commit::new(temp.path(), "0123456789abcdef0123456789abcdef01234567").is_ok());
}

#[test]
fn test_ref_formatting() {
    let path = PathBuf::from("/repo");
    let origin = Remote::new(&path, "origin");
    let refs: Vec<Ref> = vec![
        LocalBranch::from_git(&path, "feature/x").into(),
        LocalTag::from_git(&path, "v1.0").into(),
        RemoteBranch::from_git(origin, "main", true).into(),
    ];

    let formatted: Vec<String> = refs.iter().map(GitRef::formatted_ref).collect();
    assert_eq!(
        formatted,
        ["refs/heads/feature/x", "refs/tags/v1.0", "refs/heads/main"]
    );
    let shown: Vec<String> = refs.iter().map(ToString::to_string).collect();
    assert_eq!(
        shown,
        ["local branch feature/x", "local tag v1.0", "remote branch main"]
    );
    assert!(refs.iter().all(|r| r.path() == Path::new("/repo")));
}

#[test]
fn test_checkout_is_idempotent() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);

    let main = LocalBranch::from_git(repo, "main");
    main.checkout().expect("already on main");

    let sha = offline::sha(repo, "HEAD").expect("query").expect("head");
    let commit = Commit::new(repo, sha).expect("valid sha");
    commit.checkout().expect("detach");
    assert!(offline::is_detached(repo).expect("query"));
    commit.checkout().expect("already detached at commit");

    Ref::from(main).checkout().expect("back to main");
    assert!(offline::is_on_branch(repo, "main").expect("query"));
}

// =============================================================================
// Factory
// =============================================================================

#[test]
fn test_all_branches_filters_tracking_sides() {
    let path = PathBuf::from("/repo");
    let origin = Remote::new(&path, "origin");
    let main = LocalBranch::from_git(&path, "main");
    let topic = LocalBranch::from_git(&path, "topic");
    let origin_main = RemoteBranch::from_git(origin.clone(), "main", true);
    let origin_dev = RemoteBranch::from_git(origin.clone(), "dev", false);
    let origin_push = RemoteBranch::from_git(origin, "main-push", false);

    let tracking = TrackingBranch::new(main.clone(), origin_main.clone(), Some(origin_push.clone()));
    let all = AllBranches::new(
        vec![main, topic],
        vec![origin_dev, origin_main, origin_push],
        vec![tracking],
    );

    assert_eq!(names(all.local(), LocalBranch::name), ["topic"]);
    assert_eq!(names(all.remote(), RemoteBranch::name), ["dev"]);
    assert_eq!(names(all.tracking(), TrackingBranch::name), ["main"]);
}

#[test]
fn test_factory_branches_of_clone() {
    let fx = Fixture::new();
    offline::create_local_branch(&fx.work, "topic").expect("branch");

    let origin = factory::remote(&fx.work, "origin")
        .expect("query")
        .expect("origin exists");
    let remote_branches = factory::remote_branches(&origin).expect("query");
    assert_eq!(names(&remote_branches, RemoteBranch::name), ["feature", "main"]);
    let defaults: Vec<bool> = remote_branches.iter().map(RemoteBranch::is_default).collect();
    assert_eq!(defaults, [false, true]);

    let tracking = factory::tracking_branches(&fx.work).expect("query");
    assert_eq!(tracking.len(), 1);
    assert_eq!(tracking[0].sort_key(), "main/origin/main");
    assert_eq!(tracking[0].push_branch().name(), "main");

    let all = factory::all_branches(&fx.work).expect("query");
    assert_eq!(names(all.local(), LocalBranch::name), ["topic"]);
    assert_eq!(names(all.remote(), RemoteBranch::name), ["feature"]);
    assert_eq!(names(all.tracking(), TrackingBranch::name), ["main"]);

    assert!(factory::has_local_branch(&fx.work, "topic").expect("query"));
    assert!(factory::has_tracking_branch(&fx.work, "main").expect("query"));
    assert!(!factory::has_tracking_branch(&fx.work, "topic").expect("query"));
    assert!(factory::has_remote_branch(&origin, "feature").expect("query"));
}

#[test]
fn test_tracking_branch_to_local_upstream() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);
    git(repo, &["branch", "--quiet", "--track", "follower", "main"]);

    let tracking = factory::tracking_branches(repo).expect("query");
    assert_eq!(tracking.len(), 1);
    assert_eq!(tracking[0].upstream_branch().remote().name(), ".");
    assert_eq!(tracking[0].upstream_branch().name(), "main");
}

#[test]
fn test_tracking_branch_create() {
    let fx = Fixture::new();
    let origin = Remote::new(&fx.work, "origin");
    let tracking = TrackingBranch::new(
        LocalBranch::new(&fx.work, "topic").expect("valid"),
        RemoteBranch::new(&origin, "topic").expect("valid"),
        None,
    );
    assert!(!tracking.exists().expect("query"));

    tracking.create().expect("create");
    assert!(tracking.exists().expect("query"));
    assert!(tracking.local().is_tracking_branch().expect("query"));
    assert!(tracking.upstream_branch().is_tracking_branch().expect("query"));
    assert_eq!(
        tracking.upstream_sha().expect("query"),
        tracking.local().sha().expect("query")
    );

    tracking.create().expect("second create is a no-op");
    tracking.delete(true).expect("delete both sides");
    assert!(!tracking.local().exists().expect("query"));
    assert!(!tracking.upstream_branch().exists_online().expect("query"));
}

/// Push a new commit to `origin/feature` from a second clone; returns its sha.
fn advance_feature(fx: &Fixture) -> String {
    let other = fx.other_clone("other");
    git(&other, &["checkout", "--quiet", "feature"]);
    commit_file(&other, "feature.txt", "feature\n", "Add feature");
    git(&other, &["push", "--quiet", "origin", "feature"]);
    git(&other, &["rev-parse", "HEAD"])
}

fn is_git_error(err: &GoodleError, check: impl Fn(&GitError) -> bool) -> bool {
    matches!(err, GoodleError::Git(inner) if check(&**inner))
}

#[test]
fn test_tracking_branch_create_from_remote_only() {
    let fx = Fixture::new();
    let pushed = advance_feature(&fx);
    let origin = Remote::new(&fx.work, "origin");
    let tracking = TrackingBranch::new(
        LocalBranch::new(&fx.work, "feature").expect("valid"),
        RemoteBranch::new(&origin, "feature").expect("valid"),
        None,
    );
    assert!(!tracking.local().exists().expect("query"));

    tracking.create().expect("create");
    assert!(tracking.exists().expect("query"));
    assert_eq!(tracking.local().sha().expect("query"), Some(pushed));
    assert_eq!(
        tracking.local().sha().expect("query"),
        tracking.upstream_sha().expect("query")
    );
    assert_eq!(
        offline::current_branch(&fx.work).expect("query").as_deref(),
        Some("main")
    );
}

#[test]
fn test_tracking_branch_create_upstream_under_another_name() {
    let fx = Fixture::new();
    let origin = Remote::new(&fx.work, "origin");
    let local = LocalBranch::new(&fx.work, "local-name").expect("valid");
    local.create().expect("create");
    let tracking = TrackingBranch::new(
        local,
        RemoteBranch::new(&origin, "remote-name").expect("valid"),
        None,
    );

    tracking.create_upstream().expect("create upstream");
    assert!(tracking.upstream_branch().exists_online().expect("query"));
    assert!(
        !online::branch_exists_at_remote(Some(&fx.work), "origin", "local-name").expect("query")
    );
    assert!(tracking.exists().expect("query"));
}

#[test]
fn test_tracking_branch_pull_needs_checkout() {
    let fx = Fixture::new();
    git(&fx.work, &["branch", "--quiet", "--track", "feature", "origin/feature"]);
    let pushed = advance_feature(&fx);
    let tracking = factory::tracking_branches(&fx.work)
        .expect("query")
        .into_iter()
        .find(|t| t.name() == "feature")
        .expect("feature tracks origin/feature");
    let main = offline::branch_commit_sha(&fx.work, "main", None).expect("query");

    let err = tracking.pull(false).unwrap_err();
    assert!(is_git_error(&err, |e| matches!(e, GitError::NotOnBranch { .. })));
    assert_eq!(
        offline::branch_commit_sha(&fx.work, "main", None).expect("query"),
        main
    );

    tracking.checkout().expect("checkout");
    tracking.pull(false).expect("pull");
    assert_eq!(tracking.local().sha().expect("query"), Some(pushed));
}

#[test]
fn test_local_branch_push_guards() {
    let fx = Fixture::new();
    let origin = Remote::new(&fx.work, "origin");

    let missing = LocalBranch::new(&fx.work, "missing").expect("valid");
    missing
        .push(&origin, None, false)
        .expect("missing branch is skipped");
    assert!(!online::branch_exists_at_remote(Some(&fx.work), "origin", "missing").expect("query"));

    git(&fx.work, &["checkout", "--quiet", "--detach"]);
    let main = LocalBranch::new(&fx.work, "main").expect("valid");
    let err = main.push(&origin, Some("copy"), false).unwrap_err();
    assert!(is_git_error(&err, |e| matches!(e, GitError::DetachedHead { .. })));
    assert!(!online::branch_exists_at_remote(Some(&fx.work), "origin", "copy").expect("query"));
}

#[test]
fn test_remote_tags() {
    let fx = Fixture::new();
    let origin = Remote::new(&fx.work, "origin");
    let tag = LocalTag::new(&fx.work, "v2.0").expect("valid");
    tag.create(None).expect("tag");
    tag.push(&origin, false).expect("push");

    let tags = factory::remote_tags(&origin).expect("ls-remote");
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name(), "v2.0");
    assert_eq!(tags[0].sha().expect("query"), tag.sha().expect("query"));

    tags[0].delete().expect("delete");
    tags[0].delete().expect("second delete is a no-op");
    assert!(factory::remote_tags(&origin).expect("ls-remote").is_empty());
}

#[test]
fn test_factory_submodules() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);
    fs::write(
        repo.join(".gitmodules"),
        "[submodule \"lib\"]\n\tpath = vendor/lib\n\turl = https://example.com/lib.git\n\tbranch = stable\n",
    )
    .expect("write .gitmodules");
    git(repo, &["config", "submodule.lib.url", "https://example.com/lib.git"]);
    git(repo, &["config", "submodule.lib.active", "true"]);

    let submodules = factory::submodules(repo).expect("query");
    assert_eq!(submodules.len(), 1);
    let lib = &submodules[0];
    assert_eq!(lib.name(), "lib");
    assert_eq!(lib.submodule_path(), Path::new("vendor/lib"));
    assert_eq!(lib.url(), Some("https://example.com/lib.git"));
    assert_eq!(lib.branch(), Some("stable"));
    assert_eq!(lib.commit(), None);
    assert!(lib.active());
    assert_eq!(lib.repo().path(), repo.join("vendor/lib"));
    assert!(lib.is_initialized().expect("query"));
    assert!(!lib.is_cloned().expect("query"));
    assert!(factory::has_submodule(repo, Path::new("vendor/lib")).expect("query"));
}

// =============================================================================
// Default branch cache
// =============================================================================

#[test]
fn test_default_branch_is_cached() {
    let fx = Fixture::new();
    let upstream = Remote::new(&fx.work, "upstream");
    upstream
        .create(&fx.origin_url(), false, false)
        .expect("add remote");
    let cache = fx.work.join(".git/refs/remotes/upstream/HEAD");
    assert!(!cache.exists());

    let lookups = Cell::new(0);
    let lookup = |path: &Path, remote: &str| {
        lookups.set(lookups.get() + 1);
        online::default_branch(Some(path), remote)
    };

    let first = upstream.default_branch_with(lookup).expect("lookup");
    assert_eq!(lookups.get(), 1);
    assert!(cache.is_file());

    let second = upstream.default_branch_with(lookup).expect("cached");
    assert_eq!(lookups.get(), 1);

    let first = first.expect("origin has a HEAD");
    assert_eq!(first.name(), "main");
    assert!(first.is_default());
    assert_eq!(second.map(|b| b.name().to_string()).as_deref(), Some("main"));
}

// =============================================================================
// Repo
// =============================================================================

#[test]
fn test_repo_queries() {
    let fx = Fixture::new();
    let repo = Repo::new(&fx.work, Some("origin")).expect("absolute path");

    assert!(repo.exists());
    assert!(repo.is_valid().expect("query"));
    assert_eq!(repo.git_dir(), fx.work.join(".git"));
    assert_eq!(
        repo.current_branch().expect("query").map(|b| b.name().to_string()).as_deref(),
        Some("main")
    );
    assert_eq!(names(&repo.remotes().expect("query"), Remote::name), ["origin"]);
    assert_eq!(repo.remote_branches().expect("query").len(), 2);
    assert_eq!(repo.new_commits_count(false).expect("query"), 0);

    fs::write(fx.work.join("scratch.txt"), "x").expect("write");
    assert!(!repo.is_valid().expect("query"));
}

#[test]
fn test_repo_clone_skips_existing() {
    let fx = Fixture::new();
    let target = Repo::new(fx.root.join("copy"), None).expect("absolute path");
    assert!(!target.exists());

    target
        .clone_repo(&fx.origin_url(), &online::CloneOptions::default())
        .expect("clone");
    assert!(target.exists());
    target
        .clone_repo(&fx.origin_url(), &online::CloneOptions::default())
        .expect("second clone is a no-op");
}

#[test]
fn test_repo_lfs_hooks_follow_git_lfs() {
    let temp = temp_dir();
    init_repo(temp.path());
    let repo = Repo::new(temp.path(), None).expect("repo");

    let installed = repo.install_lfs_hooks();
    assert_eq!(installed.is_ok(), which::which("git-lfs").is_ok());
}
