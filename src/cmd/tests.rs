// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::branches::{BranchListing, RemoteEntry, TrackingEntry, branch_listing, format_branches};
use super::repo::{format_status, repo_tasks, run_repo_tasks};
use crate::config::{Config, RepoConfig};
use crate::git::testing::{Fixture, git};
use crate::task::{RepoAction, RepoReport, RepoStatus, Task};

fn config_for(root: &std::path::Path, repos: &[(&str, Option<&str>)]) -> Config {
    let mut config = Config::default();
    config.global.root = Some(root.to_path_buf());
    config.global.quiet = false;
    config.global.jobs = 2;
    config.repos = repos
        .iter()
        .map(|(name, url)| RepoConfig {
            name: (*name).to_string(),
            url: url.map(str::to_string),
            ..Default::default()
        })
        .collect();
    config
}

fn report(name: &str, status: Option<RepoStatus>) -> RepoReport {
    RepoReport {
        name: name.to_string(),
        path: PathBuf::from(name),
        action: "status",
        status,
    }
}

#[test]
fn test_format_status() {
    let reports = [
        report(
            "alpha",
            Some(RepoStatus {
                branch: Some("main".into()),
                commit: Some("1a2b3c4".into()),
                ..Default::default()
            }),
        ),
        report(
            "beta-long",
            Some(RepoStatus {
                branch: None,
                commit: Some("deadbee".into()),
                dirty: true,
                detached: true,
                behind: 2,
                ..Default::default()
            }),
        ),
        report("gamma", Some(RepoStatus::default())),
        report("delta", None),
    ];
    insta::assert_debug_snapshot!(format_status(&reports), @r#"
    [
        "alpha      main 1a2b3c4",
        "beta-long  (detached) deadbee [dirty, behind 2]",
        "gamma      (not cloned)",
        "delta      -",
    ]
    "#);
}

#[test]
fn test_format_branches() {
    let listing = BranchListing {
        local: vec!["topic".into()],
        remote: vec![
            RemoteEntry {
                remote: "origin".into(),
                name: "feature".into(),
                default: false,
            },
            RemoteEntry {
                remote: "origin".into(),
                name: "main".into(),
                default: true,
            },
        ],
        tracking: vec![TrackingEntry {
            local: "dev".into(),
            upstream: "origin/dev".into(),
            push: "fork/dev".into(),
        }],
    };
    insta::assert_debug_snapshot!(format_branches(&listing), @r#"
    [
        "  dev -> origin/dev (push fork/dev)",
        "  topic",
        "  origin/feature",
        "  origin/main (default)",
    ]
    "#);
}

#[test]
fn test_repo_tasks_resolve_paths_and_names() {
    let config = config_for(std::path::Path::new("/src"), &[("a", None), ("b", None)]);
    let tasks = repo_tasks(&config, &[], |_| Ok(RepoAction::Status)).unwrap();
    let names: Vec<_> = tasks.iter().map(|t| t.name().to_string()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(tasks[1].repo().path(), std::path::Path::new("/src/b"));

    let err = repo_tasks(&config, &["zzz".to_string()], |_| Ok(RepoAction::Status)).unwrap_err();
    assert!(err.to_string().contains("no such repository"));
}

#[test]
fn test_repo_tasks_report_missing_url() {
    let config = config_for(std::path::Path::new("/src"), &[("nourl", None)]);
    let err = repo_tasks(&config, &[], |repo| {
        Ok(RepoAction::Clone {
            url: repo.require_url()?.to_string(),
            options: config.git.clone_options(None)?,
        })
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "repository 'nourl'");
    assert!(format!("{err:#}").contains("required to clone"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_clone_then_status_through_pool() {
    let fixture = Fixture::new();
    let url = fixture.origin_url();
    let config = config_for(
        &fixture.root,
        &[("one", Some(url.as_str())), ("two", Some(url.as_str()))],
    );

    let clone = repo_tasks(&config, &[], |repo| {
        Ok(RepoAction::Clone {
            url: repo.require_url()?.to_string(),
            options: config.git.clone_options(None)?,
        })
    })
    .unwrap();
    let reports = run_repo_tasks(&config, clone).await.unwrap();
    assert_eq!(reports.len(), 2);

    let status = repo_tasks(&config, &[], |_| Ok(RepoAction::Status)).unwrap();
    let reports = run_repo_tasks(&config, status).await.unwrap();
    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["one", "two"]);
    for report in &reports {
        let status = report.status.as_ref().unwrap();
        assert_eq!(status.branch.as_deref(), Some("main"));
        assert!(!status.dirty);
    }
}

#[tokio::test]
async fn test_run_repo_tasks_with_nothing_configured() {
    let config = config_for(std::path::Path::new("/src"), &[]);
    let reports = run_repo_tasks(&config, Vec::new()).await.unwrap();
    assert!(reports.is_empty());
}

#[test]
fn test_branch_listing_of_clone() {
    let fixture = Fixture::new();
    git(&fixture.work, &["branch", "topic"]);
    let config = config_for(&fixture.root, &[("work", None)]);

    let listing = branch_listing(&config, "work").unwrap();
    assert_eq!(listing.local, ["topic"]);
    assert_eq!(
        listing.tracking,
        [TrackingEntry {
            local: "main".into(),
            upstream: "origin/main".into(),
            push: "origin/main".into(),
        }]
    );
    let remote: Vec<_> = listing.remote.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(remote, ["feature"]);

    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["tracking"][0]["upstream"], "origin/main");
}

#[test]
fn test_branch_listing_requires_clone() {
    let fixture = Fixture::new();
    let config = config_for(&fixture.root, &[("absent", None)]);
    let err = branch_listing(&config, "absent").unwrap_err();
    assert!(err.to_string().contains("repository not found"));
}
