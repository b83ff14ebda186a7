// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader, RepoConfig};
use crate::error::{ConfigError, GoodleError};
use crate::git::online::{PartialCloneFilter, SubmoduleUpdateStrategy};
use crate::logging::LogLevel;
use std::path::PathBuf;

fn invalid_key(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<GoodleError>()? {
        GoodleError::Config(config) => match &**config {
            ConfigError::InvalidValue { key, .. } => Some(key.clone()),
            _ => None,
        },
        _ => None,
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.global.jobs >= 1);
    insta::assert_yaml_snapshot!(
        serde_json::json!({
            "global.output_log_level": config.global.output_log_level.as_u8(),
            "global.file_log_level": config.global.file_log_level.as_u8(),
            "global.quiet": config.global.quiet,
            "git.remote": config.git.remote,
            "git.recursive": config.git.recursive,
            "repos": config.repos.len(),
        }),
        @r#"
    git.recursive: true
    git.remote: origin
    global.file_log_level: 5
    global.output_log_level: 3
    global.quiet: true
    repos: 0
    "#
    );
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
output_log_level = 4
jobs = 3
root = "/src"

[git]
remote = "upstream"
depth = 1
blobless = true
rebase = true

[[repos]]
name = "alpha"
url = "https://example.com/alpha.git"

[[repos]]
name = "beta"
path = "vendor/beta"
branch = "stable"
remote = "fork"
"#;

    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.jobs, 3);
    assert_eq!(config.git.filter().unwrap(), Some(PartialCloneFilter::Blobless));
    assert_eq!(
        config.git.update_strategy().unwrap(),
        Some(SubmoduleUpdateStrategy::Rebase)
    );

    let alpha = config.repo("alpha").unwrap();
    let beta = config.repo("beta").unwrap();
    assert_eq!(config.repo_path(alpha), PathBuf::from("/src/alpha"));
    assert_eq!(config.repo_path(beta), PathBuf::from("/src/vendor/beta"));
    assert_eq!(config.repo_remote(alpha), "upstream");
    assert_eq!(config.repo_remote(beta), "fork");
}

#[test]
fn test_absolute_repo_path_ignores_root() {
    let config = Config::parse(
        r#"
[global]
root = "/src"

[[repos]]
name = "abs"
path = "/elsewhere/abs"
"#,
    )
    .unwrap();
    let repo = config.repo("abs").unwrap();
    assert_eq!(config.repo_path(repo), PathBuf::from("/elsewhere/abs"));
}

#[test]
fn test_validate_rejects_conflicting_filters() {
    let err = Config::parse("[git]\nblobless = true\ntreeless = true").unwrap_err();
    assert_eq!(invalid_key(&err).as_deref(), Some("blobless"));
}

#[test]
fn test_validate_rejects_conflicting_strategies() {
    let err = Config::parse("[git]\ncheckout = true\nmerge = true").unwrap_err();
    assert_eq!(invalid_key(&err).as_deref(), Some("checkout"));
}

#[test]
fn test_validate_rejects_zero_jobs() {
    let err = Config::parse("[global]\njobs = 0").unwrap_err();
    assert_eq!(invalid_key(&err).as_deref(), Some("jobs"));
}

#[test]
fn test_validate_rejects_duplicate_repos() {
    let err = Config::parse("[[repos]]\nname = \"a\"\n[[repos]]\nname = \"a\"").unwrap_err();
    assert_eq!(invalid_key(&err).as_deref(), Some("name"));
    assert!(err.to_string().contains("duplicate repository 'a'"));
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[git]\nshallow = true").is_err());
    assert!(Config::parse("[nonsense]\nkey = 1").is_err());
}

#[test]
fn test_select_repositories() {
    let config = Config::parse("[[repos]]\nname = \"a\"\n[[repos]]\nname = \"b\"").unwrap();

    let all: Vec<_> = config.select(&[]).unwrap().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(all, ["a", "b"]);

    let one = config.select(&["b".to_string()]).unwrap();
    assert_eq!(one[0].name, "b");

    let err = config.select(&["zzz".to_string()]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "config error: invalid value for 'zzz' in section '[repos]': no such repository"
    );
}

#[test]
fn test_require_url() {
    let repo = RepoConfig {
        name: "nourl".to_string(),
        ..Default::default()
    };
    let err = repo.require_url().unwrap_err();
    assert_eq!(
        err.to_string(),
        "config error: invalid value for 'url' in section '[repos.nourl]': required to clone"
    );
}

#[test]
fn test_git_config_to_options() {
    let config = Config::parse("[git]\ndepth = 5\nsingle_branch = true\nclone_jobs = 2\nmerge = true")
        .unwrap();

    let clone = config.git.clone_options(Some("dev")).unwrap();
    assert_eq!(clone.branch.as_deref(), Some("dev"));
    assert_eq!(clone.depth, Some(5));
    assert_eq!(clone.jobs, Some(2));
    assert!(clone.single_branch);
    assert_eq!(clone.filter, None);

    let update = config.git.submodule_update_options().unwrap();
    assert!(update.init);
    assert!(update.recursive);
    assert_eq!(update.depth, Some(5));
    assert_eq!(update.strategy, Some(SubmoduleUpdateStrategy::Merge));
}

#[test]
fn test_format_options() {
    let config = Config::parse(
        r#"
[global]
jobs = 2
root = "/src"

[[repos]]
name = "alpha"
url = "https://example.com/alpha.git"
"#,
    )
    .unwrap();
    insta::assert_debug_snapshot!(config.format_options(), @r#"
    [
        "git.blobless            = false",
        "git.checkout            = false",
        "git.clone_jobs          = ",
        "git.depth               = ",
        "git.merge               = false",
        "git.rebase              = false",
        "git.recursive           = true",
        "git.remote              = origin",
        "git.single_branch       = false",
        "git.treeless            = false",
        "global.file_log_level   = 5",
        "global.jobs             = 2",
        "global.log_file         = ",
        "global.output_log_level = 3",
        "global.quiet            = true",
        "global.root             = /src",
        "repos.alpha.path        = /src/alpha",
        "repos.alpha.remote      = origin",
        "repos.alpha.url         = https://example.com/alpha.git",
    ]
    "#);
}

#[test]
fn test_config_loader_tracks_files() {
    let temp = tempfile::tempdir().unwrap();
    let present = temp.path().join("present.toml");
    std::fs::write(&present, "[global]\njobs = 2\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(temp.path().join("absent.toml"))
        .add_toml_file(&present)
        .add_toml_str("[git]\nremote = \"up\"");

    let lines = loader.format_loaded_files();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. [file] "));
    assert_eq!(lines[1], "2. [string] <string>");

    let config = loader.build().unwrap();
    assert_eq!(config.global.jobs, 2);
    assert_eq!(config.git.remote, "up");
}

#[test]
fn test_config_loader_missing_required_file() {
    let temp = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(temp.path().join("missing.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\njobs = 8")
        .set("global.jobs", 3)
        .unwrap()
        .set_some("git.remote", None::<String>)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.global.jobs, 3);
    assert_eq!(config.git.remote, "origin");
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("GOODLETEST_GIT__REMOTE", "from-env");
        std::env::set_var("GOODLETEST_GLOBAL__JOBS", "7");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[git]\nremote = \"from-toml\"")
        .with_env_prefix("GOODLETEST")
        .build()
        .unwrap();

    assert_eq!(config.git.remote, "from-env");
    assert_eq!(config.global.jobs, 7);

    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("GOODLETEST_GIT__REMOTE");
        std::env::remove_var("GOODLETEST_GLOBAL__JOBS");
    }
}

#[test]
fn test_log_level_bounds() {
    assert!(Config::parse("[global]\noutput_log_level = 6").is_ok());
    assert!(Config::parse("[global]\noutput_log_level = 7").is_err());
}
