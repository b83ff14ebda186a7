// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("goodle").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_version() {
    let cli = parse(&["version"]);
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_no_command() {
    assert!(parse(&[]).command.is_none());
}

#[test]
fn test_parse_global_options() {
    let cli = parse(&[
        "-c", "a.toml", "--config", "b.toml", "-l", "5", "-j", "3", "-s", "git.remote=up",
        "--verbose", "options",
    ]);
    assert!(matches!(cli.command, Some(Command::Options)));
    insta::assert_debug_snapshot!(cli.global, @r#"
    GlobalOptions {
        configs: [
            "a.toml",
            "b.toml",
        ],
        log_level: Some(
            5,
        ),
        file_log_level: None,
        log_file: None,
        jobs: Some(
            3,
        ),
        verbose: true,
        options: [
            "git.remote=up",
        ],
        no_default_config: false,
    }
    "#);
}

#[test]
fn test_config_overrides() {
    let cli = parse(&[
        "-l", "4", "--log-file", "out.log", "-j", "2", "-s", "git.depth = 1", "status",
    ]);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides().unwrap(), @r#"
    [
        (
            "git.depth",
            "1",
        ),
        (
            "global.output_log_level",
            "4",
        ),
        (
            "global.file_log_level",
            "4",
        ),
        (
            "global.log_file",
            "out.log",
        ),
        (
            "global.jobs",
            "2",
        ),
    ]
    "#);
}

#[test]
fn test_malformed_set_is_rejected() {
    let cli = parse(&["-s", "novalue", "status"]);
    let err = cli.global.to_config_overrides().unwrap_err();
    assert_eq!(err.to_string(), "expected KEY=VALUE, got 'novalue'");
}

#[test]
fn test_invalid_log_level() {
    assert!(Cli::try_parse_from(["goodle", "-l", "7", "version"]).is_err());
    assert!(Cli::try_parse_from(["goodle", "-j", "0", "version"]).is_err());
}

#[test]
fn test_parse_clone() {
    let cli = parse(&["clone", "a", "b", "--depth", "1", "--blobless"]);
    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone");
    };
    insta::assert_debug_snapshot!(args, @r#"
    CloneArgs {
        repos: [
            "a",
            "b",
        ],
        depth: Some(
            1,
        ),
        blobless: true,
        treeless: false,
        single_branch: false,
    }
    "#);
}

#[test]
fn test_clone_filters_conflict() {
    assert!(Cli::try_parse_from(["goodle", "clone", "--blobless", "--treeless"]).is_err());
}

#[test]
fn test_parse_fetch() {
    let cli = parse(&["fetch", "-p", "--tags"]);
    let Some(Command::Fetch(args)) = cli.command else {
        panic!("expected fetch");
    };
    assert!(args.repos.is_empty());
    assert!(args.prune);
    assert!(args.tags);
}

#[test]
fn test_parse_pull() {
    let cli = parse(&["pull", "x", "--rebase"]);
    let Some(Command::Pull(args)) = cli.command else {
        panic!("expected pull");
    };
    assert_eq!(args.repos, ["x"]);
    assert!(args.rebase);
}

#[test]
fn test_parse_update() {
    let cli = parse(&["update", "--merge", "--remote"]);
    let Some(Command::Update(args)) = cli.command else {
        panic!("expected update");
    };
    insta::assert_debug_snapshot!(args, @r"
    UpdateArgs {
        repos: [],
        checkout: false,
        rebase: false,
        merge: true,
        remote: true,
    }
    ");
}

#[test]
fn test_update_strategies_conflict() {
    assert!(Cli::try_parse_from(["goodle", "update", "--checkout", "--rebase"]).is_err());
}

#[test]
fn test_parse_status() {
    let cli = parse(&["status", "a", "--json"]);
    let Some(Command::Status(args)) = cli.command else {
        panic!("expected status");
    };
    assert_eq!(args.repos, ["a"]);
    assert!(args.json);
}

#[test]
fn test_parse_branches() {
    let cli = parse(&["branches", "repo"]);
    let Some(Command::Branches(args)) = cli.command else {
        panic!("expected branches");
    };
    assert_eq!(args.repo, "repo");
    assert!(!args.json);
    assert!(Cli::try_parse_from(["goodle", "branches"]).is_err());
}
