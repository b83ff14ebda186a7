// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsers for git's textual output.
//!
//! ```text
//!  show-ref / ls-remote     --> shas()             {name: sha}
//!  git branch               --> local_branches()   [name]
//!  rev-parse B@{upstream}   --> tracking_branch()  (remote?, name)
//!  git branch -r            --> remote_branches()  [name] + default
//!  git remote -v            --> remotes()          {name: urls}
//!  config --get-regexp      --> submodules()       {name: {key: value}}
//! ```
//!
//! Every parser expects one exact output shape and returns a
//! [`ParseError`] for anything else.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::{GoodleError, GoodleResult, ParseError};

/// Prefix of local branch refs.
pub const HEADS_PREFIX: &str = "refs/heads/";
/// Prefix of tag refs.
pub const TAGS_PREFIX: &str = "refs/tags/";
/// Prefix of remote-tracking refs.
pub const REMOTES_PREFIX: &str = "refs/remotes/";

/// `submodule.<name>.<key>`; the name runs to the last dot.
pub(crate) const SUBMODULE_KEY_PATTERN: &str = r"^submodule\.(?P<name>.+)\.(?P<key>[^.]+)$";

/// Strip any `refs/heads/`, `refs/tags/` or `refs/remotes/` prefix.
#[must_use]
pub fn truncate_ref(reference: &str) -> &str {
    [HEADS_PREFIX, TAGS_PREFIX, REMOTES_PREFIX]
        .iter()
        .find_map(|prefix| reference.strip_prefix(prefix))
        .unwrap_or(reference)
}

/// `main` -> `refs/heads/main`
#[must_use]
pub fn format_git_branch(branch: &str) -> String {
    format!("{HEADS_PREFIX}{branch}")
}

/// `v1.0` -> `refs/tags/v1.0`
#[must_use]
pub fn format_git_tag(tag: &str) -> String {
    format!("{TAGS_PREFIX}{tag}")
}

/// `origin`, `main` -> `refs/remotes/origin/main`
#[must_use]
pub fn format_git_remote_branch(remote: &str, branch: &str) -> String {
    format!("{REMOTES_PREFIX}{remote}/{branch}")
}

/// Parse `<sha> <prefixed-name>` lines into `{name: sha}`.
///
/// Peeled `^{}` entries from `ls-remote --tags` are skipped.
///
/// # Errors
///
/// Returns [`ParseError::ShaLine`] for a non-empty line without two fields.
pub fn shas(output: &str, prefix: &str) -> GoodleResult<BTreeMap<String, String>> {
    let mut result = BTreeMap::new();
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut tokens = line.split_whitespace();
        let (Some(sha), Some(name), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ParseError::ShaLine {
                line: line.to_string(),
            }
            .into());
        };
        if name.ends_with("^{}") {
            continue;
        }
        let name = name.strip_prefix(prefix).unwrap_or(name);
        result.insert(name.to_string(), sha.to_string());
    }
    Ok(result)
}

/// Parse `git branch` output into bare branch names.
///
/// The `*` (current) and `+` (other worktree) markers are stripped and the
/// detached `(HEAD detached at ...)` pseudo-entry is dropped.
#[must_use]
pub fn local_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("* ")
                .or_else(|| line.strip_prefix("+ "))
                .unwrap_or(line)
                .trim()
        })
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(String::from)
        .collect()
}

/// Parse the target of `rev-parse --symbolic-full-name <branch>@{upstream}`.
///
/// `refs/heads/<name>` is a branch of the same repository (no remote);
/// `refs/remotes/<remote>/<name>` names the remote and the branch on it.
///
/// # Errors
///
/// Returns [`ParseError::TrackingBranch`] for any other ref.
pub fn tracking_branch(output: &str) -> GoodleResult<(Option<String>, String)> {
    let output = output.trim();
    let invalid = || ParseError::TrackingBranch {
        output: output.to_string(),
    };

    if let Some(name) = output.strip_prefix(HEADS_PREFIX) {
        if name.is_empty() {
            return Err(invalid().into());
        }
        return Ok((None, name.to_string()));
    }
    if let Some(rest) = output.strip_prefix(REMOTES_PREFIX) {
        return match rest.split_once('/') {
            Some((remote, name)) if !remote.is_empty() && !name.is_empty() => {
                Ok((Some(remote.to_string()), name.to_string()))
            }
            _ => Err(invalid().into()),
        };
    }
    Err(invalid().into())
}

/// Branches of one remote, as listed by `git branch -r`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteBranchListing {
    /// Branch names with the `<remote>/` prefix removed.
    pub branches: Vec<String>,
    /// Target of the remote's `HEAD` symref, if listed.
    pub default_branch: Option<String>,
}

/// Parse `git branch -r` output for one remote.
///
/// # Errors
///
/// Returns [`ParseError::RemoteBranchLine`] for a line that is neither a
/// single branch nor `<name> -> <target>`.
pub fn remote_branches(output: &str, remote: &str) -> GoodleResult<RemoteBranchListing> {
    let prefix = format!("{remote}/");
    let strip = |name: &str| name.strip_prefix(&prefix).unwrap_or(name).to_string();

    let mut listing = RemoteBranchListing::default();
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [name] => listing.branches.push(strip(name)),
            [_, "->", target] => listing.default_branch = Some(strip(target)),
            _ => {
                return Err(ParseError::RemoteBranchLine {
                    line: line.to_string(),
                }
                .into());
            }
        }
    }
    Ok(listing)
}

/// Fetch and push URL of one remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrls {
    pub fetch_url: String,
    pub push_url: String,
}

/// Parse `git remote -v` into `{name: {fetch_url, push_url}}`.
///
/// A remote listed with a fetch URL only pushes to that same URL.
///
/// # Errors
///
/// Returns [`ParseError::RemoteLine`] for a line without three fields and
/// [`ParseError::RemoteKind`] when the third is not `(fetch)` or `(push)`.
pub fn remotes(output: &str) -> GoodleResult<BTreeMap<String, RemoteUrls>> {
    let mut fetch = BTreeMap::new();
    let mut push = BTreeMap::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [name, url, kind] = tokens.as_slice() else {
            return Err(ParseError::RemoteLine {
                line: line.to_string(),
            }
            .into());
        };
        let target = match *kind {
            "(fetch)" => &mut fetch,
            "(push)" => &mut push,
            other => {
                return Err(ParseError::RemoteKind {
                    line: line.to_string(),
                    kind: other.to_string(),
                }
                .into());
            }
        };
        target.insert((*name).to_string(), (*url).to_string());
    }

    let mut result = BTreeMap::new();
    for (name, fetch_url) in fetch {
        let push_url = push.remove(&name).unwrap_or_else(|| fetch_url.clone());
        result.insert(name, RemoteUrls { fetch_url, push_url });
    }
    for (name, push_url) in push {
        result.insert(
            name,
            RemoteUrls {
                fetch_url: push_url.clone(),
                push_url,
            },
        );
    }
    Ok(result)
}

/// Parse `git config --get-regexp submodule` lines.
///
/// Each line is `submodule.<name>.<key> <value>`; the name may itself
/// contain dots, so it spans from the prefix to the last dot of the key.
///
/// # Errors
///
/// Returns [`ParseError::SubmoduleLine`] for a line of another shape.
/// Returns [`GoodleError::Other`] if the key regex fails to compile.
pub fn submodules<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> GoodleResult<BTreeMap<String, BTreeMap<String, String>>> {
    let key_pattern = Regex::new(SUBMODULE_KEY_PATTERN)
        .map_err(|err| GoodleError::other(format!("failed to compile submodule key regex: {err}")))?;
    let mut result: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for line in lines.into_iter().filter(|l| !l.trim().is_empty()) {
        let invalid = || ParseError::SubmoduleLine {
            line: line.to_string(),
        };
        let line = line.trim();
        let (key, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let captures = key_pattern.captures(key).ok_or_else(invalid)?;
        result
            .entry(captures["name"].to_string())
            .or_default()
            .insert(captures["key"].to_string(), value.trim().to_string());
    }
    Ok(result)
}

/// Extract the branch that `ls-remote --symref <url> HEAD` points at.
#[must_use]
pub fn symref_head(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        (tokens.next() == Some("ref:"))
            .then(|| tokens.next())
            .flatten()
            .and_then(|target| target.strip_prefix(HEADS_PREFIX))
            .map(String::from)
    })
}

/// Parse `rev-list --left-right --count` output into `(left, right)`.
///
/// # Errors
///
/// Returns [`ParseError::Count`] unless the output is two integers.
pub fn left_right_count(output: &str) -> GoodleResult<(u32, u32)> {
    let invalid = || ParseError::Count {
        output: output.to_string(),
    };
    let mut tokens = output.split_whitespace().map(str::parse::<u32>);
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(Ok(left)), Some(Ok(right)), None) => Ok((left, right)),
        _ => Err(invalid().into()),
    }
}

/// Parse a single integer, as printed by `rev-list --count`.
///
/// # Errors
///
/// Returns [`ParseError::Count`] if the output is not an integer.
pub fn count(output: &str) -> GoodleResult<u32> {
    output.trim().parse().map_err(|_| {
        ParseError::Count {
            output: output.to_string(),
        }
        .into()
    })
}

/// Extract the gitlink sha from `git ls-tree HEAD <path>`.
///
/// The line reads `160000 commit <sha>\t<path>`.
#[must_use]
pub fn ls_tree_sha(output: &str) -> Option<String> {
    output
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(2))
        .map(String::from)
}
