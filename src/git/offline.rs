// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local git operations (no network).
//!
//! ```text
//!  typed params --> git args --> cmd::{run,output,stdout} --> parse::*
//!
//!  predicates   is_dirty, is_detached, is_shallow, is_rebase_in_progress
//!  queries      remotes, local_branches, local_tags_info, upstream_branch
//!  cache        default_branch / save_default_branch
//!  submodules   .gitmodules (declared) <- .git/config (initialized)
//!  mutations    branch/tag CRUD, config, checkout, reset, clean, commit
//! ```
//!
//! Read-only functions return `false`, empty collections or `None` when
//! git reports nothing; they only fail when git cannot be spawned or
//! prints output of an unexpected shape.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use tracing::debug;

use super::cmd;
use super::parse::{self, RemoteBranchListing, RemoteUrls};
use crate::error::{GoodleError, GoodleResult};

/// Submodule records keyed by submodule name, then by config key.
pub type SubmoduleInfo = BTreeMap<String, BTreeMap<String, String>>;

/// Exit code of `git config --unset-all` when the key does not exist.
const CONFIG_KEY_MISSING: i32 = 5;

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn lines(output: Option<String>) -> Vec<String> {
    output
        .map(|out| out.lines().map(String::from).collect())
        .unwrap_or_default()
}

// --- Repository state ---

/// True iff `path` is a directory holding a non-empty `.git` directory.
#[must_use]
pub fn is_repo_cloned(path: &Path) -> bool {
    is_non_empty_dir(&path.join(".git"))
}

/// True iff `path/.git` is a directory.
#[must_use]
pub fn has_git_directory(path: &Path) -> bool {
    path.join(".git").is_dir()
}

fn is_non_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_some())
}

/// Resolve the git directory of a working tree.
///
/// Follows a `.git` file (`gitdir: <path>`) as used by submodules and
/// linked worktrees.
#[must_use]
pub fn git_dir(path: &Path) -> Option<PathBuf> {
    let dot_git = path.join(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }
    let contents = fs::read_to_string(&dot_git).ok()?;
    let target = contents.trim().strip_prefix("gitdir:")?.trim();
    let target = Path::new(target);
    Some(if target.is_absolute() {
        target.to_path_buf()
    } else {
        path.join(target)
    })
}

/// True while a rebase is stopped in this working tree.
#[must_use]
pub fn is_rebase_in_progress(path: &Path) -> bool {
    git_dir(path).is_some_and(|dir| {
        dir.join("rebase-merge").is_dir() || dir.join("rebase-apply").is_dir()
    })
}

/// True if tracked files have staged or unstaged changes.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn is_dirty(path: &Path) -> GoodleResult<bool> {
    let status = cmd::stdout(&["status", "--porcelain", "--untracked-files=no"], path)?;
    Ok(status.is_some_and(|s| !s.is_empty()))
}

/// Untracked files that are not ignored.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn untracked_files(path: &Path) -> GoodleResult<Vec<String>> {
    let output = cmd::stdout(&["ls-files", ".", "--exclude-standard", "--others"], path)?;
    Ok(lines(output))
}

/// True if there is at least one untracked, non-ignored file.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn has_untracked_files(path: &Path) -> GoodleResult<bool> {
    Ok(!untracked_files(path)?.is_empty())
}

/// True if `HEAD` does not point at a branch.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn is_detached(path: &Path) -> GoodleResult<bool> {
    let head = cmd::stdout(&["rev-parse", "--abbrev-ref", "HEAD"], path)?;
    Ok(head.as_deref() == Some("HEAD"))
}

/// True for a clone with truncated history.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn is_shallow(path: &Path) -> GoodleResult<bool> {
    let shallow = cmd::stdout(&["rev-parse", "--is-shallow-repository"], path)?;
    Ok(shallow.as_deref() == Some("true"))
}

/// Name of the checked out branch, `None` when detached.
///
/// An unborn branch (no commits yet) is still reported.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn current_branch(path: &Path) -> GoodleResult<Option<String>> {
    match cmd::stdout(&["rev-parse", "--abbrev-ref", "HEAD"], path)? {
        Some(head) if head == "HEAD" => Ok(None),
        Some(branch) => Ok(Some(branch)),
        None => cmd::stdout(&["symbolic-ref", "--quiet", "--short", "HEAD"], path),
    }
}

/// True if `branch` is checked out.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn is_on_branch(path: &Path, branch: &str) -> GoodleResult<bool> {
    Ok(current_branch(path)?.as_deref() == Some(branch))
}

/// True if `refs/heads/<branch>` resolves.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn local_branch_exists(path: &Path, branch: &str) -> GoodleResult<bool> {
    let reference = parse::format_git_branch(branch);
    let output = cmd::output(&["rev-parse", "--quiet", "--verify", &reference], path)?;
    Ok(output.success())
}

/// True if `branch` has an upstream configured.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn has_tracking_branch(path: &Path, branch: &str) -> GoodleResult<bool> {
    let key = format!("branch.{branch}.merge");
    Ok(cmd::output(&["config", "--get", &key], path)?.success())
}

// --- Queries ---

/// Remotes with their fetch and push URLs.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or `remote -v` is malformed.
pub fn remotes(path: &Path) -> GoodleResult<BTreeMap<String, RemoteUrls>> {
    match cmd::stdout(&["remote", "-v"], path)? {
        Some(output) => parse::remotes(&output),
        None => Ok(BTreeMap::new()),
    }
}

/// Fetch URL of `remote`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn remote_url(path: &Path, remote: &str) -> GoodleResult<Option<String>> {
    cmd::stdout(&["remote", "get-url", remote], path)
}

/// Push URL of `remote`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn remote_push_url(path: &Path, remote: &str) -> GoodleResult<Option<String>> {
    cmd::stdout(&["remote", "get-url", "--push", remote], path)
}

/// Local branch names, as listed by `git branch`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn local_branches(path: &Path) -> GoodleResult<Vec<String>> {
    Ok(cmd::stdout(&["branch"], path)?
        .map(|out| parse::local_branches(&out))
        .unwrap_or_default())
}

/// Remote-tracking branches of `remote` known locally.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or the listing is malformed.
pub fn remote_branches(path: &Path, remote: &str) -> GoodleResult<RemoteBranchListing> {
    let pattern = format!("{remote}/*");
    match cmd::stdout(&["branch", "-r", "--list", &pattern], path)? {
        Some(output) => parse::remote_branches(&output, remote),
        None => Ok(RemoteBranchListing::default()),
    }
}

/// Local tags mapped to the sha each points at.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or the listing is malformed.
pub fn local_tags_info(path: &Path) -> GoodleResult<BTreeMap<String, String>> {
    match cmd::stdout(&["show-ref", "--tags"], path)? {
        Some(output) => parse::shas(&output, parse::TAGS_PREFIX),
        None => Ok(BTreeMap::new()),
    }
}

/// Sha of `HEAD`, abbreviated when `short` is set.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn current_head_commit_sha(path: &Path, short: bool) -> GoodleResult<Option<String>> {
    if short {
        cmd::stdout(&["rev-parse", "--short", "HEAD"], path)
    } else {
        cmd::stdout(&["rev-parse", "HEAD"], path)
    }
}

/// Sha that `reference` resolves to.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn sha(path: &Path, reference: &str) -> GoodleResult<Option<String>> {
    cmd::stdout(&["rev-parse", "--verify", "--quiet", reference], path)
}

/// Sha of a local branch, or of `<remote>/<branch>` when a remote is given.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn branch_commit_sha(
    path: &Path,
    branch: &str,
    remote: Option<&str>,
) -> GoodleResult<Option<String>> {
    match remote {
        Some(remote) => sha(path, &format!("{remote}/{branch}")),
        None => sha(path, branch),
    }
}

/// Sha of the commit a tag points at (annotated tags are peeled).
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn tag_commit_sha(path: &Path, tag: &str) -> GoodleResult<Option<String>> {
    cmd::stdout(&["rev-list", "-n", "1", tag], path)
}

/// Target of `<branch>@{upstream}` as `(remote, branch)`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or prints an unexpected ref.
pub fn upstream_branch(path: &Path, branch: &str) -> GoodleResult<Option<(Option<String>, String)>> {
    rev_parse_tracking_branch(path, branch, "upstream")
}

/// Target of `<branch>@{push}` as `(remote, branch)`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or prints an unexpected ref.
pub fn push_branch(path: &Path, branch: &str) -> GoodleResult<Option<(Option<String>, String)>> {
    rev_parse_tracking_branch(path, branch, "push")
}

fn rev_parse_tracking_branch(
    path: &Path,
    branch: &str,
    kind: &str,
) -> GoodleResult<Option<(Option<String>, String)>> {
    let spec = format!("{branch}@{{{kind}}}");
    cmd::stdout(&["rev-parse", "--symbolic-full-name", &spec], path)?
        .filter(|out| !out.is_empty())
        .map(|out| parse::tracking_branch(&out))
        .transpose()
}

/// Full ref name of `branch` (`refs/heads/...`).
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn full_branch_ref(path: &Path, branch: &str) -> GoodleResult<Option<String>> {
    cmd::stdout(&["rev-parse", "--symbolic-full-name", branch], path)
}

/// Committer date of `HEAD` in strict ISO 8601.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn current_timestamp(path: &Path) -> GoodleResult<Option<String>> {
    cmd::stdout(&["log", "-1", "--format=%cI"], path)
}

/// Latest commit of `reference` made before `timestamp`, optionally by `author`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn find_rev_by_timestamp(
    path: &Path,
    timestamp: &str,
    reference: &str,
    author: Option<&str>,
) -> GoodleResult<Option<String>> {
    let before = format!("--before={timestamp}");
    let mut args = vec!["log", "-1", "--format=%H", before.as_str()];
    let author_arg = author.map(|a| format!("--author={a}"));
    if let Some(author_arg) = &author_arg {
        args.push(author_arg.as_str());
    }
    args.push(reference);
    Ok(cmd::stdout(&args, path)?.filter(|sha| !sha.is_empty()))
}

/// Full message of the commit `reference` resolves to.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn commit_message(path: &Path, reference: &str) -> GoodleResult<Option<String>> {
    cmd::stdout(&["log", "--format=%B", "-n", "1", reference], path)
}

/// Number of commits reachable from `second` but not from `first`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or prints a non-number.
pub fn commits_between(path: &Path, first: &str, second: &str) -> GoodleResult<u32> {
    let range = format!("{first}..{second}");
    cmd::stdout(&["rev-list", "--count", &range], path)?
        .map_or(Ok(0), |out| parse::count(&out))
}

/// Commits the current branch is ahead of its upstream, or behind it
/// when `upstream` is set.
///
/// A detached `HEAD` or a branch without upstream counts as zero.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn new_commits_count(path: &Path, upstream: bool) -> GoodleResult<u32> {
    let Some(branch) = current_branch(path)? else {
        return Ok(0);
    };
    let Ok(Some((remote, upstream_name))) = upstream_branch(path, &branch) else {
        return Ok(0);
    };
    let local_sha = branch_commit_sha(path, &branch, None)?;
    let upstream_sha = branch_commit_sha(path, &upstream_name, remote.as_deref())?;
    let (Some(local_sha), Some(upstream_sha)) = (local_sha, upstream_sha) else {
        return Ok(0);
    };

    let range = format!("{local_sha}...{upstream_sha}");
    let counts = cmd::stdout(&["rev-list", "--count", "--left-right", &range], path)?;
    let Some(Ok((ahead, behind))) = counts.map(|out| parse::left_right_count(&out)) else {
        return Ok(0);
    };
    Ok(if upstream { behind } else { ahead })
}

/// Value of a git config key, from any scope.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn config_get(path: &Path, key: &str) -> GoodleResult<Option<String>> {
    cmd::stdout(&["config", "--get", key], path)
}

// --- Remote default branch cache ---

fn default_branch_file(path: &Path, remote: &str) -> Option<PathBuf> {
    git_dir(path).map(|dir| dir.join("refs").join("remotes").join(remote).join("HEAD"))
}

/// Default branch of `remote` as cached in `refs/remotes/<remote>/HEAD`.
///
/// # Errors
///
/// Returns an error if the cache file exists but cannot be read.
pub fn default_branch(path: &Path, remote: &str) -> GoodleResult<Option<String>> {
    let Some(file) = default_branch_file(path, remote) else {
        return Ok(None);
    };
    let contents = match fs::read_to_string(&file) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let prefix = format!("ref: {}", parse::format_git_remote_branch(remote, ""));
    Ok(contents
        .trim()
        .strip_prefix(&prefix)
        .filter(|branch| !branch.is_empty())
        .map(String::from))
}

/// Write the default-branch cache file unless it already exists.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_default_branch(path: &Path, remote: &str, branch: &str) -> GoodleResult<()> {
    let Some(file) = default_branch_file(path, remote) else {
        return Ok(());
    };
    if file.exists() {
        return Ok(());
    }
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    let target = parse::format_git_remote_branch(remote, branch);
    fs::write(&file, format!("ref: {target}\n"))?;
    debug!(remote, branch, file = %file.display(), "cached default branch");
    Ok(())
}

// --- Submodules ---

/// Where submodule configuration is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleSource {
    /// `.gitmodules` in the working tree
    Declared,
    /// `config` in the git directory
    Initialized,
}

/// True if the repository declares submodules.
#[must_use]
pub fn has_submodules(path: &Path) -> bool {
    path.join(".gitmodules").is_file()
}

/// Submodule records from one configuration source.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or a line is malformed.
pub fn submodule_info(path: &Path, source: SubmoduleSource) -> GoodleResult<SubmoduleInfo> {
    let file = match source {
        SubmoduleSource::Declared => Some(path.join(".gitmodules")),
        SubmoduleSource::Initialized => git_dir(path).map(|dir| dir.join("config")),
    };
    let Some(file) = file.filter(|f| f.is_file()) else {
        return Ok(SubmoduleInfo::new());
    };

    let file = path_arg(&file);
    let output = cmd::stdout(
        &["config", "--file", &file, "--get-regexp", r"^submodule\."],
        path,
    )?;
    let output = output.unwrap_or_default();
    // `submodule.active` and `submodule.recurse` are not per-submodule keys
    let per_submodule = output.lines().filter(|line| {
        line.split_whitespace()
            .next()
            .is_some_and(|key| key.matches('.').count() >= 2)
    });
    parse::submodules(per_submodule)
}

/// Declared submodule records overlaid with the initialized ones.
///
/// # Errors
///
/// See [`submodule_info`].
pub fn merged_submodule_info(path: &Path) -> GoodleResult<SubmoduleInfo> {
    let mut merged = submodule_info(path, SubmoduleSource::Declared)?;
    for (name, values) in submodule_info(path, SubmoduleSource::Initialized)? {
        merged.entry(name).or_default().extend(values);
    }
    Ok(merged)
}

fn submodule_name_for_path(info: &SubmoduleInfo, submodule_path: &Path) -> Option<String> {
    info.iter()
        .find(|(_, values)| {
            values
                .get("path")
                .is_some_and(|p| Path::new(p) == submodule_path)
        })
        .map(|(name, _)| name.clone())
}

/// Sha recorded by the superproject for `submodule_path`.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn submodule_commit(path: &Path, submodule_path: &Path) -> GoodleResult<Option<String>> {
    let submodule_path = path_arg(submodule_path);
    Ok(cmd::stdout(&["ls-tree", "HEAD", &submodule_path], path)?
        .and_then(|out| parse::ls_tree_sha(&out)))
}

/// True if the submodule at `submodule_path` is registered in the local config.
///
/// # Errors
///
/// See [`submodule_info`].
pub fn is_submodule_initialized(path: &Path, submodule_path: &Path) -> GoodleResult<bool> {
    let declared = submodule_info(path, SubmoduleSource::Declared)?;
    let Some(name) = submodule_name_for_path(&declared, submodule_path) else {
        return Ok(false);
    };
    let initialized = submodule_info(path, SubmoduleSource::Initialized)?;
    Ok(initialized.get(&name).is_some_and(|v| v.contains_key("url")))
}

/// True if the submodule is initialized and its git directory is populated.
///
/// # Errors
///
/// See [`submodule_info`].
pub fn is_submodule_cloned(path: &Path, submodule_path: &Path) -> GoodleResult<bool> {
    if !is_submodule_initialized(path, submodule_path)? {
        return Ok(false);
    }
    Ok(git_dir(&path.join(submodule_path)).is_some_and(|dir| is_non_empty_dir(&dir)))
}

/// Register submodules in the local config (`git submodule init`).
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_init(path: &Path, paths: &[&Path]) -> GoodleResult<()> {
    let paths: Vec<String> = paths.iter().map(|p| path_arg(p)).collect();
    let mut args = vec!["submodule", "init"];
    if !paths.is_empty() {
        args.push("--");
        args.extend(paths.iter().map(String::as_str));
    }
    cmd::run(&args, path).map(drop)
}

/// Unregister a submodule and remove its working tree.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_deinit(path: &Path, submodule_path: &Path, force: bool) -> GoodleResult<()> {
    let submodule_path = path_arg(submodule_path);
    let mut args = vec!["submodule", "deinit"];
    if force {
        args.push("--force");
    }
    args.extend(["--", submodule_path.as_str()]);
    cmd::run(&args, path).map(drop)
}

/// Copy submodule URLs from `.gitmodules` into the local config.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_sync(path: &Path, recursive: bool) -> GoodleResult<()> {
    let mut args = vec!["submodule", "sync"];
    if recursive {
        args.push("--recursive");
    }
    cmd::run(&args, path).map(drop)
}

/// Set the branch a submodule tracks.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_set_branch(path: &Path, submodule_path: &Path, branch: &str) -> GoodleResult<()> {
    let submodule_path = path_arg(submodule_path);
    cmd::run(
        &["submodule", "set-branch", "--branch", branch, "--", &submodule_path],
        path,
    )
    .map(drop)
}

/// Reset a submodule to track the remote's default branch.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_unset_branch(path: &Path, submodule_path: &Path) -> GoodleResult<()> {
    let submodule_path = path_arg(submodule_path);
    cmd::run(
        &["submodule", "set-branch", "--default", "--", &submodule_path],
        path,
    )
    .map(drop)
}

/// Change the URL of a submodule.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_set_url(path: &Path, submodule_path: &Path, url: &str) -> GoodleResult<()> {
    let submodule_path = path_arg(submodule_path);
    cmd::run(&["submodule", "set-url", "--", &submodule_path, url], path).map(drop)
}

/// Move submodule git directories into the superproject's git directory.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_absorb_git_dirs(path: &Path) -> GoodleResult<()> {
    cmd::run(&["submodule", "absorbgitdirs"], path).map(drop)
}

/// Add a new submodule.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn submodule_add(
    path: &Path,
    url: &str,
    submodule_path: &Path,
    branch: Option<&str>,
) -> GoodleResult<()> {
    let submodule_path = path_arg(submodule_path);
    let mut args = vec!["submodule", "add"];
    if let Some(branch) = branch {
        args.extend(["--branch", branch]);
    }
    args.extend(["--", url, submodule_path.as_str()]);
    cmd::run(&args, path).map(drop)
}

/// Run a shell command in every checked out submodule.
///
/// # Errors
///
/// Returns an error if the command fails in any submodule.
pub fn submodule_foreach(path: &Path, command: &str, recursive: bool) -> GoodleResult<()> {
    let mut args = vec!["submodule", "foreach"];
    if recursive {
        args.push("--recursive");
    }
    args.push(command);
    cmd::run(&args, path).map(drop)
}

/// `git clean -ffdx` in every submodule.
///
/// # Errors
///
/// Returns an error if the command fails in any submodule.
pub fn clean_submodules(path: &Path, recursive: bool) -> GoodleResult<()> {
    submodule_foreach(path, "git clean -ffdx", recursive)
}

/// `git reset --hard` in every submodule.
///
/// # Errors
///
/// Returns an error if the command fails in any submodule.
pub fn reset_submodules(path: &Path, recursive: bool) -> GoodleResult<()> {
    submodule_foreach(path, "git reset --hard", recursive)
}

// --- Mutations ---

/// Create `branch` at `HEAD`.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn create_local_branch(path: &Path, branch: &str) -> GoodleResult<()> {
    create_local_branch_at(path, branch, "HEAD")
}

/// Create `branch` at `start_point` (a commit, branch or `<remote>/<branch>`).
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn create_local_branch_at(path: &Path, branch: &str, start_point: &str) -> GoodleResult<()> {
    cmd::run(&["branch", "--no-track", branch, start_point], path).map(drop)
}

/// Delete a local branch; `force` also deletes unmerged branches.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn delete_local_branch(path: &Path, branch: &str, force: bool) -> GoodleResult<()> {
    let flag = if force { "-D" } else { "-d" };
    cmd::run(&["branch", flag, branch], path).map(drop)
}

/// Create a lightweight tag at `target` (default `HEAD`).
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn create_local_tag(path: &Path, tag: &str, target: Option<&str>) -> GoodleResult<()> {
    cmd::run(&["tag", tag, target.unwrap_or("HEAD")], path).map(drop)
}

/// Delete a local tag.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn delete_local_tag(path: &Path, tag: &str) -> GoodleResult<()> {
    cmd::run(&["tag", "--delete", tag], path).map(drop)
}

/// Point `branch` at `upstream` (on `remote`, if given).
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn set_upstream_branch(
    path: &Path,
    branch: &str,
    upstream: &str,
    remote: Option<&str>,
) -> GoodleResult<()> {
    let target = match remote {
        Some(remote) => format!("--set-upstream-to={remote}/{upstream}"),
        None => format!("--set-upstream-to={upstream}"),
    };
    cmd::run(&["branch", &target, branch], path).map(drop)
}

/// Remove every value of a local config key; a missing key is not an error.
///
/// # Errors
///
/// Returns an error if git exits with a code other than 0 or 5.
pub fn git_config_unset_all_local(path: &Path, key: &str) -> GoodleResult<()> {
    match cmd::run(&["config", "--local", "--unset-all", key], path) {
        Ok(_) => Ok(()),
        Err(err) if err.command_exit_code() == Some(CONFIG_KEY_MISSING) => {
            debug!(key, "config key already absent");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Append a value to a local config key.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn git_config_add_local(path: &Path, key: &str, value: &str) -> GoodleResult<()> {
    cmd::run(&["config", "--local", "--add", key, value], path).map(drop)
}

/// Check out a branch, tag or commit.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn checkout(path: &Path, reference: &str) -> GoodleResult<()> {
    cmd::run(&["checkout", reference], path).map(drop)
}

/// Reset `HEAD` to `reference`, discarding working tree changes if `hard`.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn reset(path: &Path, reference: &str, hard: bool) -> GoodleResult<()> {
    if hard {
        cmd::run(&["reset", "--hard", reference], path).map(drop)
    } else {
        cmd::run(&["reset", reference], path).map(drop)
    }
}

/// Hard reset to the last commit of `reference` made before `timestamp`.
///
/// # Errors
///
/// Returns an error if the reset fails or no commit matches.
pub fn reset_timestamp(
    path: &Path,
    timestamp: &str,
    reference: &str,
    author: Option<&str>,
) -> GoodleResult<()> {
    let sha = find_rev_by_timestamp(path, timestamp, reference, author)?.ok_or_else(|| {
        GoodleError::other(format!("no commit on {reference} before {timestamp}"))
    })?;
    reset(path, &sha, true)
}

bitflags! {
    /// Switches for `git clean`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CleanFlags: u32 {
        /// `-d`: recurse into untracked directories
        const DIRECTORIES = 0x01;
        /// `-f`: required by git to delete anything
        const FORCE = 0x02;
        /// `-X`: remove only ignored files
        const IGNORED_ONLY = 0x04;
        /// `-x`: also remove ignored files
        const IGNORED = 0x08;
    }
}

/// Remove untracked files.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn clean(path: &Path, flags: CleanFlags) -> GoodleResult<()> {
    let mut args = vec!["clean"];
    for (flag, arg) in [
        (CleanFlags::DIRECTORIES, "-d"),
        (CleanFlags::FORCE, "-f"),
        (CleanFlags::IGNORED_ONLY, "-X"),
        (CleanFlags::IGNORED, "-x"),
    ] {
        if flags.contains(flag) {
            args.push(arg);
        }
    }
    cmd::run(&args, path).map(drop)
}

/// Stash working tree changes.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn stash(path: &Path) -> GoodleResult<()> {
    cmd::run(&["stash"], path).map(drop)
}

/// Stage files.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn add(path: &Path, files: &[&str]) -> GoodleResult<()> {
    let mut args = vec!["add", "--"];
    args.extend_from_slice(files);
    cmd::run(&args, path).map(drop)
}

/// Commit the index.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn commit(path: &Path, message: &str) -> GoodleResult<()> {
    cmd::run(&["commit", "-m", message], path).map(drop)
}

/// Abort a stopped rebase.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn abort_rebase(path: &Path) -> GoodleResult<()> {
    cmd::run(&["rebase", "--abort"], path).map(drop)
}

/// Print `git status` to the terminal.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn status(path: &Path, verbose: bool) -> GoodleResult<()> {
    if verbose {
        cmd::display(&["status", "--verbose"], path)
    } else {
        cmd::display(&["status", "--short", "--branch"], path)
    }
}

/// Add a remote, optionally fetching it (and its tags) right away.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn create_remote(path: &Path, name: &str, url: &str, fetch: bool, tags: bool) -> GoodleResult<()> {
    let mut args = vec!["remote", "add"];
    if fetch {
        args.push("-f");
    }
    if tags {
        args.push("--tags");
    }
    args.extend([name, url]);
    cmd::run(&args, path).map(drop)
}

/// Install the Git LFS hooks into this repository only.
///
/// # Errors
///
/// Returns an error if `git lfs install` fails, including when Git LFS is
/// not installed.
pub fn install_lfs_hooks(path: &Path) -> GoodleResult<()> {
    cmd::run(&["lfs", "install", "--local"], path).map(drop)
}

/// Rename a remote.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn rename_remote(path: &Path, old_name: &str, new_name: &str) -> GoodleResult<()> {
    cmd::run(&["remote", "rename", old_name, new_name], path).map(drop)
}

/// True if `refname` is acceptable to `git check-ref-format`.
///
/// One-level names are allowed so bare shas validate.
///
/// # Errors
///
/// Returns an error if git cannot be spawned.
pub fn check_ref_format(refname: &str) -> GoodleResult<bool> {
    let output = cmd::output_in(
        &["check-ref-format", "--allow-onelevel", "--normalize", refname],
        None,
    )?;
    Ok(output.success())
}
