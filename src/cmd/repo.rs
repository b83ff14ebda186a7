// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-repository commands.
//!
//! ```text
//! config.select(names) --> RepoTask per repo --> TaskPool(jobs) --> reports
//! ```
//!
//! Ctrl+C cancels the pool; running git processes finish first.

use std::sync::Arc;

use anyhow::Context;

use crate::cli::repo::{CloneArgs, FetchArgs, PullArgs, StatusArgs, UpdateArgs};
use crate::config::{Config, RepoConfig};
use crate::error::{GoodleResult, Result};
use crate::git::model::Repo;
use crate::task::{PoolObserver, ProgressObserver, RepoAction, RepoReport, RepoTask, TaskPool};

/// One task per selected repository.
///
/// # Errors
///
/// Returns an error for an unknown repository name or if `action` rejects a
/// repository.
pub fn repo_tasks<F>(config: &Config, names: &[String], action: F) -> Result<Vec<RepoTask>>
where
    F: Fn(&RepoConfig) -> GoodleResult<RepoAction>,
{
    config
        .select(names)?
        .into_iter()
        .map(|repo_config| -> Result<RepoTask> {
            let path = config.repo_path(repo_config);
            let repo = Repo::new(&path, Some(config.repo_remote(repo_config)))?;
            let action = action(repo_config)
                .with_context(|| format!("repository '{}'", repo_config.name))?;
            Ok(RepoTask::new(repo, action).with_name(&repo_config.name))
        })
        .collect()
}

/// Run `tasks` through a pool sized and silenced per `config`.
///
/// # Errors
///
/// Returns the first task failure.
pub async fn run_repo_tasks(config: &Config, tasks: Vec<RepoTask>) -> Result<Vec<RepoReport>> {
    if tasks.is_empty() {
        tracing::warn!("no repositories configured");
        return Ok(Vec::new());
    }

    let progress: Arc<dyn PoolObserver> = if config.global.quiet {
        Arc::new(ProgressObserver::new())
    } else {
        Arc::new(ProgressObserver::hidden())
    };
    let pool = TaskPool::new(config.global.jobs)
        .with_quiet(config.global.quiet)
        .with_observer(progress);

    let cancel_token = pool.cancel_token();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, cancelling remaining repositories...");
            cancel_token.cancel();
        }
    });

    let result = pool.run(tasks).await;
    ctrl_c.abort();

    let mut reports = result?;
    reports.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(reports)
}

/// Handler for `clone`.
///
/// # Errors
///
/// Returns an error if a repository has no URL, options conflict, or a clone
/// fails.
pub async fn run_clone_command(args: &CloneArgs, config: &Config) -> Result<()> {
    let mut git = config.git.clone();
    if args.depth.is_some() {
        git.depth = args.depth;
    }
    git.blobless |= args.blobless;
    git.treeless |= args.treeless;
    git.single_branch |= args.single_branch;

    let tasks = repo_tasks(config, &args.repos, |repo| {
        Ok(RepoAction::Clone {
            url: repo.require_url()?.to_string(),
            options: git.clone_options(repo.branch.as_deref())?,
        })
    })?;
    let reports = run_repo_tasks(config, tasks).await?;
    tracing::info!("{} repositories cloned or already present", reports.len());
    Ok(())
}

/// Handler for `fetch`.
///
/// # Errors
///
/// Returns an error if a fetch fails.
pub async fn run_fetch_command(args: &FetchArgs, config: &Config) -> Result<()> {
    let (prune, tags) = (args.prune, args.tags);
    let tasks = repo_tasks(config, &args.repos, |_| Ok(RepoAction::Fetch { prune, tags }))?;
    run_repo_tasks(config, tasks).await.map(drop)
}

/// Handler for `pull`.
///
/// # Errors
///
/// Returns an error if a pull fails.
pub async fn run_pull_command(args: &PullArgs, config: &Config) -> Result<()> {
    let rebase = args.rebase;
    let tasks = repo_tasks(config, &args.repos, |_| Ok(RepoAction::Pull { rebase }))?;
    run_repo_tasks(config, tasks).await.map(drop)
}

/// Handler for `update`.
///
/// # Errors
///
/// Returns an error if strategies conflict or a submodule update fails.
pub async fn run_update_command(args: &UpdateArgs, config: &Config) -> Result<()> {
    let mut git = config.git.clone();
    if args.checkout || args.rebase || args.merge {
        git.checkout = args.checkout;
        git.rebase = args.rebase;
        git.merge = args.merge;
    }
    let mut options = git.submodule_update_options()?;
    options.remote = args.remote;

    let tasks = repo_tasks(config, &args.repos, |_| {
        Ok(RepoAction::UpdateSubmodules(options.clone()))
    })?;
    run_repo_tasks(config, tasks).await.map(drop)
}

/// Handler for `status`.
///
/// # Errors
///
/// Returns an error if a repository cannot be inspected.
pub async fn run_status_command(args: &StatusArgs, config: &Config) -> Result<()> {
    let tasks = repo_tasks(config, &args.repos, |_| Ok(RepoAction::Status))?;
    let reports = run_repo_tasks(config, tasks).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for line in format_status(&reports) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One aligned line per report: name, branch, short sha and flags.
#[must_use]
pub fn format_status(reports: &[RepoReport]) -> Vec<String> {
    let width = reports.iter().map(|r| r.name.len()).max().unwrap_or(0);
    reports
        .iter()
        .map(|report| {
            let Some(status) = &report.status else {
                return format!("{:<width$}  -", report.name);
            };
            if status.commit.is_none() && status.branch.is_none() {
                return format!("{:<width$}  (not cloned)", report.name);
            }

            let branch = status.branch.as_deref().unwrap_or("(detached)");
            let commit = status.commit.as_deref().unwrap_or("-");
            let mut flags = Vec::new();
            if status.dirty {
                flags.push("dirty".to_string());
            }
            if status.untracked {
                flags.push("untracked".to_string());
            }
            if status.shallow {
                flags.push("shallow".to_string());
            }
            if status.ahead > 0 {
                flags.push(format!("ahead {}", status.ahead));
            }
            if status.behind > 0 {
                flags.push(format!("behind {}", status.behind));
            }

            let line = format!("{:<width$}  {branch} {commit}", report.name);
            if flags.is_empty() {
                line
            } else {
                format!("{line} [{}]", flags.join(", "))
            }
        })
        .collect()
}
