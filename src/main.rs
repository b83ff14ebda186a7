// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Options | Clone | Fetch | Pull | Update | Status | Branches
//! ```

use std::process::ExitCode;

use goodle::cli::{self, Command};
use goodle::cmd::branches::run_branches_command;
use goodle::cmd::config::run_options_command;
use goodle::cmd::repo::{
    run_clone_command, run_fetch_command, run_pull_command, run_status_command,
    run_update_command,
};
use goodle::config::Config;
use goodle::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };
    if matches!(command, Command::Version) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let (config, config_files) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(command, &config, &config_files).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(
    command: &Command,
    config: &Config,
    config_files: &[String],
) -> goodle::error::Result<()> {
    match command {
        Command::Version => {
            handle_version_command();
            Ok(())
        }
        Command::Options => {
            run_options_command(config, config_files);
            Ok(())
        }
        Command::Clone(args) => run_clone_command(args, config).await,
        Command::Fetch(args) => run_fetch_command(args, config).await,
        Command::Pull(args) => run_pull_command(args, config).await,
        Command::Update(args) => run_update_command(args, config).await,
        Command::Status(args) => run_status_command(args, config).await,
        Command::Branches(args) => run_branches_command(args, config),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(
    global: &cli::global::GlobalOptions,
) -> goodle::error::Result<(Config, Vec<String>)> {
    let loader = global.config_loader()?;
    let files = loader.format_loaded_files();
    Ok((loader.build()?, files))
}
