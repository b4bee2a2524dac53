//! # skillhook
//!
//! Entry point. Hook mode is the default and always exits 0, even on
//! arguments it does not understand; `check` and `explain` are for rule
//! authors.

#![deny(unsafe_code)]

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use skillhook_agent::cli::{Cli, Command, Invocation, parse_invocation};
use skillhook_agent::commands;
use skillhook_core::logging::{DEFAULT_LOG_LEVEL, init_subscriber};
use skillhook_hooks::run_hook;
use skillhook_settings::HookSettings;
use tracing::{debug, warn};

fn main() -> Result<ExitCode> {
    let (cli, ignored_args) = match parse_invocation(std::env::args_os()) {
        Invocation::Run(cli) => (cli, None),
        Invocation::Exit(e) => e.exit(),
        Invocation::HookFallback(e) => (Cli::hook(), Some(e)),
    };

    // Settings first: they carry the log level.
    let settings = HookSettings::from_env().map(|s| match &cli.log_level {
        Some(level) => s.with_log_level(level),
        None => s,
    });
    let level = settings.as_ref().map_or_else(
        |_| cli.log_level.clone().unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        |s| s.log_level.clone(),
    );
    init_subscriber(&level);

    if let Some(e) = ignored_args {
        warn!(error = %e.kind(), "unrecognized arguments, running as plain hook");
    }

    match cli.subcommand() {
        Command::Hook { project_dir } => {
            match commands::apply_project_dir(settings, project_dir) {
                Ok(settings) => {
                    let outcome = run_hook(&settings, io::stdin().lock(), io::stdout().lock());
                    debug!(?outcome, "hook finished");
                }
                Err(e) => warn!(error = %e, "cannot resolve project directory, skipping hook"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { project_dir } => {
            let settings = commands::resolve_settings(settings, project_dir)?;
            let report = commands::check(&settings, &mut io::stdout().lock())?;
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Explain {
            prompt,
            cwd,
            project_dir,
        } => {
            let settings = commands::resolve_settings(settings, project_dir)?;
            commands::explain(&settings, &prompt, &cwd, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
