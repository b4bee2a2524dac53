//! `check` and `explain`: tools for people writing `skill-rules.json`.
//!
//! Unlike hook mode these report failures loudly and exit non-zero.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use skillhook_hooks::{evaluate, render_advisory};
use skillhook_rules::{RuleSet, TriggerError, TriggerInput, compile_all, load_rules};
use skillhook_settings::HookSettings;

/// Layer `--project-dir` over the environment settings.
///
/// An explicit directory also rescues a failed environment lookup; the
/// environment's log level is kept when it resolved.
pub fn apply_project_dir(
    from_env: skillhook_settings::Result<HookSettings>,
    project_dir: Option<PathBuf>,
) -> skillhook_settings::Result<HookSettings> {
    match project_dir {
        Some(dir) => Ok(match from_env {
            Ok(settings) => settings.with_project_dir(dir),
            Err(_) => HookSettings::new(dir),
        }),
        None => from_env,
    }
}

/// Settings for a command, with `--project-dir` taking precedence.
pub fn resolve_settings(
    from_env: skillhook_settings::Result<HookSettings>,
    project_dir: Option<PathBuf>,
) -> Result<HookSettings> {
    apply_project_dir(from_env, project_dir).context("failed to resolve project directory")
}

/// Result of `check`.
#[derive(Debug)]
pub struct CheckReport {
    /// Loaded rule set.
    pub rules: RuleSet,
    /// Trigger patterns that failed to compile.
    pub trigger_errors: Vec<TriggerError>,
}

impl CheckReport {
    /// Number of problems found.
    pub fn problem_count(&self) -> usize {
        self.rules.rejected.len() + self.trigger_errors.len()
    }

    /// Whether the rules file is entirely usable.
    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

fn load(settings: &HookSettings) -> Result<RuleSet> {
    let path = settings.rules_path();
    load_rules(&path).with_context(|| format!("cannot load rules from {}", path.display()))
}

/// Load the rules file, compile every trigger, and write a report to `out`.
///
/// A missing or malformed file is an error; rejected rules and bad patterns
/// are listed in the report.
pub fn check(settings: &HookSettings, out: &mut impl Write) -> Result<CheckReport> {
    let rules = load(settings)?;
    let trigger_errors = compile_all(&rules);
    let report = CheckReport {
        rules,
        trigger_errors,
    };

    writeln!(out, "project: {}", settings.project_dir().display())?;
    writeln!(out, "rules: {}", settings.rules_path().display())?;
    if let Some(version) = &report.rules.version {
        writeln!(out, "version: {version}")?;
    }
    writeln!(
        out,
        "skills: {}, agents: {}",
        report.rules.skills.len(),
        report.rules.agents.len()
    )?;
    for rejected in &report.rules.rejected {
        writeln!(
            out,
            "rejected {} {}: {}",
            rejected.kind, rejected.name, rejected.reason
        )?;
    }
    for error in &report.trigger_errors {
        writeln!(out, "{error}")?;
    }
    match report.problem_count() {
        0 => writeln!(out, "ok")?,
        1 => writeln!(out, "1 problem")?,
        n => writeln!(out, "{n} problems")?,
    }

    Ok(report)
}

/// Evaluate `prompt` and write each match followed by the advisory text.
pub fn explain(
    settings: &HookSettings,
    prompt: &str,
    cwd: &str,
    out: &mut impl Write,
) -> Result<()> {
    let rules = load(settings)?;
    let matches = evaluate(&rules, &TriggerInput::new(prompt, cwd));

    let Some(text) = render_advisory(&matches) else {
        writeln!(out, "no matches")?;
        return Ok(());
    };

    for m in matches.iter() {
        writeln!(
            out,
            "{} {} {} {}",
            m.rule.kind(),
            m.name,
            m.priority(),
            m.match_type
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{text}")?;
    Ok(())
}
