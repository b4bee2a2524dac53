//! Settings resolution from the environment.
//!
//! Resolution flow:
//! 1. `CLAUDE_PROJECT_DIR`, when set and non-empty, names the project root
//! 2. Otherwise the root is derived from the executable's own path: the hook
//!    binary is installed as `<root>/.claude/hooks/<binary>`
//! 3. Otherwise the current directory
//!
//! The log level comes from `SKILLHOOK_LOG`, falling back to `warn`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::HookSettings;
use crate::errors::{Result, SettingsError};

/// Environment variable naming the project root.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Environment variable holding the tracing filter.
pub const LOG_LEVEL_ENV: &str = "SKILLHOOK_LOG";

/// Rules file location relative to the project root.
pub const RULES_RELATIVE_PATH: &str = ".claude/skills/skill-rules.json";

/// Build [`HookSettings`] from the process environment.
pub fn load_settings() -> Result<HookSettings> {
    let exe = std::env::current_exe().ok();
    let cwd = std::env::current_dir();
    let project_dir = resolve_project_dir(read_env_string(PROJECT_DIR_ENV), exe.as_deref(), cwd)?;

    let mut settings = HookSettings::new(project_dir);
    if let Some(level) = read_env_string(LOG_LEVEL_ENV) {
        settings.log_level = level;
    }
    debug!(project_dir = %settings.project_dir.display(), "resolved hook settings");
    Ok(settings)
}

// ── Pure resolution functions (testable without env vars) ──

/// Pick the project root from the available sources, highest priority first.
pub fn resolve_project_dir(
    env_override: Option<String>,
    exe: Option<&Path>,
    cwd: std::io::Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = env_override.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = exe.and_then(project_dir_from_exe) {
        return Ok(dir);
    }
    cwd.map_err(SettingsError::ProjectRoot)
}

/// Project root for an executable installed at `<root>/.claude/hooks/<binary>`.
///
/// Returns `None` when the path is too shallow to have a grandparent
/// directory.
pub fn project_dir_from_exe(exe: &Path) -> Option<PathBuf> {
    let hooks_dir = exe.parent()?;
    let claude_dir = hooks_dir.parent()?;
    let root = claude_dir.parent()?;
    Some(root.to_path_buf())
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
