//! # skillhook-settings
//!
//! Settings for one hook invocation, resolved once at process start and
//! threaded through explicitly.
//!
//! Layers (in priority order):
//! 1. **Explicit overrides** from the command line ([`HookSettings::with_project_dir`])
//! 2. **Environment variables**: `CLAUDE_PROJECT_DIR`, `SKILLHOOK_LOG`
//! 3. **Fallbacks**: project root derived from the executable's location
//!    (`<root>/.claude/hooks/<binary>`), then the current directory

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;

pub use errors::{Result, SettingsError};
pub use loader::{
    LOG_LEVEL_ENV, PROJECT_DIR_ENV, RULES_RELATIVE_PATH, project_dir_from_exe,
    resolve_project_dir,
};

use std::path::{Path, PathBuf};

use skillhook_core::logging::DEFAULT_LOG_LEVEL;

/// Resolved settings for a hook run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSettings {
    /// Project root containing `.claude/skills/skill-rules.json`.
    pub project_dir: PathBuf,
    /// Tracing filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl HookSettings {
    /// Settings rooted at `project_dir` with the default log level.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self> {
        loader::load_settings()
    }

    /// Replace the project root (e.g. from `--project-dir`).
    #[must_use]
    pub fn with_project_dir(mut self, project_dir: impl Into<PathBuf>) -> Self {
        self.project_dir = project_dir.into();
        self
    }

    /// Replace the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Path of the rules file under the project root.
    pub fn rules_path(&self) -> PathBuf {
        self.project_dir.join(RULES_RELATIVE_PATH)
    }

    /// The project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}
