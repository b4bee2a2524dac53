//! Error types for rule loading and trigger compilation.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::MatchType;

/// Errors that can occur while loading a rule set.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The rules file does not exist. Benign: the project has no rules yet.
    #[error("rules file not found: {}", path.display())]
    NotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// The rules file exists but could not be read.
    #[error("failed to read rules file {}: {source}", path.display())]
    Io {
        /// Path of the rules file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rules file is not valid JSON (or not a JSON object).
    #[error("failed to parse skill-rules.json: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level `skills` mapping is absent or not an object.
    #[error("skill-rules.json missing or invalid skills object")]
    MissingSkills,
}

impl RulesError {
    /// Whether this error means "no rules configured" rather than a broken file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A single trigger pattern that failed to compile.
///
/// Only the offending trigger is skipped; the rest of the rule and the rest
/// of the rule set are still evaluated.
#[derive(Debug, Error)]
#[error("invalid {kind} pattern in {rule}: {pattern}: {source}")]
pub struct TriggerError {
    /// Name of the skill or agent that owns the pattern.
    pub rule: String,
    /// Which trigger kind the pattern belongs to.
    pub kind: MatchType,
    /// Pattern as written in the rules file.
    pub pattern: String,
    /// Regex compilation error.
    #[source]
    pub source: regex::Error,
}
