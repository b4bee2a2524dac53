//! Hook error types.

use skillhook_rules::RulesError;
use thiserror::Error;

/// Errors that can end a hook run early.
///
/// None of these reach the host as a failure: the runner logs them and
/// exits without output.
#[derive(Debug, Error)]
pub enum HookError {
    /// Stdin could not be read or the envelope could not be written.
    #[error("hook I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stdin was not a valid hook input record.
    #[error("invalid hook input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// The rule set could not be loaded.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// The output envelope could not be serialized.
    #[error("failed to serialize hook output: {0}")]
    Serialize(#[source] serde_json::Error),
}
