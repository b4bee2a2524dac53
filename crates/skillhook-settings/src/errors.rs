//! Settings error types.

use thiserror::Error;

/// Errors that can occur while resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No project root could be determined from any source.
    #[error("cannot determine project root: {0}")]
    ProjectRoot(#[source] std::io::Error),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
