//! Hook wire types.
//!
//! [`HookInput`] is what the host writes to stdin (snake_case fields).
//! [`HookOutput`] is the envelope written back to stdout (camelCase fields).

use serde::{Deserialize, Serialize};

/// Invocation record supplied by the host on stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookInput {
    /// Host session identifier. Unused.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Path to the conversation transcript. Unused.
    #[serde(default)]
    pub transcript_path: Option<String>,
    /// Working path for file triggers. Missing or `null` means empty.
    #[serde(default)]
    pub cwd: Option<String>,
    /// Host permission mode. Unused.
    #[serde(default)]
    pub permission_mode: Option<String>,
    /// The prompt the user submitted.
    pub prompt: String,
}

impl HookInput {
    /// Parse an input record from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Working path, or `""` when absent.
    pub fn working_path(&self) -> &str {
        self.cwd.as_deref().unwrap_or_default()
    }
}

/// Hook event this binary answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookEventName {
    /// Fired when a user submits a prompt.
    UserPromptSubmit,
}

/// Event-specific part of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Always [`HookEventName::UserPromptSubmit`].
    pub hook_event_name: HookEventName,
    /// Advisory text the host adds to the model's context.
    pub additional_context: String,
}

/// Envelope written to stdout when at least one rule matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Event-specific output.
    pub hook_specific_output: HookSpecificOutput,
}

impl HookOutput {
    /// Wrap advisory text for a `UserPromptSubmit` response.
    pub fn user_prompt_submit(additional_context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: HookEventName::UserPromptSubmit,
                additional_context: additional_context.into(),
            },
        }
    }

    /// Compact JSON, as written to stdout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
