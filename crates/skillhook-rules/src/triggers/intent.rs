//! Intent triggers: author-supplied regexes over the prompt.

use regex::{Regex, RegexBuilder};

use crate::errors::TriggerError;
use crate::types::MatchType;

/// Compile an intent pattern case-insensitively.
///
/// Patterns use `regex` crate syntax. Look-around and backreferences are not
/// supported and surface as a [`TriggerError`].
pub fn compile_intent(rule: &str, pattern: &str) -> Result<Regex, TriggerError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| TriggerError {
            rule: rule.to_string(),
            kind: MatchType::Intent,
            pattern: pattern.to_string(),
            source,
        })
}
