//! Path triggers: glob patterns over the working path.
//!
//! Translation rules, applied left to right in one pass:
//! - `**` → `.*` (any run of characters, separators included)
//! - `*` → `[^/]*` (any run within one path segment)
//! - `?` → `.` (exactly one character)
//!
//! Every other character is copied through as regex syntax, so `[ab]`
//! classes work and a malformed class is a compile error. The resulting
//! regex is unanchored and case-insensitive.

use regex::{Regex, RegexBuilder};

use crate::errors::TriggerError;
use crate::types::MatchType;

/// Translate a glob into regex source.
pub fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                let _ = chars.next();
                out.push_str(".*");
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push('.'),
            other => out.push(other),
        }
    }
    out
}

/// Compile a glob into a case-insensitive path matcher.
pub fn compile_glob(rule: &str, pattern: &str) -> Result<Regex, TriggerError> {
    RegexBuilder::new(&glob_to_regex(pattern))
        .case_insensitive(true)
        .build()
        .map_err(|source| TriggerError {
            rule: rule.to_string(),
            kind: MatchType::File,
            pattern: pattern.to_string(),
            source,
        })
}
