//! Keyword triggers: literal words matched on word boundaries.

use regex::{Regex, RegexBuilder};

use crate::errors::TriggerError;
use crate::types::MatchType;

/// Compile a keyword into a case-insensitive whole-word regex.
///
/// The keyword is lower-cased and every regex metacharacter escaped, so
/// `"c++"` and `"node.js"` are matched literally. `"go"` matches `"go fish"`
/// but not `"going"`.
pub fn compile_keyword(rule: &str, keyword: &str) -> Result<Regex, TriggerError> {
    let escaped = regex::escape(&keyword.to_lowercase());
    RegexBuilder::new(&format!(r"\b{escaped}\b"))
        .case_insensitive(true)
        .build()
        .map_err(|source| TriggerError {
            rule: rule.to_string(),
            kind: MatchType::Keyword,
            pattern: keyword.to_string(),
            source,
        })
}
