//! Trigger compilation and per-rule matching.
//!
//! Each trigger kind has one compile function returning
//! `Result<Regex, TriggerError>`. Matching compiles lazily and stops at the
//! first hit, so a bad pattern is only reported when it is actually reached.
//! A bad pattern is logged and skipped; the remaining patterns still run.
//!
//! Order per rule is keyword → intent → file. The first kind that matches
//! decides the [`MatchType`] and the later kinds are not evaluated.

pub mod glob;
pub mod intent;
pub mod keyword;

pub use glob::{compile_glob, glob_to_regex};
pub use intent::compile_intent;
pub use keyword::compile_keyword;

use regex::Regex;
use tracing::warn;

use crate::errors::TriggerError;
use crate::types::{AgentRule, MatchType, PromptTriggers, Rule, RuleSet, SkillRule};

/// Prompt and path prepared once per invocation.
#[derive(Debug, Clone)]
pub struct TriggerInput<'a> {
    /// Prompt as submitted. Intent patterns run against this.
    pub prompt: &'a str,
    /// Lower-cased prompt. Keywords run against this.
    pub prompt_lower: String,
    /// Working path; empty means "no path", which disables file triggers.
    pub working_path: &'a str,
}

impl<'a> TriggerInput<'a> {
    /// Prepare an input, lower-casing the prompt.
    pub fn new(prompt: &'a str, working_path: &'a str) -> Self {
        Self {
            prompt,
            prompt_lower: prompt.to_lowercase(),
            working_path,
        }
    }
}

/// Match a skill: keywords, then intents, then path globs.
pub fn match_skill(name: &str, rule: &SkillRule, input: &TriggerInput<'_>) -> Option<MatchType> {
    match_rule(name, Rule::Skill(rule), input)
}

/// Match an agent: keywords, then intents. Agents have no path triggers.
pub fn match_agent(name: &str, rule: &AgentRule, input: &TriggerInput<'_>) -> Option<MatchType> {
    match_rule(name, Rule::Agent(rule), input)
}

fn match_rule(name: &str, rule: Rule<'_>, input: &TriggerInput<'_>) -> Option<MatchType> {
    if let Some(triggers) = rule.prompt_triggers() {
        if let Some(kind) = match_prompt(name, triggers, input) {
            return Some(kind);
        }
    }

    let paths = rule.path_patterns();
    if !paths.is_empty()
        && !input.working_path.is_empty()
        && any_match(name, paths, compile_glob, input.working_path)
    {
        return Some(MatchType::File);
    }

    None
}

fn match_prompt(
    name: &str,
    triggers: &PromptTriggers,
    input: &TriggerInput<'_>,
) -> Option<MatchType> {
    if let Some(keywords) = &triggers.keywords {
        if any_match(name, keywords, compile_keyword, &input.prompt_lower) {
            return Some(MatchType::Keyword);
        }
    }
    if let Some(patterns) = &triggers.intent_patterns {
        if any_match(name, patterns, compile_intent, input.prompt) {
            return Some(MatchType::Intent);
        }
    }
    None
}

fn any_match<F>(name: &str, patterns: &[String], compile: F, haystack: &str) -> bool
where
    F: Fn(&str, &str) -> Result<Regex, TriggerError>,
{
    patterns.iter().any(|pattern| match compile(name, pattern) {
        Ok(re) => re.is_match(haystack),
        Err(e) => {
            warn!(
                rule = %e.rule,
                kind = %e.kind,
                pattern = %e.pattern,
                error = %e.source,
                "invalid trigger pattern, skipping"
            );
            false
        }
    })
}

/// Compile every trigger in the set and return the failures.
///
/// Matching never needs this; it backs rule-file validation.
pub fn compile_all(rules: &RuleSet) -> Vec<TriggerError> {
    let mut errors = Vec::new();
    for (name, rule) in rules.rules() {
        if let Some(triggers) = rule.prompt_triggers() {
            for keyword in triggers.keywords.iter().flatten() {
                errors.extend(compile_keyword(name, keyword).err());
            }
            for pattern in triggers.intent_patterns.iter().flatten() {
                errors.extend(compile_intent(name, pattern).err());
            }
        }
        for pattern in rule.path_patterns() {
            errors.extend(compile_glob(name, pattern).err());
        }
    }
    errors
}
