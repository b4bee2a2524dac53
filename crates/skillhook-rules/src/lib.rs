//! # skillhook-rules
//!
//! Rule set model, loader, and trigger matching for the skill activation hook.
//!
//! - [`types`]: skills and agents with priorities and triggers, kept in file order
//! - [`loader`]: reads `skill-rules.json`, validating each rule on its own
//! - [`triggers`]: compiles keywords, intent patterns, and path globs into
//!   regexes and decides whether a rule matches a prompt
//!
//! A bad rule or a bad pattern never fails the whole load: the rule is
//! dropped (or the pattern skipped) with a warning and evaluation goes on.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod triggers;
pub mod types;

pub use errors::{RulesError, TriggerError};
pub use loader::{load_rules, parse_rules};
pub use triggers::{TriggerInput, compile_all, match_agent, match_skill};
pub use types::{
    AgentRule, FileTriggers, MatchType, Priority, PromptTriggers, RejectedRule, Rule, RuleKind,
    RuleSet, SkillRule,
};
