//! Rule set loading.
//!
//! Loading flow:
//! 1. Missing file → [`RulesError::NotFound`] (callers treat this as "no rules");
//!    any other read failure → [`RulesError::Io`]
//! 2. Parse the document; it must be a JSON object with a `skills` object
//! 3. Validate each skill and agent on its own. An entry that does not fit
//!    its shape is logged and moved to [`RuleSet::rejected`]; it never
//!    matches and never fails the load
//!
//! Map order from the file is preserved.

use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::RulesError;
use crate::types::{RejectedRule, RuleKind, RuleSet};

/// Raw document shape, before per-rule validation.
#[derive(Deserialize)]
struct RawRuleSet {
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    skills: Option<RawMap>,
    #[serde(default)]
    agents: Option<RawMap>,
}

/// A mapping that keeps file order, or whatever else was found in its place.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMap {
    Map(IndexMap<String, Value>),
    Other(Value),
}

/// Load and validate the rule set at `path`.
pub fn load_rules(path: &Path) -> Result<RuleSet, RulesError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "rules file not found");
            return Err(RulesError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(RulesError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let rules = parse_rules(&content)?;
    debug!(
        path = %path.display(),
        skills = rules.skills.len(),
        agents = rules.agents.len(),
        rejected = rules.rejected.len(),
        "loaded rules"
    );
    Ok(rules)
}

/// Parse and validate a rule set from JSON text.
pub fn parse_rules(content: &str) -> Result<RuleSet, RulesError> {
    let raw: RawRuleSet = serde_json::from_str(content)?;

    let Some(RawMap::Map(raw_skills)) = raw.skills else {
        return Err(RulesError::MissingSkills);
    };

    let mut set = RuleSet {
        version: raw.version.map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        }),
        ..RuleSet::default()
    };

    set.skills = validate_entries(raw_skills, RuleKind::Skill, &mut set.rejected);

    match raw.agents {
        Some(RawMap::Map(raw_agents)) => {
            set.agents = validate_entries(raw_agents, RuleKind::Agent, &mut set.rejected);
        }
        Some(RawMap::Other(Value::Null)) | None => {}
        Some(RawMap::Other(other)) => {
            warn!(found = %json_type(&other), "agents is not an object, ignoring");
        }
    }

    Ok(set)
}

fn validate_entries<T: DeserializeOwned>(
    raw: IndexMap<String, Value>,
    kind: RuleKind,
    rejected: &mut Vec<RejectedRule>,
) -> IndexMap<String, T> {
    let mut valid = IndexMap::with_capacity(raw.len());
    for (name, value) in raw {
        match serde_json::from_value::<T>(value) {
            Ok(rule) => {
                let _ = valid.insert(name, rule);
            }
            Err(e) => {
                warn!(kind = %kind, rule = %name, error = %e, "invalid rule, it will never match");
                rejected.push(RejectedRule {
                    kind,
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }
    valid
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;
    use assert_matches::assert_matches;
    use skillhook_core::logging::capture_logs;
    use tracing::Level;

    #[test]
    fn parses_skills_and_agents_in_file_order() {
        let set = parse_rules(
            r#"{
                "version": "1.0",
                "skills": {
                    "zod-schemas": { "priority": "high" },
                    "api-routes": { "priority": "low" },
                    "css-helper": { "priority": "medium" }
                },
                "agents": {
                    "reviewer": { "priority": "critical", "description": "Reviews code" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(set.version.as_deref(), Some("1.0"));
        let names: Vec<_> = set.skills.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zod-schemas", "api-routes", "css-helper"]);
        assert_eq!(set.agents["reviewer"].priority, Priority::Critical);
        assert!(set.rejected.is_empty());
    }

    #[test]
    fn numeric_version_is_stringified() {
        let set = parse_rules(r#"{ "version": 2, "skills": {} }"#).unwrap();
        assert_eq!(set.version.as_deref(), Some("2"));
    }

    #[test]
    fn agents_are_optional() {
        let set = parse_rules(r#"{ "skills": {} }"#).unwrap();
        assert!(set.agents.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn missing_skills_is_an_error() {
        let err = parse_rules(r#"{ "agents": {} }"#).unwrap_err();
        assert_matches!(err, RulesError::MissingSkills);
    }

    #[test]
    fn non_object_skills_is_an_error() {
        assert_matches!(
            parse_rules(r#"{ "skills": [] }"#).unwrap_err(),
            RulesError::MissingSkills
        );
        assert_matches!(
            parse_rules(r#"{ "skills": null }"#).unwrap_err(),
            RulesError::MissingSkills
        );
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert_matches!(parse_rules("{ not json").unwrap_err(), RulesError::Json(_));
    }

    #[test]
    fn non_object_document_is_an_error() {
        assert_matches!(parse_rules("42").unwrap_err(), RulesError::Json(_));
        assert!(parse_rules("[]").is_err());
    }

    #[test]
    fn bad_rule_is_rejected_not_fatal() {
        let (logs, _guard) = capture_logs();
        let set = parse_rules(
            r#"{
                "skills": {
                    "broken": { "priority": "urgent" },
                    "not-an-object": "css",
                    "fine": { "priority": "low", "promptTriggers": { "keywords": ["css"] } }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(set.skills.len(), 1);
        assert!(set.skills.contains_key("fine"));
        let rejected: Vec<_> = set.rejected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rejected, vec!["broken", "not-an-object"]);
        assert_eq!(logs.count_at_level(Level::WARN), 2);
        assert!(logs.has_event(Level::WARN, "invalid rule"));
    }

    #[test]
    fn wrongly_typed_triggers_reject_the_rule() {
        let set = parse_rules(
            r#"{ "skills": { "s": { "priority": "high", "promptTriggers": { "keywords": "css" } } } }"#,
        )
        .unwrap();
        assert!(set.skills.is_empty());
        assert_eq!(set.rejected[0].kind, RuleKind::Skill);
    }

    #[test]
    fn non_object_agents_are_ignored() {
        let (logs, _guard) = capture_logs();
        let set = parse_rules(r#"{ "skills": {}, "agents": "reviewer" }"#).unwrap();
        assert!(set.agents.is_empty());
        assert!(logs.has_event(Level::WARN, "agents is not an object"));
    }

    #[test]
    fn duplicate_keys_keep_first_position_last_value() {
        let set = parse_rules(
            r#"{ "skills": {
                "a": { "priority": "low" },
                "b": { "priority": "low" },
                "a": { "priority": "high" }
            } }"#,
        )
        .unwrap();
        let names: Vec<_> = set.skills.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(set.skills["a"].priority, Priority::High);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_rules(&tmp.path().join("skill-rules.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn load_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("skill-rules.json");
        std::fs::write(
            &path,
            r#"{ "skills": { "css-helper": { "priority": "low", "promptTriggers": { "keywords": ["css"] } } } }"#,
        )
        .unwrap();
        let set = load_rules(&path).unwrap();
        assert_eq!(set.skills.len(), 1);
    }

    #[test]
    fn unreachable_path_is_io_error_not_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("claude");
        std::fs::write(&file, "not a directory").unwrap();
        let err = load_rules(&file.join("skill-rules.json")).unwrap_err();
        assert!(!err.is_not_found());
        assert_matches!(err, RulesError::Io { .. });
    }

    #[test]
    fn load_directory_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_rules(tmp.path()).unwrap_err();
        assert_matches!(err, RulesError::Io { .. });
    }
}
