//! Rule set types.
//!
//! Mirrors the shape of `.claude/skills/skill-rules.json`. All rule fields use
//! `camelCase` on the wire. Rules are kept in file order: that order decides
//! which match is rendered as the primary recommendation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Activation priority of a skill or agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must be activated.
    Critical,
    /// Must be activated.
    High,
    /// Suggested.
    Medium,
    /// Suggested.
    Low,
}

impl Priority {
    /// Every priority, most urgent first.
    pub const ALL: [Priority; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Critical and high priority matches are rendered as required guidance.
    #[must_use]
    pub fn is_must_activate(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Which trigger kind produced a match.
///
/// Kinds are tried in declaration order and the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// A literal keyword appeared as a whole word in the prompt.
    Keyword,
    /// An intent regex matched the prompt.
    Intent,
    /// A path glob matched the working path (skills only).
    File,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword => write!(f, "keyword"),
            Self::Intent => write!(f, "intent"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Prompt-based triggers shared by skills and agents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTriggers {
    /// Literal keywords, matched case-insensitively on word boundaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Regex sources, matched case-insensitively anywhere in the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_patterns: Option<Vec<String>>,
}

/// Path-based triggers (skills only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTriggers {
    /// Glob patterns tested against the working path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_patterns: Option<Vec<String>>,
    /// File content patterns. Carried for other hooks; not evaluated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_patterns: Option<Vec<String>>,
}

/// Kind of guidance a skill provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    /// Enforces a constraint.
    Guardrail,
    /// Carries domain knowledge.
    Domain,
}

/// How strongly a skill should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforcement {
    /// Hard stop.
    Block,
    /// Advisory.
    Suggest,
    /// Warn but proceed.
    Warn,
}

/// A configured skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRule {
    /// Guardrail or domain skill.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<SkillType>,
    /// Enforcement level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<Enforcement>,
    /// Activation priority.
    pub priority: Priority,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prompt triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_triggers: Option<PromptTriggers>,
    /// Path triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_triggers: Option<FileTriggers>,
}

/// Agent workflow type. Only `workflow` exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// A multi-step workflow subagent.
    Workflow,
}

/// Whether an agent is suggested or started automatically by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Recommended in the advisory text.
    Suggest,
    /// Started by the host without asking.
    Auto,
}

/// Edit-count triggers consumed by the post-tool-use hook, not by this one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostToolUseTriggers {
    /// Whether the trigger is active.
    pub enabled: bool,
    /// Tool names that count as edits.
    pub tools: Vec<String>,
    /// Edits required within the window.
    pub min_edits: u32,
    /// Window length in minutes.
    pub within_minutes: u32,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A configured subagent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRule {
    /// Agent type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentType>,
    /// Suggest or auto-start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,
    /// Activation priority.
    pub priority: Priority,
    /// What the subagent specializes in. Rendered in the advisory text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prompt triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_triggers: Option<PromptTriggers>,
    /// Post-tool-use triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_tool_use_triggers: Option<PostToolUseTriggers>,
}

/// Whether a rule is a skill or an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Entry under `skills`.
    Skill,
    /// Entry under `agents`.
    Agent,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skill => write!(f, "skill"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

/// Borrowed view over either rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule<'a> {
    /// A skill.
    Skill(&'a SkillRule),
    /// An agent.
    Agent(&'a AgentRule),
}

impl<'a> Rule<'a> {
    /// Which kind of rule this is.
    pub fn kind(self) -> RuleKind {
        match self {
            Self::Skill(_) => RuleKind::Skill,
            Self::Agent(_) => RuleKind::Agent,
        }
    }

    /// Activation priority.
    pub fn priority(self) -> Priority {
        match self {
            Self::Skill(rule) => rule.priority,
            Self::Agent(rule) => rule.priority,
        }
    }

    /// Optional description.
    pub fn description(self) -> Option<&'a str> {
        match self {
            Self::Skill(rule) => rule.description.as_deref(),
            Self::Agent(rule) => rule.description.as_deref(),
        }
    }

    /// Optional prompt triggers.
    pub fn prompt_triggers(self) -> Option<&'a PromptTriggers> {
        match self {
            Self::Skill(rule) => rule.prompt_triggers.as_ref(),
            Self::Agent(rule) => rule.prompt_triggers.as_ref(),
        }
    }

    /// Path globs. Always empty for agents.
    pub fn path_patterns(self) -> &'a [String] {
        match self {
            Self::Skill(rule) => rule
                .file_triggers
                .as_ref()
                .and_then(|t| t.path_patterns.as_deref())
                .unwrap_or_default(),
            Self::Agent(_) => &[],
        }
    }
}

/// A rule entry that failed validation and was dropped at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRule {
    /// Skill or agent.
    pub kind: RuleKind,
    /// Key in the rules file.
    pub name: String,
    /// Why it was rejected.
    pub reason: String,
}

/// The full collection of configured skills and agents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Free-form version string from the file.
    pub version: Option<String>,
    /// Skills, in file order.
    pub skills: IndexMap<String, SkillRule>,
    /// Agents, in file order.
    pub agents: IndexMap<String, AgentRule>,
    /// Entries that could not be validated. They never match.
    pub rejected: Vec<RejectedRule>,
}

impl RuleSet {
    /// Every rule: skills first, then agents, each in file order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, Rule<'_>)> {
        let skills = self
            .skills
            .iter()
            .map(|(name, rule)| (name.as_str(), Rule::Skill(rule)));
        let agents = self
            .agents
            .iter()
            .map(|(name, rule)| (name.as_str(), Rule::Agent(rule)));
        skills.chain(agents)
    }

    /// Whether the set contains no usable rules.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.agents.is_empty()
    }
}
