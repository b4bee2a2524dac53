//! Rule evaluation and priority grouping.
//!
//! Every skill and every agent is evaluated independently; each contributes
//! at most one [`MatchedRule`]. Matches keep rule-set order, which is what
//! later decides the primary skill and agent in the advisory text.

use std::collections::HashMap;

use skillhook_rules::{MatchType, Priority, Rule, RuleSet, TriggerInput, match_agent, match_skill};
use tracing::debug;

/// A skill or agent that satisfied one of its triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedRule<'a> {
    /// Key in the rules file.
    pub name: &'a str,
    /// Which trigger kind matched first.
    pub match_type: MatchType,
    /// The matched rule.
    pub rule: Rule<'a>,
}

impl MatchedRule<'_> {
    /// Priority of the matched rule.
    pub fn priority(&self) -> Priority {
        self.rule.priority()
    }
}

/// All matches of one invocation, split by rule kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches<'a> {
    /// Matched skills, in rule-set order.
    pub skills: Vec<MatchedRule<'a>>,
    /// Matched agents, in rule-set order.
    pub agents: Vec<MatchedRule<'a>>,
}

impl Matches<'_> {
    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.agents.is_empty()
    }

    /// Skills then agents.
    pub fn iter(&self) -> impl Iterator<Item = &MatchedRule<'_>> {
        self.skills.iter().chain(self.agents.iter())
    }
}

/// Evaluate every rule in `rules` against one prompt and working path.
pub fn evaluate<'a>(rules: &'a RuleSet, input: &TriggerInput<'_>) -> Matches<'a> {
    let mut matches = Matches::default();

    for (name, rule) in &rules.skills {
        if let Some(match_type) = match_skill(name, rule, input) {
            debug!(skill = %name, %match_type, "skill matched");
            matches.skills.push(MatchedRule {
                name,
                match_type,
                rule: Rule::Skill(rule),
            });
        }
    }

    for (name, rule) in &rules.agents {
        if let Some(match_type) = match_agent(name, rule, input) {
            debug!(agent = %name, %match_type, "agent matched");
            matches.agents.push(MatchedRule {
                name,
                match_type,
                rule: Rule::Agent(rule),
            });
        }
    }

    matches
}

/// Matches grouped by priority in a single pass, encounter order kept.
#[derive(Debug, Clone, Default)]
pub struct PriorityBuckets<'m, 'a> {
    buckets: HashMap<Priority, Vec<&'m MatchedRule<'a>>>,
}

impl<'m, 'a> PriorityBuckets<'m, 'a> {
    /// Group `matches` by priority.
    pub fn group(matches: &'m [MatchedRule<'a>]) -> Self {
        let mut buckets: HashMap<Priority, Vec<&'m MatchedRule<'a>>> = HashMap::new();
        for m in matches {
            buckets.entry(m.priority()).or_default().push(m);
        }
        Self { buckets }
    }

    /// Matches at exactly `priority`.
    pub fn at(&self, priority: Priority) -> &[&'m MatchedRule<'a>] {
        self.buckets.get(&priority).map_or(&[], Vec::as_slice)
    }

    /// Critical matches followed by high ones.
    pub fn must_activate(&self) -> Vec<&'m MatchedRule<'a>> {
        self.tier(true)
    }

    /// Medium matches followed by low ones.
    pub fn suggested(&self) -> Vec<&'m MatchedRule<'a>> {
        self.tier(false)
    }

    fn tier(&self, must_activate: bool) -> Vec<&'m MatchedRule<'a>> {
        Priority::ALL
            .into_iter()
            .filter(|p| p.is_must_activate() == must_activate)
            .flat_map(|p| self.at(p).iter().copied())
            .collect()
    }
}
