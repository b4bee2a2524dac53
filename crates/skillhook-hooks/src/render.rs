//! Advisory text rendering.
//!
//! Critical and high matches form the must-activate block; only the first
//! skill and the first agent in it get the detailed wording. Medium and low
//! matches are listed by name in the suggestion block.

use skillhook_core::text::{display_name, join_display_names};

use crate::evaluator::{Matches, MatchedRule, PriorityBuckets};

const SKILL_CHECKLIST: [&str; 3] = [
    "- Adherence to project patterns and conventions",
    "- Proper implementation approach",
    "- Quality and consistency with existing code",
];

/// Render the advisory text for `matches`, or `None` when nothing matched.
///
/// Lines are joined with `\n`; no trailing newline is added.
pub fn render_advisory(matches: &Matches<'_>) -> Option<String> {
    if matches.is_empty() {
        return None;
    }

    let skills = PriorityBuckets::group(&matches.skills);
    let agents = PriorityBuckets::group(&matches.agents);
    let must_skills = skills.must_activate();
    let must_agents = agents.must_activate();
    let suggested_skills = skills.suggested();
    let suggested_agents = agents.suggested();

    let mut lines: Vec<String> = Vec::new();
    let has_must = !must_skills.is_empty() || !must_agents.is_empty();

    if has_must {
        lines.push("IMPORTANT GUIDELINES:".into());
        lines.push(String::new());

        if let Some((primary, others)) = must_skills.split_first() {
            push_primary_skill(&mut lines, primary, others);
        }
        if let Some(primary) = must_agents.first() {
            push_primary_agent(&mut lines, primary);
        }
    }

    if !suggested_skills.is_empty() || !suggested_agents.is_empty() {
        lines.push(if has_must {
            "ADDITIONAL SUGGESTIONS:".into()
        } else {
            "SUGGESTED: Consider these resources for better results:".into()
        });
        lines.push(String::new());

        if !suggested_skills.is_empty() {
            lines.push(format!(
                "- Skills that may be helpful: {}",
                join_display_names(suggested_skills.iter().map(|m| m.name))
            ));
        }
        if !suggested_agents.is_empty() {
            lines.push(format!(
                "- Subagents that may be helpful: {}",
                join_display_names(suggested_agents.iter().map(|m| m.name))
            ));
        }
    }

    Some(lines.join("\n"))
}

fn push_primary_skill(
    lines: &mut Vec<String>,
    primary: &MatchedRule<'_>,
    others: &[&MatchedRule<'_>],
) {
    lines.push(format!(
        "The \"{}\" skill contains critical best practices for this request.",
        display_name(primary.name)
    ));
    lines.push("Before proceeding, review the skill's guidelines to ensure:".into());
    lines.extend(SKILL_CHECKLIST.iter().map(|line| (*line).to_string()));

    if !others.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Also reference: {} skills",
            join_display_names(others.iter().map(|m| m.name))
        ));
    }
    lines.push(String::new());
}

fn push_primary_agent(lines: &mut Vec<String>, primary: &MatchedRule<'_>) {
    let display = display_name(primary.name);
    lines.push("RECOMMENDED APPROACH:".into());
    lines.push(format!("For best results, use the \"{display}\" subagent for this task."));
    if let Some(description) = primary.rule.description().filter(|d| !d.is_empty()) {
        lines.push(format!("This subagent specializes in: {description}"));
    }
    lines.push(String::new());
    lines.push(format!("To activate it, say: \"Use the {display} subagent to handle this.\""));
    lines.push(String::new());
}
