//! One hook invocation, end to end.
//!
//! [`run_hook`] never fails and never panics outward: every error, and any
//! panic raised while evaluating, becomes [`HookOutcome::Failed`] with the
//! reason logged. The host treats "no output" as "no advice".

use std::any::Any;
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};

use skillhook_rules::{RuleSet, TriggerInput, load_rules};
use skillhook_settings::HookSettings;
use tracing::{debug, error, info, warn};

use crate::errors::HookError;
use crate::evaluator::evaluate;
use crate::render::render_advisory;
use crate::types::{HookInput, HookOutput};

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// An envelope was written to stdout.
    Emitted,
    /// Rules loaded but nothing matched.
    NoMatch,
    /// No rules file in the project.
    NoRules,
    /// Something went wrong; details were logged.
    Failed,
}

/// Evaluate `input` against `rules` and build the envelope, if anything matched.
pub fn build_output(rules: &RuleSet, input: &HookInput) -> Option<HookOutput> {
    let trigger_input = TriggerInput::new(&input.prompt, input.working_path());
    let matches = evaluate(rules, &trigger_input);
    render_advisory(&matches).map(HookOutput::user_prompt_submit)
}

/// Run the hook: read the input record from `stdin`, write at most one
/// envelope line to `stdout`.
pub fn run_hook<R: Read, W: Write>(settings: &HookSettings, stdin: R, stdout: W) -> HookOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| try_run(settings, stdin, stdout))) {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            warn!(error = %e, "skill activation hook failed, continuing without advice");
            HookOutcome::Failed
        }
        Err(payload) => {
            error!(
                panic = %panic_message(payload.as_ref()),
                "skill activation hook panicked, continuing without advice"
            );
            HookOutcome::Failed
        }
    }
}

fn try_run<R: Read, W: Write>(
    settings: &HookSettings,
    mut stdin: R,
    mut stdout: W,
) -> Result<HookOutcome, HookError> {
    let mut raw = String::new();
    let _ = stdin.read_to_string(&mut raw)?;
    let input = HookInput::from_json(&raw).map_err(HookError::InvalidInput)?;

    let path = settings.rules_path();
    let rules = match load_rules(&path) {
        Ok(rules) => rules,
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "no skill rules file, nothing to do");
            return Ok(HookOutcome::NoRules);
        }
        Err(e) => return Err(e.into()),
    };

    let Some(output) = build_output(&rules, &input) else {
        debug!(skills = rules.skills.len(), agents = rules.agents.len(), "no rules matched");
        return Ok(HookOutcome::NoMatch);
    };

    let json = output.to_json().map_err(HookError::Serialize)?;
    writeln!(stdout, "{json}")?;
    stdout.flush()?;
    info!(bytes = json.len(), "advisory context emitted");
    Ok(HookOutcome::Emitted)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const RULES: &str = r#"{
        "version": "1.0",
        "skills": {
            "database-expert": {
                "type": "domain",
                "enforcement": "suggest",
                "priority": "high",
                "promptTriggers": { "keywords": ["database"] }
            },
            "test-writer": {
                "priority": "medium",
                "fileTriggers": { "pathPatterns": ["src/**/*.test.ts"] }
            }
        }
    }"#;

    fn project(rules: Option<&str>) -> (TempDir, HookSettings) {
        let dir = TempDir::new().unwrap();
        if let Some(rules) = rules {
            write_rules(dir.path(), rules);
        }
        let settings = HookSettings::new(dir.path());
        (dir, settings)
    }

    fn write_rules(root: &Path, content: &str) {
        let skills = root.join(".claude/skills");
        fs::create_dir_all(&skills).unwrap();
        fs::write(skills.join("skill-rules.json"), content).unwrap();
    }

    fn run(settings: &HookSettings, stdin: &str) -> (HookOutcome, String) {
        let mut out = Vec::new();
        let outcome = run_hook(settings, stdin.as_bytes(), &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn emits_one_json_line_on_match() {
        let (_dir, settings) = project(Some(RULES));
        let (outcome, out) = run(
            &settings,
            r#"{"prompt":"How do I optimize my database queries?","cwd":"/tmp"}"#,
        );
        assert_eq!(outcome, HookOutcome::Emitted);
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let specific = &value["hookSpecificOutput"];
        assert_eq!(specific["hookEventName"], "UserPromptSubmit");
        let context = specific["additionalContext"].as_str().unwrap();
        assert!(context.starts_with("IMPORTANT GUIDELINES:\n\nThe \"database expert\" skill"));
    }

    #[test]
    fn file_trigger_uses_cwd() {
        let (_dir, settings) = project(Some(RULES));
        let (outcome, out) = run(
            &settings,
            r#"{"prompt":"what next","cwd":"src/components/foo.test.ts"}"#,
        );
        assert_eq!(outcome, HookOutcome::Emitted);
        assert!(out.contains("- Skills that may be helpful: test writer"));
    }

    #[test]
    fn no_match_writes_nothing() {
        let (_dir, settings) = project(Some(RULES));
        let (outcome, out) = run(&settings, r#"{"prompt":"hello there","cwd":"/tmp"}"#);
        assert_eq!(outcome, HookOutcome::NoMatch);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_rules_file_is_silent() {
        let (_dir, settings) = project(None);
        let (outcome, out) = run(&settings, r#"{"prompt":"database","cwd":""}"#);
        assert_eq!(outcome, HookOutcome::NoRules);
        assert!(out.is_empty());
    }

    #[test]
    fn unreadable_rules_path_is_a_failure_not_absence() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".claude"), "a file, not a directory").unwrap();
        let settings = HookSettings::new(dir.path());
        let (logs, _guard) = skillhook_core::logging::capture_logs();
        let (outcome, out) = run(&settings, r#"{"prompt":"database","cwd":""}"#);
        assert_eq!(outcome, HookOutcome::Failed);
        assert!(out.is_empty());
        assert!(logs.has_event(tracing::Level::WARN, "skill activation hook failed"));
    }

    #[test]
    fn malformed_rules_file_fails_open() {
        let (_dir, settings) = project(Some("{ not json"));
        let (outcome, out) = run(&settings, r#"{"prompt":"database","cwd":""}"#);
        assert_eq!(outcome, HookOutcome::Failed);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_skills_object_fails_open() {
        let (_dir, settings) = project(Some(r#"{ "skills": [] }"#));
        let (outcome, out) = run(&settings, r#"{"prompt":"database","cwd":""}"#);
        assert_eq!(outcome, HookOutcome::Failed);
        assert!(out.is_empty());
    }

    #[test]
    fn bad_stdin_fails_open() {
        let (_dir, settings) = project(Some(RULES));
        for stdin in ["", "not json", r#"{"cwd":"/tmp"}"#] {
            let (outcome, out) = run(&settings, stdin);
            assert_eq!(outcome, HookOutcome::Failed, "stdin: {stdin:?}");
            assert!(out.is_empty());
        }
    }

    #[test]
    fn invalid_rule_does_not_hide_others() {
        let (_dir, settings) = project(Some(
            r#"{ "skills": {
                "broken": { "priority": "urgent", "promptTriggers": { "keywords": ["database"] } },
                "database-expert": { "priority": "low", "promptTriggers": { "keywords": ["database"] } }
            } }"#,
        ));
        let (outcome, out) = run(&settings, r#"{"prompt":"database","cwd":""}"#);
        assert_eq!(outcome, HookOutcome::Emitted);
        assert!(out.contains("database expert"));
        assert!(!out.contains("broken"));
    }

    #[test]
    fn output_is_identical_across_runs() {
        let (_dir, settings) = project(Some(RULES));
        let stdin = r#"{"prompt":"database tests","cwd":"src/a/b.test.ts"}"#;
        let (_, first) = run(&settings, stdin);
        let (_, second) = run(&settings, stdin);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    struct PanickingWriter;

    impl Write for PanickingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            panic!("writer exploded");
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn panic_is_contained() {
        let (_dir, settings) = project(Some(RULES));
        let outcome = run_hook(
            &settings,
            r#"{"prompt":"database","cwd":""}"#.as_bytes(),
            PanickingWriter,
        );
        assert_eq!(outcome, HookOutcome::Failed);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported_not_raised() {
        let (_dir, settings) = project(Some(RULES));
        let outcome = run_hook(
            &settings,
            r#"{"prompt":"database","cwd":""}"#.as_bytes(),
            ClosedPipe,
        );
        assert_eq!(outcome, HookOutcome::Failed);
    }

    #[test]
    fn build_output_without_io() {
        let rules = skillhook_rules::parse_rules(RULES).unwrap();
        let input = HookInput::from_json(r#"{"prompt":"a database question"}"#).unwrap();
        let output = build_output(&rules, &input);
        assert_matches!(output, Some(ref out) if out
            .hook_specific_output
            .additional_context
            .contains("database expert"));

        let quiet = HookInput::from_json(r#"{"prompt":"nothing here"}"#).unwrap();
        assert_eq!(build_output(&rules, &quiet), None);
    }

    #[test]
    fn panic_message_extracts_strings() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
