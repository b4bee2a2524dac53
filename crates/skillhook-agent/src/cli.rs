//! Command-line surface.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

/// Subcommands whose argument errors are reported instead of falling back
/// to hook mode.
const AUTHORING_COMMANDS: [&str; 2] = ["check", "explain"];

/// Skill activation hook for `UserPromptSubmit`.
///
/// Without a subcommand it runs as the hook: one JSON record on stdin, at
/// most one JSON envelope on stdout.
#[derive(Parser, Debug)]
#[command(name = "skillhook", version, about = "Skill activation hook")]
pub struct Cli {
    /// Log filter for stderr output (overrides `SKILLHOOK_LOG`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// What to run. Defaults to `hook`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run as the hook (stdin to stdout). Always exits 0.
    Hook {
        /// Project root (defaults to `CLAUDE_PROJECT_DIR` or the install location).
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },

    /// Validate the rules file and every trigger pattern in it.
    Check {
        /// Project root (defaults to `CLAUDE_PROJECT_DIR` or the install location).
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },

    /// Show which rules a prompt would activate and the resulting text.
    Explain {
        /// Prompt to evaluate.
        #[arg(long)]
        prompt: String,

        /// Working path for file triggers.
        #[arg(long, default_value = "")]
        cwd: String,

        /// Project root (defaults to `CLAUDE_PROJECT_DIR` or the install location).
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Plain hook mode with no options.
    pub fn hook() -> Self {
        Self {
            log_level: None,
            command: None,
        }
    }

    /// The subcommand to run, `hook` when none was given.
    pub fn subcommand(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Hook { project_dir: None })
    }
}

/// What to do after parsing the command line.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments parsed.
    Run(Cli),
    /// Help, version, or a bad `check`/`explain` line: let clap print and exit.
    Exit(clap::Error),
    /// Unparseable hook-mode arguments. Run as a plain hook anyway, since a
    /// non-zero exit would block the host's prompt.
    HookFallback(clap::Error),
}

/// Parse `args` without ever turning a stray hook argument into an exit code.
pub fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(&args) {
        Ok(cli) => Invocation::Run(cli),
        Err(e) if is_informational(e.kind()) || names_authoring_command(&args) => {
            Invocation::Exit(e)
        }
        Err(e) => Invocation::HookFallback(e),
    }
}

fn is_informational(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn names_authoring_command(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .any(|arg| arg.to_str().is_some_and(|a| AUTHORING_COMMANDS.contains(&a)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_is_hook_mode() {
        let cli = Cli::try_parse_from(["skillhook"]).unwrap();
        assert_eq!(cli.subcommand(), Command::Hook { project_dir: None });
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn hook_accepts_project_dir() {
        let cli = Cli::try_parse_from(["skillhook", "hook", "--project-dir", "/x"]).unwrap();
        assert_eq!(
            cli.subcommand(),
            Command::Hook {
                project_dir: Some(PathBuf::from("/x")),
            }
        );
    }

    #[test]
    fn unknown_hook_arguments_fall_back_to_hook() {
        for args in [
            vec!["skillhook", "--unknown"],
            vec!["skillhook", "hook", "--bogus", "1"],
            vec!["skillhook", "stray-positional"],
        ] {
            assert!(
                matches!(parse_invocation(args.iter().copied()), Invocation::HookFallback(_)),
                "args: {args:?}"
            );
        }
    }

    #[test]
    fn authoring_command_errors_are_reported() {
        let invocation = parse_invocation(["skillhook", "explain"]);
        assert!(matches!(invocation, Invocation::Exit(_)));
        let invocation = parse_invocation(["skillhook", "check", "--nope"]);
        assert!(matches!(invocation, Invocation::Exit(_)));
    }

    #[test]
    fn help_and_version_exit_normally() {
        assert!(matches!(
            parse_invocation(["skillhook", "--help"]),
            Invocation::Exit(ref e) if e.kind() == ErrorKind::DisplayHelp
        ));
        assert!(matches!(
            parse_invocation(["skillhook", "--version"]),
            Invocation::Exit(ref e) if e.kind() == ErrorKind::DisplayVersion
        ));
    }

    #[test]
    fn valid_arguments_run() {
        assert!(matches!(
            parse_invocation(["skillhook", "check"]),
            Invocation::Run(_)
        ));
        let Invocation::Run(cli) = parse_invocation(["skillhook"]) else {
            panic!("expected plain hook run");
        };
        assert_eq!(cli.subcommand(), Cli::hook().subcommand());
    }

    #[test]
    fn explain_args() {
        let cli = Cli::try_parse_from([
            "skillhook",
            "explain",
            "--prompt",
            "fix the css",
            "--project-dir",
            "/repo",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(
            cli.subcommand(),
            Command::Explain {
                prompt: "fix the css".into(),
                cwd: String::new(),
                project_dir: Some(PathBuf::from("/repo")),
            }
        );
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn explain_requires_prompt() {
        assert!(Cli::try_parse_from(["skillhook", "explain"]).is_err());
    }

    #[test]
    fn check_without_dir() {
        let cli = Cli::try_parse_from(["skillhook", "check"]).unwrap();
        assert_eq!(cli.subcommand(), Command::Check { project_dir: None });
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
