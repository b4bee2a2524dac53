//! # skillhook-hooks
//!
//! The `UserPromptSubmit` hook that surfaces relevant skills and subagents.
//!
//! One invocation reads a [`HookInput`](types::HookInput) from stdin, loads
//! the rule set, evaluates every rule, and, when anything matched, writes a
//! single [`HookOutput`](types::HookOutput) envelope to stdout.
//!
//! ## Fail-Open
//!
//! The hook must never block the host. Missing rules, broken rules, bad
//! input, and even panics end the run quietly with no output; the reason is
//! logged to stderr. See [`runner::run_hook`].

#![deny(unsafe_code)]

pub mod errors;
pub mod evaluator;
pub mod render;
pub mod runner;
pub mod types;

pub use errors::HookError;
pub use evaluator::{MatchedRule, Matches, PriorityBuckets, evaluate};
pub use render::render_advisory;
pub use runner::{HookOutcome, build_output, run_hook};
pub use types::{HookEventName, HookInput, HookOutput, HookSpecificOutput};
