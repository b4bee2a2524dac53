//! # skillhook-agent
//!
//! Library half of the `skillhook` binary: argument parsing and the
//! `check`/`explain` commands, kept out of `main.rs` so they can be tested
//! against in-memory writers.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
