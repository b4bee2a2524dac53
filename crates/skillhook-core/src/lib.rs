//! # skillhook-core
//!
//! Foundation pieces shared by every skillhook crate:
//!
//! - **Logging**: [`logging::init_subscriber`] wires `tracing` to stderr
//!   (stdout belongs to the hook envelope), and [`logging::capture_logs`]
//!   captures events in memory for test assertions.
//! - **Text**: [`text::display_name`] turns rule names into the human form
//!   used in advisory output.

#![deny(unsafe_code)]

pub mod logging;
pub mod text;
