//! Export pipeline: session list → capped, sequential transcript fetches → simplified results
//!
//! # Error Handling Strategy
//!
//! - **Session list failure**: Logged, and the run ends with [`RunStatus::NoSessions`] and an
//!   empty output. Nothing is written.
//!
//! - **Transcript failure**: Logged and skipped. The [`FailureGuard`] counts consecutive
//!   failures; reaching the threshold ends the run with [`RunStatus::StoppedByFailure`], since a
//!   streak of failures usually means the endpoint itself is down.
//!
//! - **Partial results**: Whatever was collected before the run ended is returned as-is. A run
//!   that stopped early is not an error.

pub mod guard;
pub mod runner;

pub use guard::{DEFAULT_MAX_FAILURES, FailureGuard};
pub use runner::{DEFAULT_MAX_SESSIONS, PipelineLimits, PipelineReport, RunStatus, run_pipeline};
