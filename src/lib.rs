//! Transcript Exporter - Pull and simplify conversation transcripts from a remote session API
//!
//! This library fetches a bounded list of sessions from a transcript service, downloads the
//! turn-by-turn transcript of each one, and flattens every transcript into readable lines:
//!
//! - Listing sessions and fetching transcripts over HTTP ([`client`])
//! - Lenient decoding of heterogeneous turn payloads ([`models`], [`parsers`])
//! - Simplifying turns into `Agent: ...` / `User: ...` lines ([`normalize_transcript`])
//! - A sequential export loop that stops after repeated failures ([`pipeline`])
//! - Writing the aggregated result as one JSON document ([`output`])
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//!
//! use transcript_exporter::{ApiClient, PipelineLimits, run_pipeline, write_transcripts};
//!
//! # async fn export() -> anyhow::Result<()> {
//! let client = ApiClient::new(
//!     "https://api.example.com/v2/transcripts/my-project",
//!     "my-api-key",
//!     Duration::from_secs(30),
//! )?;
//! let report = run_pipeline(&client, &client, PipelineLimits::default()).await;
//! write_transcripts(Path::new("simplified_transcripts.json"), &report.output)?;
//! println!("Exported {} transcripts", report.output.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod output;
pub mod parsers;
pub mod pipeline;

// Re-export commonly used types
pub use client::{ApiClient, FetchError, SessionLister, TranscriptClient};
pub use config::Settings;
pub use models::{PipelineOutput, RawTranscript, Session, SessionRecord, TranscriptResult, TurnRecord};
pub use output::{read_transcripts, write_transcripts};
pub use parsers::normalize_transcript;
pub use pipeline::{FailureGuard, PipelineLimits, PipelineReport, RunStatus, run_pipeline};
