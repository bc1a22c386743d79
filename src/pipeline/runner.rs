use std::num::NonZeroUsize;

use tracing::{info, warn};

use super::guard::{DEFAULT_MAX_FAILURES, FailureGuard};
use crate::client::{SessionLister, TranscriptClient};
use crate::models::{PipelineOutput, TranscriptResult};
use crate::parsers::normalize_transcript;

/// Default cap on the number of sessions processed in one run
pub const DEFAULT_MAX_SESSIONS: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineLimits {
    /// Only the first `max_sessions` entries of the session list are processed
    pub max_sessions: NonZeroUsize,
    /// Consecutive transcript failures that stop the run
    pub max_failures: NonZeroUsize,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self { max_sessions: DEFAULT_MAX_SESSIONS, max_failures: DEFAULT_MAX_FAILURES }
    }
}

/// How a run ended. Output is returned the same way in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The session list could not be fetched or was empty
    NoSessions,
    /// Every capped session was attempted
    Completed,
    /// The consecutive-failure threshold was reached; remaining sessions were not attempted
    StoppedByFailure { consecutive_failures: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub output: PipelineOutput,
    pub status: RunStatus,
    /// Length of the session list as received, before capping
    pub total_sessions: usize,
    /// Transcript fetches issued
    pub attempted: usize,
    /// Transcript fetches that failed
    pub failed: usize,
    /// Records within the cap that had no transcript id and were never fetched
    pub skipped: usize,
}

impl PipelineReport {
    fn no_sessions() -> Self {
        Self {
            output: Vec::new(),
            status: RunStatus::NoSessions,
            total_sessions: 0,
            attempted: 0,
            failed: 0,
            skipped: 0,
        }
    }
}

/// List sessions, fetch and simplify each transcript in order, and collect the results
///
/// Fetches are strictly sequential. The cap applies to the list as received; a record without a
/// transcript id still takes its slot but is skipped without a fetch and without touching the
/// failure streak. A failed transcript is skipped; once `max_failures` fetches fail back to back
/// the run stops and returns what it has so far.
pub async fn run_pipeline<L, C>(lister: &L, client: &C, limits: PipelineLimits) -> PipelineReport
where
    L: SessionLister + ?Sized,
    C: TranscriptClient + ?Sized,
{
    info!("Fetching sessions...");
    let records = match lister.list_sessions().await {
        Ok(records) => records,
        Err(e) => {
            warn!("Error fetching sessions: {}", e);
            return PipelineReport::no_sessions();
        }
    };

    if records.is_empty() {
        info!("Session list is empty");
        return PipelineReport::no_sessions();
    }

    let total_sessions = records.len();
    let to_process = total_sessions.min(limits.max_sessions.get());
    info!("Found {} sessions. Processing {} sessions.", total_sessions, to_process);

    let mut guard = FailureGuard::new(limits.max_failures);
    let mut output = Vec::with_capacity(to_process);
    let mut status = RunStatus::Completed;
    let mut attempted = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for (index, record) in records.into_iter().take(to_process).enumerate() {
        let Some(session) = record.into_session() else {
            skipped += 1;
            warn!(index, "Skipping session record without a transcript id");
            continue;
        };

        attempted += 1;
        info!(
            "Fetching transcript for session ID: {} (Transcript ID: {})",
            session.display_id(),
            session.transcript_id
        );

        match client.fetch_transcript(&session.transcript_id).await {
            Ok(raw) => {
                let transcript = normalize_transcript(&raw);
                info!(
                    "Simplified transcript for session ID: {} ({} of {} turns kept)",
                    session.display_id(),
                    transcript.len(),
                    raw.len()
                );
                output.push(TranscriptResult { session_info: session, transcript });
                guard.on_success();
            }
            Err(e) => {
                failed += 1;
                warn!("Failed to fetch transcript for session ID: {}: {}", session.display_id(), e);
                if guard.on_failure() {
                    warn!("Stopping due to {} consecutive failures.", guard.consecutive_failures());
                    status = RunStatus::StoppedByFailure {
                        consecutive_failures: guard.consecutive_failures(),
                    };
                    break;
                }
            }
        }
    }

    info!("Retrieved and simplified {} transcripts.", output.len());

    PipelineReport { output, status, total_sessions, attempted, failed, skipped }
}
