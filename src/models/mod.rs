//! Data models for remote sessions and their transcripts.
//!
//! - [`SessionRecord`] / [`Session`] - Session list entries, as received and as exported
//! - [`RawTranscript`] / [`TurnRecord`] - Turn-by-turn transcript of one session
//! - [`TranscriptResult`] / [`PipelineOutput`] - Simplified transcripts written to disk
//!
//! Remote payloads are decoded leniently through the helpers in
//! [`crate::parsers::deserializers`]: fields of an unexpected shape read as absent rather than
//! failing the whole record.

pub mod session;
pub mod transcript;

pub use session::{Session, SessionRecord};
pub use transcript::{
    Button, PipelineOutput, RawTranscript, RequestKind, TranscriptResult, TurnBody, TurnKind,
    TurnPayload, TurnRecord,
};
