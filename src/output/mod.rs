//! Output sink for simplified transcripts
//!
//! The whole run is written once, at the end, as a single JSON array of
//! `{"sessionInfo": {...}, "transcript": [...]}` objects. Default location:
//! `simplified_transcripts.json` in the working directory.

pub mod writer;

pub use writer::{DEFAULT_OUTPUT_FILENAME, read_transcripts, write_transcripts};
