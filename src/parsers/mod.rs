//! Decoding and simplification of remote transcript payloads
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Field-level mismatches**: Any field with an unexpected JSON shape is read as absent
//!   (see [`deserializers`]). A turn is never rejected because one nested field is odd.
//!
//! - **Turn-level gaps**: A turn whose kind is unknown, or which lacks the fields its kind
//!   needs, simply yields no line from [`normalize_transcript`]. Normalization has no failure path.
//!
//! - **Document-level errors**: Only a transcript body that is not a JSON array is an error, and
//!   that is reported by the client as a fetch failure for the session.

pub mod deserializers;
pub mod transcript;

pub use transcript::{Speaker, normalize_transcript, normalize_turn};
