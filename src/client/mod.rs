//! Access to the remote transcript API
//!
//! The pipeline only sees the [`SessionLister`] and [`TranscriptClient`] traits; [`ApiClient`]
//! implements both over HTTP. Each call makes exactly one request: there are no retries, and a
//! failed call is reported as a [`FetchError`] rather than propagated as fatal.

pub mod api;
pub mod error;

pub use api::{ApiClient, SessionLister, TranscriptClient, decode_session_records};
pub use error::FetchError;
