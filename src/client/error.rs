use reqwest::StatusCode;
use thiserror::Error;

/// Longest response body kept in a [`FetchError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failure of a single call to the remote service
///
/// Always recoverable: callers turn it into a skipped session or an empty run, never a panic.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}: {body}")]
    Status { url: String, status: StatusCode, body: String },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub(crate) fn status(url: &str, status: StatusCode, body: &str) -> Self {
        let mut body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
        if body.is_empty() {
            body = status.canonical_reason().unwrap_or("no response body").to_string();
        }
        Self::Status { url: url.to_string(), status, body }
    }
}
