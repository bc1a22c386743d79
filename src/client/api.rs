use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::FetchError;
use crate::config::Settings;
use crate::models::{RawTranscript, SessionRecord};
use crate::parsers::deserializers::object_from_value;

// Characters escaped when a transcript id is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of the session list
///
/// Records come back in list order exactly as received, including ones without a transcript id.
#[async_trait]
pub trait SessionLister: Send + Sync {
    async fn list_sessions(&self) -> Result<Vec<SessionRecord>, FetchError>;
}

/// Source of individual transcripts
#[async_trait]
pub trait TranscriptClient: Send + Sync {
    async fn fetch_transcript(&self, transcript_id: &str) -> Result<RawTranscript, FetchError>;
}

/// HTTP client for the transcript API
///
/// `GET <base>` returns the session list and `GET <base>/<transcriptID>` one transcript. Every
/// request carries `accept: application/json` and the API key as the `authorization` header.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(api_key)
            .context("API key contains characters that are not valid in an HTTP header")?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url: base_url.into() })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.base_url, &settings.api_key, settings.request_timeout())
    }

    pub fn sessions_url(&self) -> &str {
        &self.base_url
    }

    pub fn transcript_url(&self, transcript_id: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            utf8_percent_encode(transcript_id, PATH_SEGMENT)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        if !status.is_success() {
            return Err(FetchError::status(url, status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|source| FetchError::Decode { url: url.to_string(), source })
    }
}

#[async_trait]
impl SessionLister for ApiClient {
    async fn list_sessions(&self) -> Result<Vec<SessionRecord>, FetchError> {
        let records: Vec<Value> = self.get_json(self.sessions_url()).await?;
        Ok(decode_session_records(records))
    }
}

#[async_trait]
impl TranscriptClient for ApiClient {
    async fn fetch_transcript(&self, transcript_id: &str) -> Result<RawTranscript, FetchError> {
        self.get_json(&self.transcript_url(transcript_id)).await
    }
}

/// Decode session list elements one by one, keeping list order and length
///
/// An element that isn't an object decodes to an empty record, which the runner later skips.
pub fn decode_session_records(records: Vec<Value>) -> Vec<SessionRecord> {
    records.into_iter().map(object_from_value::<SessionRecord>).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, "VF.DM.secret", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_transcript_url_joins_base_and_id() {
        let api = client("https://api.example.com/v2/transcripts/project-1");
        assert_eq!(
            api.transcript_url("65f1c0ffee"),
            "https://api.example.com/v2/transcripts/project-1/65f1c0ffee"
        );
    }

    #[test]
    fn test_transcript_url_tolerates_trailing_slash() {
        let api = client("https://api.example.com/transcripts/");
        assert_eq!(api.transcript_url("abc"), "https://api.example.com/transcripts/abc");
        assert_eq!(api.sessions_url(), "https://api.example.com/transcripts/");
    }

    #[test]
    fn test_transcript_url_escapes_path_characters() {
        let api = client("https://api.example.com/t");
        assert_eq!(api.transcript_url("a/b c?d"), "https://api.example.com/t/a%2Fb%20c%3Fd");
    }

    #[test]
    fn test_api_key_with_newline_is_rejected() {
        let result = ApiClient::new("https://api.example.com", "bad\nkey", Duration::from_secs(5));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }

    #[test]
    fn test_decode_session_records_keeps_every_element() {
        let records = decode_session_records(vec![
            json!({"_id": "t1", "sessionID": "s1"}),
            json!({"sessionID": "s2"}),
            json!("junk"),
            json!({"_id": "t3", "sessionID": "s3", "device": "mobile"}),
        ]);

        assert_eq!(records.len(), 4);
        let ids: Vec<Option<&str>> = records.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("t1"), None, None, Some("t3")]);
        assert_eq!(records[2], SessionRecord::default());
        assert_eq!(records[3].device, Some(json!("mobile")));
    }

    #[test]
    fn test_decode_session_records_empty() {
        assert!(decode_session_records(Vec::new()).is_empty());
    }
}
