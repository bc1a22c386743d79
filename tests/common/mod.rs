//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use transcript_exporter::ApiClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "VF.DM.test-key";
pub const BASE_PATH: &str = "/v2/transcripts/project-1";

/// Mock transcript API backed by wiremock
///
/// Only requests carrying the expected `accept` and `authorization` headers are answered;
/// anything else falls through to wiremock's default 404.
pub struct MockApi {
    server: MockServer,
}

impl MockApi {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), BASE_PATH)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url(), API_KEY, Duration::from_secs(5))
            .expect("Failed to build client")
    }

    fn get(&self, route: String) -> wiremock::MockBuilder {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("accept", "application/json"))
            .and(header("authorization", API_KEY))
    }

    /// Serve the session list
    pub async fn with_sessions(&self, sessions: &[SessionBuilder]) -> &Self {
        let body: Vec<Value> = sessions.iter().map(SessionBuilder::to_json).collect();
        self.with_sessions_response(ResponseTemplate::new(200).set_body_json(body)).await
    }

    pub async fn with_sessions_response(&self, response: ResponseTemplate) -> &Self {
        self.get(BASE_PATH.to_string()).respond_with(response).mount(&self.server).await;
        self
    }

    /// Serve a transcript for `transcript_id`
    pub async fn with_transcript(&self, transcript_id: &str, turns: Vec<Value>) -> &Self {
        self.with_transcript_response(
            transcript_id,
            ResponseTemplate::new(200).set_body_json(Value::Array(turns)),
        )
        .await
    }

    /// Make the transcript endpoint for `transcript_id` fail with `status`
    pub async fn with_failing_transcript(&self, transcript_id: &str, status: u16) -> &Self {
        self.with_transcript_response(
            transcript_id,
            ResponseTemplate::new(status).set_body_string("upstream error"),
        )
        .await
    }

    pub async fn with_transcript_response(
        &self,
        transcript_id: &str,
        response: ResponseTemplate,
    ) -> &Self {
        self.get(format!("{}/{}", BASE_PATH, transcript_id))
            .respond_with(response)
            .mount(&self.server)
            .await;
        self
    }

    /// Transcript ids requested so far, in request order
    pub async fn transcript_requests(&self) -> Vec<String> {
        let prefix = format!("{}/", BASE_PATH);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.url.path().strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}

/// Builder for session list records as the remote service returns them
pub struct SessionBuilder {
    transcript_id: String,
    session_id: Option<String>,
    created_at: Option<Value>,
    browser: Option<String>,
    os: Option<String>,
    device: Option<String>,
}

impl SessionBuilder {
    pub fn new(transcript_id: &str) -> Self {
        Self {
            transcript_id: transcript_id.to_string(),
            session_id: Some(format!("session-{}", transcript_id)),
            created_at: Some(json!("2024-01-15T10:30:00Z")),
            browser: Some("Chrome".to_string()),
            os: Some("macOS".to_string()),
            device: Some("desktop".to_string()),
        }
    }

    pub fn session_id(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    pub fn created_at(mut self, created_at: Value) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Drop all optional metadata
    pub fn bare(mut self) -> Self {
        self.session_id = None;
        self.created_at = None;
        self.browser = None;
        self.os = None;
        self.device = None;
        self
    }

    pub fn to_json(&self) -> Value {
        let mut record = json!({"_id": self.transcript_id, "projectID": "project-1"});
        let fields = [
            ("sessionID", self.session_id.clone().map(Value::from)),
            ("createdAt", self.created_at.clone()),
            ("browser", self.browser.clone().map(Value::from)),
            ("os", self.os.clone().map(Value::from)),
            ("device", self.device.clone().map(Value::from)),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                record[key] = value;
            }
        }
        record
    }
}

/// `count` sessions with transcript ids `t0..t{count-1}`
pub fn sessions(count: usize) -> Vec<SessionBuilder> {
    (0..count).map(|i| SessionBuilder::new(&format!("t{}", i))).collect()
}

/// Turn payload builders in the remote wire shape
pub mod turns {
    use serde_json::{Value, json};

    pub fn launch() -> Value {
        json!({"type": "request", "payload": {"type": "launch", "payload": {}}})
    }

    pub fn text(message: &str) -> Value {
        json!({"type": "text", "payload": {"type": "text", "payload": {"message": message}}})
    }

    pub fn choice(names: &[&str]) -> Value {
        let buttons: Vec<Value> =
            names.iter().map(|name| json!({"name": name, "request": {"type": "path"}})).collect();
        json!({"type": "choice", "payload": {"type": "choice", "payload": {"buttons": buttons}}})
    }

    pub fn selected(label: &str) -> Value {
        json!({"type": "request", "payload": {"type": "intent", "payload": {"label": label, "intent": {"name": "x"}}}})
    }

    pub fn typed(query: &str) -> Value {
        json!({"type": "request", "payload": {"type": "intent", "payload": {"query": query, "intent": {"name": "x"}}}})
    }

    pub fn intent(query: &str) -> Value {
        json!({"type": "intent", "payload": {"payload": {"query": query}}})
    }

    pub fn debug(message: &str) -> Value {
        json!({"type": "debug", "payload": {"type": "debug", "payload": {"message": message}}})
    }
}

/// A short support conversation covering every turn kind
pub fn realistic_conversation() -> Vec<Value> {
    vec![
        turns::launch(),
        turns::debug("flow started"),
        turns::text("Hi! What can I help you with?"),
        turns::choice(&["Orders", "Billing"]),
        turns::selected("Orders"),
        turns::text("Sure, what's your order number?"),
        turns::typed("A-1042"),
        turns::intent("when will it arrive"),
    ]
}

pub const REALISTIC_CONVERSATION_LINES: [&str; 7] = [
    "User: Started conversation",
    "Agent: Hi! What can I help you with?",
    "Agent: Presented options: Orders, Billing",
    "User: Selected \"Orders\"",
    "Agent: Sure, what's your order number?",
    "User: A-1042",
    "User: when will it arrive",
];
