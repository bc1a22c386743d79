use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::session::Session;
use crate::parsers::deserializers::{
    deserialize_object_or_default, deserialize_object_seq, deserialize_or_default,
    objects_from_value,
};

/// Turn kinds the normalizer knows about. Anything else maps to [`TurnKind::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnKind {
    /// Agent presented a set of buttons
    Choice,
    /// Agent message
    Text,
    /// User request, refined by [`RequestKind`]
    Request,
    /// User intent carrying a free-form query
    Intent,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Sub-type of a `request` turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Intent,
    Launch,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Button {
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub name: Option<String>,
}

/// Innermost payload object; which fields are meaningful depends on the turn kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TurnBody {
    #[serde(default, deserialize_with = "deserialize_object_seq")]
    pub buttons: Vec<Button>,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TurnPayload {
    #[serde(rename = "type", default, deserialize_with = "deserialize_or_default")]
    pub request_kind: RequestKind,
    #[serde(default, deserialize_with = "deserialize_object_or_default")]
    pub payload: Option<TurnBody>,
}

impl TurnPayload {
    pub fn body(&self) -> Option<&TurnBody> {
        self.payload.as_ref()
    }
}

/// A single turn of a transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TurnRecord {
    #[serde(rename = "type", default, deserialize_with = "deserialize_or_default")]
    pub kind: TurnKind,
    #[serde(default, deserialize_with = "deserialize_object_or_default")]
    pub payload: Option<TurnPayload>,
}

impl TurnRecord {
    pub fn body(&self) -> Option<&TurnBody> {
        self.payload.as_ref().and_then(TurnPayload::body)
    }
}

/// Ordered turns of one session as fetched from the remote service
///
/// The body must be a JSON array; elements that aren't turn objects are kept as
/// [`TurnKind::Unknown`] turns so positions stay aligned with the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTranscript(Vec<TurnRecord>);

impl RawTranscript {
    pub fn new(turns: Vec<TurnRecord>) -> Self {
        Self(turns)
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<TurnRecord>> for RawTranscript {
    fn from(turns: Vec<TurnRecord>) -> Self {
        Self(turns)
    }
}

impl<'de> Deserialize<'de> for RawTranscript {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<Value>::deserialize(deserializer)?;
        Ok(Self(objects_from_value(Value::Array(items))))
    }
}

/// Simplified transcript of one session, as written to the output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptResult {
    #[serde(rename = "sessionInfo")]
    pub session_info: Session,
    pub transcript: Vec<String>,
}

/// Everything a run produced, in session-list order
pub type PipelineOutput = Vec<TranscriptResult>;
