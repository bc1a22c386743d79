use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::deserializers::{deserialize_or_default, deserialize_present};

/// A remote session as written to the output document under `sessionInfo`
///
/// Metadata values are carried through exactly as the session list returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "transcriptID")]
    pub transcript_id: String,
    #[serde(
        rename = "sessionID",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub session_id: Option<Value>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_present")]
    pub browser: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_present")]
    pub os: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_present")]
    pub device: Option<Value>,
}

impl Session {
    /// Session identifier for log lines, `"unknown"` when the record didn't carry one
    pub fn display_id(&self) -> Cow<'_, str> {
        match &self.session_id {
            Some(Value::String(id)) => Cow::Borrowed(id.as_str()),
            None | Some(Value::Null) => Cow::Borrowed("unknown"),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }
}

/// One element of the session list as the remote service returns it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "_id", default, deserialize_with = "deserialize_or_default")]
    pub id: Option<String>,
    #[serde(rename = "sessionID", default, deserialize_with = "deserialize_present")]
    pub session_id: Option<Value>,
    #[serde(rename = "createdAt", default, deserialize_with = "deserialize_present")]
    pub created_at: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub browser: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub os: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub device: Option<Value>,
}

impl SessionRecord {
    /// Converts the wire record into a [`Session`]; `None` when there is no transcript id to fetch
    pub fn into_session(self) -> Option<Session> {
        let transcript_id = self.id.filter(|id| !id.trim().is_empty())?;
        Some(Session {
            transcript_id,
            session_id: self.session_id,
            created_at: self.created_at,
            browser: self.browser,
            os: self.os,
            device: self.device,
        })
    }
}
