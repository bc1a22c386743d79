use std::fmt;

use crate::models::{RawTranscript, RequestKind, TurnKind, TurnRecord};

/// Who a simplified line is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Agent,
    User,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Agent => f.write_str("Agent"),
            Speaker::User => f.write_str("User"),
        }
    }
}

fn line(speaker: Speaker, text: impl fmt::Display) -> String {
    format!("{speaker}: {text}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Flatten a raw transcript into `Agent: ...` / `User: ...` display lines
///
/// Turns are visited in order. A turn of unknown kind, or one missing the fields its kind needs,
/// produces no line, so the result is never longer than the input.
pub fn normalize_transcript(transcript: &RawTranscript) -> Vec<String> {
    transcript.turns().iter().filter_map(normalize_turn).collect()
}

/// Simplify a single turn; `None` when the turn has nothing to show
pub fn normalize_turn(turn: &TurnRecord) -> Option<String> {
    match turn.kind {
        TurnKind::Choice => {
            let names: Vec<&str> =
                turn.body()?.buttons.iter().filter_map(|b| non_empty(b.name.as_deref())).collect();
            if names.is_empty() {
                return None;
            }
            Some(line(Speaker::Agent, format_args!("Presented options: {}", names.join(", "))))
        }
        TurnKind::Text => {
            non_empty(turn.body()?.message.as_deref()).map(|message| line(Speaker::Agent, message))
        }
        TurnKind::Request => match turn.payload.as_ref()?.request_kind {
            RequestKind::Intent => {
                let body = turn.body()?;
                // A query wins over a button label when both are present
                if let Some(query) = non_empty(body.query.as_deref()) {
                    Some(line(Speaker::User, query))
                } else {
                    non_empty(body.label.as_deref())
                        .map(|label| line(Speaker::User, format_args!("Selected \"{label}\"")))
                }
            }
            RequestKind::Launch => Some(line(Speaker::User, "Started conversation")),
            RequestKind::Unknown => None,
        },
        TurnKind::Intent => {
            non_empty(turn.body()?.query.as_deref()).map(|query| line(Speaker::User, query))
        }
        TurnKind::Unknown => None,
    }
}
