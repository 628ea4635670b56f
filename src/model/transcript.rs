//! Domain models for archived ticket transcripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::internal::InternalError;

/// Ticket metadata stored alongside the rendered transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranscriptTicketInfo {
    pub ticket_id: String,
    pub guild_id: String,
    pub channel_id: String,
    /// Discord id of the ticket opener.
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub message_count: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TranscriptTicketInfo {
    pub fn from_json(value: Value) -> Result<Self, InternalError> {
        serde_json::from_value(value).map_err(|source| InternalError::MalformedPayload {
            kind: "transcript ticket info",
            source,
        })
    }

    pub fn to_json(&self) -> Result<Value, InternalError> {
        serde_json::to_value(self).map_err(|source| InternalError::MalformedPayload {
            kind: "transcript ticket info",
            source,
        })
    }
}

/// Archived, rendered copy of a closed ticket's conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Same as the archived ticket's id.
    pub id: String,
    pub html: String,
    pub ticket_info: TranscriptTicketInfo,
    pub created_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
}

impl Transcript {
    /// Converts an entity model at the repository boundary.
    ///
    /// Timestamps are stored as epoch milliseconds.
    pub fn from_entity(entity: entity::transcript::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            html: entity.html,
            ticket_info: TranscriptTicketInfo::from_json(entity.ticket_info)?,
            created_at: from_epoch_millis(entity.created_at)?,
            accessed_at: from_epoch_millis(entity.accessed_at)?,
        })
    }
}

/// Parameters for storing a new transcript.
#[derive(Debug, Clone)]
pub struct CreateTranscriptParam {
    pub id: String,
    pub html: String,
    pub ticket_info: TranscriptTicketInfo,
}

/// A chat message as captured for a transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptMessage {
    pub author_id: String,
    pub author_name: String,
    pub is_bot: bool,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub attachments: Vec<TranscriptAttachment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptAttachment {
    pub filename: String,
    pub url: String,
}

pub fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>, InternalError> {
    DateTime::from_timestamp_millis(millis).ok_or(InternalError::InvalidTimestamp(millis))
}
