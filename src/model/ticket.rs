//! Domain models for support tickets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use entity::sea_orm_active_enums::TicketStatus;

use crate::error::internal::InternalError;

/// Free-form per-ticket data stored in the `data` column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TicketData {
    pub fn from_json(value: Value) -> Result<Self, InternalError> {
        serde_json::from_value(value).map_err(|source| InternalError::MalformedPayload {
            kind: "ticket data",
            source,
        })
    }

    pub fn to_json(&self) -> Result<Value, InternalError> {
        serde_json::to_value(self).map_err(|source| InternalError::MalformedPayload {
            kind: "ticket data",
            source,
        })
    }
}

/// A single support-ticket session.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: String,
    pub guild_id: String,
    pub channel_id: String,
    /// Discord id of the user who opened the ticket.
    pub user_id: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    /// Set when the ticket enters `Closed`, cleared when it is re-opened.
    pub closed_at: Option<DateTime<Utc>>,
    pub data: TicketData,
}

impl Ticket {
    /// Converts an entity model to a ticket domain model at the repository boundary.
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            guild_id: entity.guild_id,
            channel_id: entity.channel_id,
            user_id: entity.user_id,
            status: entity.status,
            created_at: entity.created_at,
            closed_at: entity.closed_at,
            data: TicketData::from_json(entity.data)?,
        })
    }
}

/// Parameters for opening a new ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub guild_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub data: TicketData,
}

/// Whether a ticket in this status still occupies its opener's ticket slot.
pub fn is_active(status: TicketStatus) -> bool {
    matches!(status, TicketStatus::Open | TicketStatus::Pending)
}

/// Allowed status transitions.
///
/// ```text
/// open    -> pending | closed
/// pending -> open    | closed
/// closed  -> open    | archived
/// archived is terminal
/// ```
pub fn can_transition(from: TicketStatus, to: TicketStatus) -> bool {
    use TicketStatus::*;

    matches!(
        (from, to),
        (Open, Pending)
            | (Open, Closed)
            | (Pending, Open)
            | (Pending, Closed)
            | (Closed, Open)
            | (Closed, Archived)
    )
}
