//! Transcript factory for creating test transcript entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test transcripts with customizable fields.
pub struct TranscriptFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    html: String,
    ticket_info: serde_json::Value,
    created_at: i64,
}

impl<'a> TranscriptFactory<'a> {
    /// Creates a new TranscriptFactory for the given transcript id.
    ///
    /// Defaults to a minimal HTML document, an empty ticket info object and the current
    /// time (epoch milliseconds) for both timestamps.
    pub fn new(db: &'a DatabaseConnection, id: impl Into<String>) -> Self {
        Self {
            db,
            id: id.into(),
            html: "<html><body></body></html>".to_string(),
            ticket_info: serde_json::json!({}),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn ticket_info(mut self, ticket_info: serde_json::Value) -> Self {
        self.ticket_info = ticket_info;
        self
    }

    /// Sets the creation time in epoch milliseconds; `accessed_at` follows it.
    pub fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the transcript entity into the database.
    pub async fn build(self) -> Result<entity::transcript::Model, DbErr> {
        entity::transcript::ActiveModel {
            id: ActiveValue::Set(self.id),
            html: ActiveValue::Set(self.html),
            ticket_info: ActiveValue::Set(self.ticket_info),
            created_at: ActiveValue::Set(self.created_at),
            accessed_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a transcript with default values for the given id.
pub async fn create_transcript(
    db: &DatabaseConnection,
    id: &str,
) -> Result<entity::transcript::Model, DbErr> {
    TranscriptFactory::new(db, id).build().await
}
