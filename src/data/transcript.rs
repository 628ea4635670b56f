//! Transcript data repository for database operations.
//!
//! Transcripts are written once when a ticket is archived. The only mutation afterwards is
//! access-time bookkeeping. Timestamps are stored as epoch milliseconds.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{
    error::AppError,
    model::transcript::{CreateTranscriptParam, Transcript},
};

pub struct TranscriptRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TranscriptRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new transcript.
    ///
    /// `created_at` and `accessed_at` are both set to the current time.
    ///
    /// # Returns
    /// - `Ok(Transcript)` - The stored transcript
    /// - `Err(AppError::DbErr)` - Insert failed, including a duplicate id
    pub async fn create(&self, param: CreateTranscriptParam) -> Result<Transcript, AppError> {
        let now = Utc::now().timestamp_millis();

        let entity = entity::transcript::ActiveModel {
            id: ActiveValue::Set(param.id),
            html: ActiveValue::Set(param.html),
            ticket_info: ActiveValue::Set(param.ticket_info.to_json()?),
            created_at: ActiveValue::Set(now),
            accessed_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Transcript::from_entity(entity)?)
    }

    /// Finds a transcript by id without touching its access time.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Transcript>, AppError> {
        let entity = entity::prelude::Transcript::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(Transcript::from_entity).transpose()?)
    }

    /// Updates `accessed_at` to the current time.
    ///
    /// # Returns
    /// - `Ok(Some(Transcript))` - The updated transcript
    /// - `Ok(None)` - No transcript with this id
    /// - `Err(AppError)` - Database error
    pub async fn mark_accessed(&self, id: &str) -> Result<Option<Transcript>, AppError> {
        let Some(existing) = entity::prelude::Transcript::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::transcript::ActiveModel = existing.into();
        active.accessed_at = ActiveValue::Set(Utc::now().timestamp_millis());
        let updated = active.update(self.db).await?;

        Ok(Some(Transcript::from_entity(updated)?))
    }
}
