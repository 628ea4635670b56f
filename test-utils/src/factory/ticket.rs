//! Ticket factory for creating test ticket entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let ticket = TicketFactory::new(&db)
///     .guild_id("100")
///     .status(TicketStatus::Pending)
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    entity: entity::ticket::Model,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - id: `"ticket{n}"`
    /// - guild_id / channel_id / user_id: unique numeric strings
    /// - status: `Open`, created now, no closed_at, empty data object
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            entity: entity::ticket::Model {
                id: format!("ticket{}", id),
                guild_id: (100_000 + id).to_string(),
                channel_id: (200_000 + id).to_string(),
                user_id: (300_000 + id).to_string(),
                status: TicketStatus::Open,
                created_at: Utc::now(),
                closed_at: None,
                data: serde_json::json!({}),
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.entity.id = id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.entity.guild_id = guild_id.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.entity.channel_id = channel_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.entity.user_id = user_id.into();
        self
    }

    /// Sets the status. Closing statuses also stamp `closed_at` with the current time.
    pub fn status(mut self, status: TicketStatus) -> Self {
        self.entity.status = status;
        if matches!(status, TicketStatus::Closed | TicketStatus::Archived) {
            self.entity.closed_at = Some(Utc::now());
        }
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.entity.created_at = created_at;
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.entity.data = data;
        self
    }

    /// Builds and inserts the ticket entity into the database.
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        let entity = self.entity;
        entity::ticket::ActiveModel {
            id: ActiveValue::Set(entity.id),
            guild_id: ActiveValue::Set(entity.guild_id),
            channel_id: ActiveValue::Set(entity.channel_id),
            user_id: ActiveValue::Set(entity.user_id),
            status: ActiveValue::Set(entity.status),
            created_at: ActiveValue::Set(entity.created_at),
            closed_at: ActiveValue::Set(entity.closed_at),
            data: ActiveValue::Set(entity.data),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket with default values.
pub async fn create_ticket(db: &DatabaseConnection) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_ticket_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Ticket).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let ticket = create_ticket(db).await?;

        assert!(ticket.id.starts_with("ticket"));
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.closed_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn closed_status_sets_closed_at() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Ticket).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let ticket = TicketFactory::new(db)
            .status(TicketStatus::Closed)
            .build()
            .await?;

        assert_eq!(ticket.status, TicketStatus::Closed);
        assert!(ticket.closed_at.is_some());

        Ok(())
    }
}
