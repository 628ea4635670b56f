//! Ticket data repository for database operations.
//!
//! Tickets are created when a user opens one and mutated on status changes. Rows are never
//! deleted. Status transitions are not validated here; `TicketService` enforces them.

use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    error::AppError,
    model::ticket::{CreateTicketParam, Ticket, TicketData, TicketStatus},
};

const TICKET_ID_LENGTH: usize = 12;

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new open ticket with a generated id.
    ///
    /// # Arguments
    /// - `param` - Guild, channel and opener of the ticket plus initial data
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket with status `Open`
    /// - `Err(AppError)` - Database error during insert
    pub async fn create(&self, param: CreateTicketParam) -> Result<Ticket, AppError> {
        let entity = entity::ticket::ActiveModel {
            id: ActiveValue::Set(generate_ticket_id()),
            guild_id: ActiveValue::Set(param.guild_id),
            channel_id: ActiveValue::Set(param.channel_id),
            user_id: ActiveValue::Set(param.user_id),
            status: ActiveValue::Set(TicketStatus::Open),
            created_at: ActiveValue::Set(Utc::now()),
            closed_at: ActiveValue::Set(None),
            data: ActiveValue::Set(param.data.to_json()?),
        }
        .insert(self.db)
        .await?;

        Ok(Ticket::from_entity(entity)?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(Ticket::from_entity).transpose()?)
    }

    /// Finds the most recent ticket bound to a Discord channel.
    pub async fn find_by_channel_id(&self, channel_id: &str) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id))
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .one(self.db)
            .await?;

        Ok(entity.map(Ticket::from_entity).transpose()?)
    }

    /// Finds a ticket of this user in this guild that is still open or pending.
    pub async fn find_active_by_user(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id))
            .filter(entity::ticket::Column::UserId.eq(user_id))
            .filter(
                entity::ticket::Column::Status.is_in([TicketStatus::Open, TicketStatus::Pending]),
            )
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .one(self.db)
            .await?;

        Ok(entity.map(Ticket::from_entity).transpose()?)
    }

    /// Lists a guild's tickets, newest first, optionally restricted to one status.
    pub async fn get_by_guild(
        &self,
        guild_id: &str,
        status: Option<TicketStatus>,
    ) -> Result<Vec<Ticket>, AppError> {
        let mut query = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id));

        if let Some(status) = status {
            query = query.filter(entity::ticket::Column::Status.eq(status));
        }

        let entities = query
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|e| Ticket::from_entity(e).map_err(AppError::from))
            .collect()
    }

    /// Sets the ticket status and maintains `closed_at`.
    ///
    /// Entering `Closed` stamps `closed_at` with the current time, returning to `Open` or
    /// `Pending` clears it, and `Archived` keeps the existing close time.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - The updated ticket
    /// - `Ok(None)` - No ticket with this id
    pub async fn update_status(
        &self,
        id: &str,
        status: TicketStatus,
    ) -> Result<Option<Ticket>, AppError> {
        let Some(existing) = entity::prelude::Ticket::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let closed_at = match status {
            TicketStatus::Open | TicketStatus::Pending => None,
            TicketStatus::Closed => Some(Utc::now()),
            TicketStatus::Archived => existing.closed_at.or_else(|| Some(Utc::now())),
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status);
        active.closed_at = ActiveValue::Set(closed_at);
        let updated = active.update(self.db).await?;

        Ok(Some(Ticket::from_entity(updated)?))
    }

    /// Replaces the ticket's data payload.
    pub async fn update_data(
        &self,
        id: &str,
        data: &TicketData,
    ) -> Result<Option<Ticket>, AppError> {
        let Some(existing) = entity::prelude::Ticket::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.data = ActiveValue::Set(data.to_json()?);
        let updated = active.update(self.db).await?;

        Ok(Some(Ticket::from_entity(updated)?))
    }
}

/// Generates a random lowercase alphanumeric ticket id.
fn generate_ticket_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..TICKET_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
