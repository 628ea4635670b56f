//! Ticket lifecycle rules on top of `TicketRepository`.

use sea_orm::{DatabaseConnection, SqlErr};

use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{can_transition, CreateTicketParam, Ticket, TicketStatus},
};

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fails if the user already has an open or pending ticket in the guild.
    ///
    /// # Returns
    /// - `Ok(())` - The user may open a ticket
    /// - `Err(AppError::BadRequest)` - Message pointing at the existing ticket channel
    pub async fn ensure_can_open(&self, guild_id: &str, user_id: &str) -> Result<(), AppError> {
        let existing = TicketRepository::new(self.db)
            .find_active_by_user(guild_id, user_id)
            .await?;

        match existing {
            Some(ticket) => Err(already_open(Some(&ticket.channel_id))),
            None => Ok(()),
        }
    }

    /// Records a new ticket for an already created channel.
    ///
    /// The active-ticket check is repeated here since the channel is created between
    /// `ensure_can_open` and this call. Concurrent opens that both pass the check are
    /// settled by the unique index on active tickets: the losing insert is reported as
    /// `BadRequest` like any other duplicate.
    pub async fn open(&self, param: CreateTicketParam) -> Result<Ticket, AppError> {
        self.ensure_can_open(&param.guild_id, &param.user_id).await?;

        let guild_id = param.guild_id.clone();
        let user_id = param.user_id.clone();
        let repo = TicketRepository::new(self.db);
        let ticket = match repo.create(param).await {
            Ok(ticket) => ticket,
            Err(AppError::DbErr(err))
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                let existing = repo.find_active_by_user(&guild_id, &user_id).await?;
                return Err(already_open(
                    existing.as_ref().map(|ticket| ticket.channel_id.as_str()),
                ));
            }
            Err(err) => return Err(err),
        };

        tracing::info!(
            "Opened ticket {} for user {} in guild {}",
            ticket.id,
            ticket.user_id,
            ticket.guild_id
        );

        Ok(ticket)
    }

    pub async fn get_by_channel(&self, channel_id: &str) -> Result<Option<Ticket>, AppError> {
        TicketRepository::new(self.db)
            .find_by_channel_id(channel_id)
            .await
    }

    /// Moves a ticket to `status` if the lifecycle allows it.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The updated ticket
    /// - `Err(AppError::NotFound)` - Unknown ticket id
    /// - `Err(AppError::BadRequest)` - Transition not allowed from the current status
    pub async fn transition(&self, id: &str, status: TicketStatus) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);
        let ticket = self.get_required(&repo, id).await?;

        check_transition(&ticket, status)?;

        repo.update_status(id, status)
            .await?
            .ok_or_else(|| ticket_not_found(id))
    }

    /// Closes a ticket, recording who closed it and why.
    pub async fn close(
        &self,
        id: &str,
        closed_by: &str,
        reason: Option<String>,
    ) -> Result<Ticket, AppError> {
        let repo = TicketRepository::new(self.db);
        let ticket = self.get_required(&repo, id).await?;

        check_transition(&ticket, TicketStatus::Closed)?;

        let mut data = ticket.data;
        data.closed_by = Some(closed_by.to_string());
        data.close_reason = reason;
        repo.update_data(id, &data).await?;

        let closed = repo
            .update_status(id, TicketStatus::Closed)
            .await?
            .ok_or_else(|| ticket_not_found(id))?;

        tracing::info!("Ticket {} closed by {}", id, closed_by);

        Ok(closed)
    }

    async fn get_required(
        &self,
        repo: &TicketRepository<'_>,
        id: &str,
    ) -> Result<Ticket, AppError> {
        repo.get_by_id(id).await?.ok_or_else(|| ticket_not_found(id))
    }
}

fn check_transition(ticket: &Ticket, to: TicketStatus) -> Result<(), AppError> {
    if can_transition(ticket.status, to) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Ticket {} cannot move from {:?} to {:?}",
            ticket.id, ticket.status, to
        )))
    }
}

fn already_open(channel_id: Option<&str>) -> AppError {
    match channel_id {
        Some(channel_id) => {
            AppError::BadRequest(format!("You already have an open ticket: <#{}>", channel_id))
        }
        None => AppError::BadRequest("You already have an open ticket.".to_string()),
    }
}

fn ticket_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Ticket {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ticket::TicketData;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use test_utils::{builder::TestBuilder, factory::ticket::TicketFactory};

    fn param(guild_id: &str, user_id: &str, channel_id: &str) -> CreateTicketParam {
        CreateTicketParam {
            guild_id: guild_id.to_string(),
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            data: TicketData {
                reason: Some("help".to_string()),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn rejects_second_active_ticket() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TicketService::new(db);

        service.open(param("1", "10", "500")).await?;
        let result = service.open(param("1", "10", "501")).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg.contains("<#500>")));

        // Other guilds are independent.
        service.open(param("2", "10", "502")).await?;

        Ok(())
    }

    /// Tests two overlapping opens for the same user against the migrated schema.
    ///
    /// Both calls can pass the lookup before either inserts; the active-ticket index
    /// must reject the second insert.
    ///
    /// Expected: one Ok, one BadRequest, a single open ticket stored
    #[tokio::test]
    async fn concurrent_opens_store_one_ticket() -> Result<(), AppError> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;
        let service = TicketService::new(&db);

        let (a, b) = tokio::join!(
            service.open(param("1", "10", "500")),
            service.open(param("1", "10", "501"))
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let rejected = if a.is_ok() { b } else { a };
        assert!(matches!(
            rejected,
            Err(AppError::BadRequest(msg)) if msg.starts_with("You already have an open ticket")
        ));

        let open = TicketRepository::new(&db)
            .get_by_guild("1", Some(TicketStatus::Open))
            .await?;
        assert_eq!(open.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn allows_new_ticket_after_close() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TicketService::new(db);

        let first = service.open(param("1", "10", "500")).await?;
        service.close(&first.id, "10", None).await?;

        service.ensure_can_open("1", "10").await?;
        service.open(param("1", "10", "501")).await?;

        Ok(())
    }

    #[tokio::test]
    async fn close_records_closer_and_reason() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TicketService::new(db);

        let ticket = service.open(param("1", "10", "500")).await?;
        let closed = service
            .close(&ticket.id, "99", Some("resolved".to_string()))
            .await?;

        assert_eq!(closed.status, TicketStatus::Closed);
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.data.reason.as_deref(), Some("help"));
        assert_eq!(closed.data.closed_by.as_deref(), Some("99"));
        assert_eq!(closed.data.close_reason.as_deref(), Some("resolved"));

        Ok(())
    }

    #[tokio::test]
    async fn rejects_invalid_transition() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TicketService::new(db);

        let ticket = TicketFactory::new(db)
            .status(TicketStatus::Archived)
            .build()
            .await?;

        let reopen = service.transition(&ticket.id, TicketStatus::Open).await;
        assert!(matches!(reopen, Err(AppError::BadRequest(_))));

        let close = service.close(&ticket.id, "1", None).await;
        assert!(matches!(close, Err(AppError::BadRequest(_))));

        Ok(())
    }

    #[tokio::test]
    async fn transitions_through_lifecycle() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = TicketService::new(db);

        let ticket = TicketFactory::new(db).build().await?;

        let pending = service.transition(&ticket.id, TicketStatus::Pending).await?;
        assert_eq!(pending.status, TicketStatus::Pending);

        let closed = service.transition(&ticket.id, TicketStatus::Closed).await?;
        assert!(closed.closed_at.is_some());

        let archived = service.transition(&ticket.id, TicketStatus::Archived).await?;
        assert_eq!(archived.status, TicketStatus::Archived);
        assert_eq!(archived.closed_at, closed.closed_at);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_ticket_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Ticket)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = TicketService::new(db)
            .transition("missing", TicketStatus::Closed)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
