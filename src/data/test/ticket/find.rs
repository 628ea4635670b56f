use super::*;

/// Tests retrieving a ticket by id.
///
/// Expected: Ok(Some(ticket)) for a stored id, Ok(None) otherwise
#[tokio::test]
async fn gets_ticket_by_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::create_ticket(db).await?;

    let repo = TicketRepository::new(db);
    let found = repo.get_by_id(&stored.id).await?;
    assert_eq!(found.map(|t| t.id), Some(stored.id));

    assert!(repo.get_by_id("missing").await?.is_none());

    Ok(())
}

/// Tests finding the ticket bound to a channel.
///
/// Expected: Ok(Some(ticket)) only for the queried channel
#[tokio::test]
async fn finds_ticket_by_channel_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("500")
        .build()
        .await?;
    let target = factory::ticket::TicketFactory::new(db)
        .channel_id("501")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo.find_by_channel_id("501").await?.unwrap();
    assert_eq!(found.id, target.id);

    assert!(repo.find_by_channel_id("999").await?.is_none());

    Ok(())
}

/// Tests that only open or pending tickets count as a user's active ticket.
///
/// Expected: closed tickets are ignored, pending tickets are found
#[tokio::test]
async fn finds_active_ticket_for_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .guild_id("1")
        .user_id("7")
        .status(TicketStatus::Closed)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    assert!(repo.find_active_by_user("1", "7").await?.is_none());

    let pending = factory::ticket::TicketFactory::new(db)
        .guild_id("1")
        .user_id("7")
        .status(TicketStatus::Pending)
        .build()
        .await?;

    let active = repo.find_active_by_user("1", "7").await?.unwrap();
    assert_eq!(active.id, pending.id);

    // Same user in another guild has no active ticket
    assert!(repo.find_active_by_user("2", "7").await?.is_none());

    Ok(())
}

/// Tests listing a guild's tickets with and without a status filter.
///
/// Expected: newest first, filtered by status when requested, other guilds excluded
#[tokio::test]
async fn lists_tickets_by_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = chrono::Utc::now();
    let older = factory::ticket::TicketFactory::new(db)
        .guild_id("1")
        .created_at(now - chrono::Duration::hours(2))
        .build()
        .await?;
    let newer = factory::ticket::TicketFactory::new(db)
        .guild_id("1")
        .status(TicketStatus::Closed)
        .created_at(now - chrono::Duration::hours(1))
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db)
        .guild_id("2")
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    let all = repo.get_by_guild("1", None).await?;
    let ids: Vec<_> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);

    let open = repo.get_by_guild("1", Some(TicketStatus::Open)).await?;
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, older.id);

    Ok(())
}
