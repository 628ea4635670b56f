use super::*;

/// Tests creating a new ticket.
///
/// Verifies that the ticket is stored open, with a generated id, no close time and
/// the provided data payload.
///
/// Expected: Ok with ticket created
#[tokio::test]
async fn creates_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let mut create = param("1", "2", "3");
    create.data.reason = Some("Refund request".to_string());

    let ticket = repo.create(create).await?;

    assert_eq!(ticket.id.len(), 12);
    assert!(ticket
        .id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    assert_eq!(ticket.guild_id, "1");
    assert_eq!(ticket.channel_id, "2");
    assert_eq!(ticket.user_id, "3");
    assert_eq!(ticket.status, TicketStatus::Open);
    assert!(ticket.closed_at.is_none());
    assert_eq!(ticket.data.reason.as_deref(), Some("Refund request"));

    let stored = entity::prelude::Ticket::find_by_id(ticket.id.clone())
        .one(db)
        .await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests that every created ticket receives a distinct id.
///
/// Expected: Ok with three rows and three different ids
#[tokio::test]
async fn generates_unique_ids() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let a = repo.create(param("1", "10", "3")).await?;
    let b = repo.create(param("1", "11", "3")).await?;
    let c = repo.create(param("1", "12", "4")).await?;

    assert_ne!(a.id, b.id);
    assert_ne!(a.id, c.id);
    assert_ne!(b.id, c.id);

    let count = entity::prelude::Ticket::find().count(db).await?;
    assert_eq!(count, 3);

    Ok(())
}
