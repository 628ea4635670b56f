use super::*;

/// Tests that closing a ticket stamps `closed_at`.
///
/// Expected: Ok(Some(ticket)) with status Closed and closed_at set
#[tokio::test]
async fn closing_sets_closed_at() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::create_ticket(db).await?;

    let repo = TicketRepository::new(db);
    let updated = repo
        .update_status(&stored.id, TicketStatus::Closed)
        .await?
        .unwrap();

    assert_eq!(updated.status, TicketStatus::Closed);
    assert!(updated.closed_at.is_some());

    Ok(())
}

/// Tests that re-opening a ticket clears `closed_at`.
///
/// Expected: Ok(Some(ticket)) with status Open and no closed_at
#[tokio::test]
async fn reopening_clears_closed_at() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::ticket::TicketFactory::new(db)
        .status(TicketStatus::Closed)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let updated = repo
        .update_status(&stored.id, TicketStatus::Open)
        .await?
        .unwrap();

    assert_eq!(updated.status, TicketStatus::Open);
    assert!(updated.closed_at.is_none());

    Ok(())
}

/// Tests that archiving keeps the original close time.
///
/// Expected: closed_at unchanged after archiving
#[tokio::test]
async fn archiving_preserves_closed_at() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::ticket::TicketFactory::new(db)
        .status(TicketStatus::Closed)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let updated = repo
        .update_status(&stored.id, TicketStatus::Archived)
        .await?
        .unwrap();

    assert_eq!(updated.status, TicketStatus::Archived);
    assert_eq!(updated.closed_at, stored.closed_at);

    Ok(())
}

/// Tests updating the status of a missing ticket.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let result = repo.update_status("missing", TicketStatus::Closed).await?;

    assert!(result.is_none());

    Ok(())
}
