use super::*;
use serde_json::json;

/// Tests replacing a ticket's data payload.
///
/// Verifies that known fields are updated and unknown keys written by other versions
/// are kept.
///
/// Expected: Ok(Some(ticket)) with merged payload stored
#[tokio::test]
async fn replaces_data_payload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::ticket::TicketFactory::new(db)
        .data(json!({ "reason": "help", "legacyFlag": true }))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let mut data = repo.get_by_id(&stored.id).await?.unwrap().data;
    data.closed_by = Some("42".to_string());

    let updated = repo.update_data(&stored.id, &data).await?.unwrap();
    assert_eq!(updated.data.closed_by.as_deref(), Some("42"));
    assert_eq!(updated.data.reason.as_deref(), Some("help"));

    let raw = entity::prelude::Ticket::find_by_id(stored.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(raw.data["legacyFlag"], json!(true));
    assert_eq!(raw.data["closedBy"], json!("42"));

    Ok(())
}

/// Tests that a malformed stored payload surfaces as an error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn rejects_malformed_stored_payload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::ticket::TicketFactory::new(db)
        .data(json!({ "reason": 12 }))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let result = repo.get_by_id(&stored.id).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
