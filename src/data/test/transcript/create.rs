use super::*;
use serde_json::json;

fn ticket_info() -> TranscriptTicketInfo {
    let mut extra = serde_json::Map::new();
    extra.insert("tags".to_string(), json!(["billing", { "nested": true }]));

    TranscriptTicketInfo {
        ticket_id: "abc123".to_string(),
        guild_id: "1".to_string(),
        channel_id: "2".to_string(),
        user_id: "3".to_string(),
        username: Some("alice".to_string()),
        reason: Some("Need help".to_string()),
        closed_by: Some("4".to_string()),
        opened_at: Some(chrono::Utc::now() - chrono::Duration::hours(1)),
        closed_at: Some(chrono::Utc::now()),
        message_count: 12,
        extra,
    }
}

/// Tests storing and reading back a transcript.
///
/// Verifies that html is byte-identical and ticket info structurally identical after a
/// round trip through the database.
///
/// Expected: Ok with identical content
#[tokio::test]
async fn stored_transcript_is_retrievable_by_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Transcript)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let html = "<!DOCTYPE html>\n<p>caf\u{e9} &amp; \u{1f600} \"quoted\"</p>\r\n".to_string();
    let info = ticket_info();

    let repo = TranscriptRepository::new(db);
    let created = repo
        .create(CreateTranscriptParam {
            id: "abc123".to_string(),
            html: html.clone(),
            ticket_info: info.clone(),
        })
        .await?;

    assert_eq!(created.created_at, created.accessed_at);

    let found = repo.get_by_id("abc123").await?.unwrap();
    assert_eq!(found.html.as_bytes(), html.as_bytes());
    assert_eq!(found.ticket_info, info);

    Ok(())
}

/// Tests that a transcript id can only be stored once.
///
/// Expected: Err on the second insert, original content kept
#[tokio::test]
async fn rejects_duplicate_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Transcript)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::transcript::TranscriptFactory::new(db, "dup")
        .html("original")
        .build()
        .await?;

    let repo = TranscriptRepository::new(db);
    let result = repo
        .create(CreateTranscriptParam {
            id: "dup".to_string(),
            html: "replacement".to_string(),
            ticket_info: ticket_info(),
        })
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    let stored = entity::prelude::Transcript::find_by_id("dup".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.html, "original");

    Ok(())
}

/// Tests looking up an unknown transcript.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Transcript)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TranscriptRepository::new(db);
    assert!(repo.get_by_id("nope").await?.is_none());

    Ok(())
}

/// Tests that reading a transcript leaves `accessed_at` alone.
///
/// Expected: Ok(Some) with accessed_at equal to the stored value
#[tokio::test]
async fn lookup_does_not_touch_accessed_at() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Transcript)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::create_transcript(db, "quiet").await?;

    let repo = TranscriptRepository::new(db);
    let found = repo.get_by_id("quiet").await?.unwrap();
    assert_eq!(found.accessed_at.timestamp_millis(), stored.accessed_at);

    Ok(())
}
