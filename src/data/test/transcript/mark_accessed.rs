use super::*;

/// Tests that marking a transcript as accessed moves only `accessed_at`.
///
/// Expected: Ok(Some(transcript)) with a later accessed_at and unchanged created_at/html
#[tokio::test]
async fn updates_accessed_at() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Transcript)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created_at = chrono::Utc::now().timestamp_millis() - 60_000;
    let stored = factory::transcript::TranscriptFactory::new(db, "t1")
        .html("<p>hello</p>")
        .created_at(created_at)
        .build()
        .await?;

    let repo = TranscriptRepository::new(db);
    let updated = repo.mark_accessed("t1").await?.unwrap();

    assert_eq!(updated.created_at.timestamp_millis(), stored.created_at);
    assert!(updated.accessed_at.timestamp_millis() > stored.accessed_at);
    assert_eq!(updated.html, "<p>hello</p>");

    let raw = entity::prelude::Transcript::find_by_id("t1".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(raw.accessed_at, updated.accessed_at.timestamp_millis());

    Ok(())
}

/// Tests marking an unknown transcript.
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
    assert!(repo.mark_accessed("nope").await?.is_none());

    Ok(())
}
