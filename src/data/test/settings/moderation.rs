use super::*;

/// Tests storing moderator roles for a guild.
///
/// Expected: Ok with roles read back in insertion order
#[tokio::test]
async fn stores_moderator_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModerationSettingsRepository::new(db);
    let mut settings = repo.get_or_default("1").await?;
    settings.add_moderator_role("111");
    settings.add_moderator_role("222");
    repo.upsert("1", &settings).await?;

    let stored = repo.get("1").await?.unwrap();
    assert_eq!(stored.moderator_role_ids, vec!["111", "222"]);

    settings.remove_moderator_role("111");
    repo.upsert("1", &settings).await?;

    let count = entity::prelude::ModerationSettings::find().count(db).await?;
    assert_eq!(count, 1);
    assert_eq!(
        repo.get("1").await?,
        Some(ModerationSettings {
            moderator_role_ids: vec!["222".to_string()],
            ..Default::default()
        })
    );

    Ok(())
}

/// Tests that a stored payload with the wrong shape is reported, not silently dropped.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn malformed_payload_is_an_error() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_moderation_settings(db, "1", json!({ "moderatorRoleIds": 5 })).await?;

    let repo = ModerationSettingsRepository::new(db);
    let result = repo.get("1").await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
