use super::*;

/// Tests reading settings for a guild that was never configured.
///
/// Expected: Ok(None) from get, defaults from get_or_default, no row created
#[tokio::test]
async fn unconfigured_guild_has_no_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerSettingsRepository::new(db);

    assert!(repo.get("1").await?.is_none());
    assert_eq!(repo.get_or_default("1").await?, ServerSettings::default());

    let count = entity::prelude::ServerSettings::find().count(db).await?;
    assert_eq!(count, 0);

    Ok(())
}

/// Tests that two writes for the same guild leave exactly one row.
///
/// Expected: Ok with one row holding the second write
#[tokio::test]
async fn repeated_writes_keep_one_row_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerSettingsRepository::new(db);

    let first = ServerSettings {
        ticket_category_id: Some("10".to_string()),
        ..Default::default()
    };
    repo.upsert("1", &first).await?;

    let second = ServerSettings {
        ticket_category_id: Some("20".to_string()),
        transcript_channel_id: Some("30".to_string()),
        ..Default::default()
    };
    let stored = repo.upsert("1", &second).await?;
    assert_eq!(stored, second);

    let count = entity::prelude::ServerSettings::find().count(db).await?;
    assert_eq!(count, 1);

    assert_eq!(repo.get("1").await?, Some(second));

    Ok(())
}

/// Tests that settings of different guilds are kept apart.
///
/// Expected: Ok with two independent rows
#[tokio::test]
async fn guilds_are_isolated() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerSettingsRepository::new(db);
    repo.upsert(
        "1",
        &ServerSettings {
            ticket_channel_name_template: Some("help-{username}".to_string()),
            ..Default::default()
        },
    )
    .await?;
    repo.upsert("2", &ServerSettings::default()).await?;

    let first = repo.get("1").await?.unwrap();
    let second = repo.get("2").await?.unwrap();
    assert_eq!(
        first.ticket_channel_name_template.as_deref(),
        Some("help-{username}")
    );
    assert!(second.ticket_channel_name_template.is_none());

    Ok(())
}

/// Tests that keys unknown to this version survive a read-modify-write.
///
/// Expected: Ok with the legacy key still stored
#[tokio::test]
async fn preserves_unknown_keys() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_server_settings(db, "1", json!({ "welcomeChannelId": "99" })).await?;

    let repo = ServerSettingsRepository::new(db);
    let mut settings = repo.get_or_default("1").await?;
    settings.ticket_category_id = Some("5".to_string());
    repo.upsert("1", &settings).await?;

    let raw = entity::prelude::ServerSettings::find_by_id("1".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(
        raw.settings,
        json!({ "ticketCategoryId": "5", "welcomeChannelId": "99" })
    );

    Ok(())
}
