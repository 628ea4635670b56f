use super::*;

/// Tests disabling a command for one guild.
///
/// Expected: Ok with the command disabled only in that guild
#[tokio::test]
async fn disabled_commands_are_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CommandSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandSettingsRepository::new(db);
    let mut settings = CommandSettings::default();
    settings.disable("ticket");
    repo.upsert("1", &settings).await?;

    assert!(!repo.get_or_default("1").await?.is_enabled("ticket"));
    assert!(repo.get_or_default("2").await?.is_enabled("ticket"));

    Ok(())
}

/// Tests reading an empty settings object written with the column default.
///
/// Expected: Ok(Some(default settings))
#[tokio::test]
async fn empty_payload_reads_as_defaults() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CommandSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_command_settings(db, "1", json!({})).await?;

    let repo = CommandSettingsRepository::new(db);
    assert_eq!(repo.get("1").await?, Some(CommandSettings::default()));

    Ok(())
}
