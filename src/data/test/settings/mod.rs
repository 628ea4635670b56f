use crate::{
    data::settings::{
        CommandSettingsRepository, ModerationSettingsRepository, ServerSettingsRepository,
    },
    error::AppError,
    model::settings::{CommandSettings, ModerationSettings, ServerSettings},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

mod command;
mod moderation;
mod server;
