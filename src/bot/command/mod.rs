//! Slash command definitions and shared option helpers.

pub mod config;
pub mod ticket;

use serenity::all::{
    ChannelId, CommandInteraction, Context, CreateCommand, EditInteractionResponse, GuildId,
    ResolvedOption, ResolvedValue, RoleId,
};

use crate::error::AppError;

pub const TICKET_COMMAND: &str = "ticket";
pub const CONFIG_COMMAND: &str = "config";

/// Commands a guild may switch off with `/config disable-command`.
pub const TOGGLEABLE_COMMANDS: &[&str] = &[TICKET_COMMAND];

/// Every slash command the bot registers.
pub fn commands() -> Vec<CreateCommand> {
    vec![ticket::register(), config::register()]
}

/// Replaces the deferred ephemeral reply.
pub async fn reply(
    ctx: &Context,
    command: &CommandInteraction,
    content: impl Into<String>,
) -> Result<(), AppError> {
    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;

    Ok(())
}

pub fn require_guild(command: &CommandInteraction) -> Result<GuildId, AppError> {
    command.guild_id.ok_or_else(|| {
        AppError::BadRequest("This command can only be used in a server.".to_string())
    })
}

/// Role ids of the invoking member, empty outside guilds.
pub fn member_role_ids(command: &CommandInteraction) -> Vec<String> {
    let Some(member) = &command.member else {
        return Vec::new();
    };

    member.roles.iter().map(|role| role.get().to_string()).collect()
}

/// Splits the invoked subcommand from its options.
pub fn subcommand<'a>(
    options: Vec<ResolvedOption<'a>>,
) -> Option<(&'a str, Vec<ResolvedOption<'a>>)> {
    options.into_iter().find_map(|option| match option.value {
        ResolvedValue::SubCommand(sub_options) => Some((option.name, sub_options)),
        _ => None,
    })
}

pub fn string_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match &option.value {
            ResolvedValue::String(value) => Some(*value),
            _ => None,
        })
}

pub fn channel_option(options: &[ResolvedOption<'_>], name: &str) -> Option<ChannelId> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match &option.value {
            ResolvedValue::Channel(channel) => Some(channel.id),
            _ => None,
        })
}

pub fn role_option(options: &[ResolvedOption<'_>], name: &str) -> Option<RoleId> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match &option.value {
            ResolvedValue::Role(role) => Some(role.id),
            _ => None,
        })
}

fn missing_option(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing required option `{}`.", name))
}
