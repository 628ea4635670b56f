//! `/config` subcommands for per-guild settings.
//!
//! Restricted to members with Manage Server. Settings rows are created on first write.

use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, Permissions, ResolvedOption,
};

use crate::{
    bot::{
        command::{
            channel_option, missing_option, reply, require_guild, role_option, string_option,
            subcommand, CONFIG_COMMAND, TOGGLEABLE_COMMANDS,
        },
        handler::Handler,
    },
    data::ticket::TicketRepository,
    error::{auth::AuthError, AppError},
    model::{settings::CommandSettings, ticket::TicketStatus},
    service::guild_config::{EffectiveGuildConfig, GuildConfigService},
    util::channel_name::render_ticket_channel_name,
};

const MAX_TEMPLATE_LENGTH: u16 = 90;

pub fn register() -> CreateCommand {
    let toggle_option = || {
        let mut option = CreateCommandOption::new(
            CommandOptionType::String,
            "command",
            "The command to toggle",
        )
        .required(true);
        for name in TOGGLEABLE_COMMANDS {
            option = option.add_string_choice(*name, *name);
        }
        option
    };

    CreateCommand::new(CONFIG_COMMAND)
        .description("Configure the ticket bot for this server")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .add_option(subcommand_option("show", "Show the current configuration"))
        .add_option(
            subcommand_option("ticket-category", "Set the category for new tickets")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Channel,
                        "category",
                        "Ticket category",
                    )
                    .channel_types(vec![ChannelType::Category])
                    .required(true),
                ),
        )
        .add_option(
            subcommand_option("transcript-channel", "Set the transcript link channel")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Channel,
                        "channel",
                        "Transcript channel",
                    )
                    .channel_types(vec![ChannelType::Text])
                    .required(true),
                ),
        )
        .add_option(
            subcommand_option("channel-template", "Set the ticket channel name template")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "template",
                        "Channel name, {username} is replaced by the opener's name",
                    )
                    .max_length(MAX_TEMPLATE_LENGTH)
                    .required(true),
                ),
        )
        .add_option(
            subcommand_option("add-moderator-role", "Let a role see and close tickets")
                .add_sub_option(role_option_builder()),
        )
        .add_option(
            subcommand_option("remove-moderator-role", "Remove a moderator role")
                .add_sub_option(role_option_builder()),
        )
        .add_option(
            subcommand_option("disable-command", "Disable a command in this server")
                .add_sub_option(toggle_option()),
        )
        .add_option(
            subcommand_option("enable-command", "Enable a disabled command")
                .add_sub_option(toggle_option()),
        )
}

fn subcommand_option(name: &str, description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
}

fn role_option_builder() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Role, "role", "Moderator role").required(true)
}

pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;

    let permissions = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .unwrap_or_else(Permissions::empty);
    if !(permissions.manage_guild() || permissions.administrator()) {
        return Err(AuthError::AccessDenied(
            command.user.id.get(),
            "missing Manage Server permission".to_string(),
        )
        .into());
    }

    let Some((name, options)) = subcommand(command.data.options()) else {
        return Err(AppError::BadRequest("Unknown subcommand.".to_string()));
    };

    let guild = guild_id.get().to_string();
    let message = apply(handler, command, &guild, name, &options).await?;

    tracing::info!(
        "/config {} in guild {} by {}",
        name,
        guild,
        command.user.id
    );

    reply(ctx, command, message).await
}

async fn apply(
    handler: &Handler,
    command: &CommandInteraction,
    guild: &str,
    name: &str,
    options: &[ResolvedOption<'_>],
) -> Result<String, AppError> {
    let service = GuildConfigService::new(&handler.db, &handler.config);

    match name {
        "show" => {
            let effective = service.resolve(guild).await?;
            let commands = service.command_settings(guild).await?;
            let open_tickets = TicketRepository::new(&handler.db)
                .get_by_guild(guild, Some(TicketStatus::Open))
                .await?
                .len();
            Ok(describe_config(&effective, &commands, open_tickets))
        }
        "ticket-category" => {
            let category =
                channel_option(options, "category").ok_or_else(|| missing_option("category"))?;
            service
                .update_server_settings(guild, |settings| {
                    settings.ticket_category_id = Some(category.get().to_string())
                })
                .await?;
            Ok(format!("New tickets will be created in <#{}>.", category))
        }
        "transcript-channel" => {
            let channel =
                channel_option(options, "channel").ok_or_else(|| missing_option("channel"))?;
            service
                .update_server_settings(guild, |settings| {
                    settings.transcript_channel_id = Some(channel.get().to_string())
                })
                .await?;
            Ok(format!("Transcript links will be posted to <#{}>.", channel))
        }
        "channel-template" => {
            let template = string_option(options, "template")
                .map(str::trim)
                .filter(|template| !template.is_empty())
                .ok_or_else(|| missing_option("template"))?;
            service
                .update_server_settings(guild, |settings| {
                    settings.ticket_channel_name_template = Some(template.to_string())
                })
                .await?;
            Ok(format!(
                "Ticket channels will be named like `{}`.",
                render_ticket_channel_name(template, &command.user.name)
            ))
        }
        "add-moderator-role" => {
            let role = role_option(options, "role").ok_or_else(|| missing_option("role"))?;
            let (_, added) = service
                .update_moderation_settings(guild, |settings| {
                    settings.add_moderator_role(&role.get().to_string())
                })
                .await?;
            Ok(if added {
                format!("<@&{}> is now a moderator role.", role)
            } else {
                format!("<@&{}> already is a moderator role.", role)
            })
        }
        "remove-moderator-role" => {
            let role = role_option(options, "role").ok_or_else(|| missing_option("role"))?;
            let (_, removed) = service
                .update_moderation_settings(guild, |settings| {
                    settings.remove_moderator_role(&role.get().to_string())
                })
                .await?;
            Ok(if removed {
                format!("<@&{}> is no longer a moderator role.", role)
            } else {
                format!(
                    "<@&{}> is not a moderator role in this server's settings.",
                    role
                )
            })
        }
        "disable-command" | "enable-command" => {
            let target = toggle_target(options)?;
            let enable = name == "enable-command";
            let (_, changed) = service
                .update_command_settings(guild, |settings| {
                    if enable {
                        settings.enable(target)
                    } else {
                        settings.disable(target)
                    }
                })
                .await?;
            let state = if enable { "enabled" } else { "disabled" };
            Ok(if changed {
                format!("`/{}` is now {}.", target, state)
            } else {
                format!("`/{}` already was {}.", target, state)
            })
        }
        other => Err(AppError::BadRequest(format!("Unknown subcommand: {}", other))),
    }
}

fn toggle_target<'a>(options: &[ResolvedOption<'a>]) -> Result<&'a str, AppError> {
    let target = string_option(options, "command").ok_or_else(|| missing_option("command"))?;

    if TOGGLEABLE_COMMANDS.contains(&target) {
        Ok(target)
    } else {
        Err(AppError::BadRequest(format!(
            "`/{}` cannot be toggled.",
            target
        )))
    }
}

/// Human-readable summary for `/config show`.
fn describe_config(
    config: &EffectiveGuildConfig,
    commands: &CommandSettings,
    open_tickets: usize,
) -> String {
    let channel = |id: &Option<String>| match id {
        Some(id) => format!("<#{}>", id),
        None => "not set".to_string(),
    };
    let moderators = if config.moderator_role_ids.is_empty() {
        "none".to_string()
    } else {
        config
            .moderator_role_ids
            .iter()
            .map(|id| format!("<@&{}>", id))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let disabled = if commands.disabled_commands.is_empty() {
        "none".to_string()
    } else {
        commands
            .disabled_commands
            .iter()
            .map(|name| format!("`/{}`", name))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "**Ticket category:** {}\n**Transcript channel:** {}\n**Channel name template:** `{}`\n**Moderator roles:** {}\n**Disabled commands:** {}\n**Open tickets:** {}",
        channel(&config.ticket_category_id),
        channel(&config.transcript_channel_id),
        config.ticket_channel_name_template,
        moderators,
        disabled,
        open_tickets
    )
}
