//! `/ticket open` and `/ticket close`.

use chrono::DateTime;
use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, CommandOptionType, Context, CreateAllowedMentions,
    CreateChannel, CreateCommand, CreateCommandOption, CreateMessage, GetMessages, GuildId,
    Message, MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId,
};

use crate::{
    bot::{
        command::{
            member_role_ids, reply, require_guild, string_option, subcommand, TICKET_COMMAND,
        },
        handler::Handler,
    },
    error::{auth::AuthError, AppError},
    model::{
        ticket::{is_active, CreateTicketParam, TicketData, TicketStatus},
        transcript::{TranscriptAttachment, TranscriptMessage},
    },
    service::{
        guild_config::GuildConfigService, ticket::TicketService,
        transcript::TranscriptService,
    },
    util::{channel_name::render_ticket_channel_name, parse::parse_snowflake},
};

const HISTORY_PAGE_SIZE: u8 = 100;
const MAX_TRANSCRIPT_MESSAGES: usize = 5_000;
const MAX_REASON_LENGTH: u16 = 1_000;

pub fn register() -> CreateCommand {
    CreateCommand::new(TICKET_COMMAND)
        .description("Open or close a support ticket")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "open",
                "Open a private support ticket",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "reason",
                    "What do you need help with?",
                )
                .max_length(MAX_REASON_LENGTH)
                .required(false),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "close",
                "Close this ticket and archive its transcript",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "reason",
                    "Why the ticket is being closed",
                )
                .max_length(MAX_REASON_LENGTH)
                .required(false),
            ),
        )
}

pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?;

    let enabled = GuildConfigService::new(&handler.db, &handler.config)
        .is_command_enabled(&guild_id.get().to_string(), TICKET_COMMAND)
        .await?;
    if !enabled {
        return Err(AppError::BadRequest(
            "Tickets are disabled in this server.".to_string(),
        ));
    }

    let Some((name, options)) = subcommand(command.data.options()) else {
        return Err(AppError::BadRequest("Unknown subcommand.".to_string()));
    };
    let reason = string_option(&options, "reason").map(str::to_string);

    match name {
        "open" => open(handler, ctx, command, guild_id, reason).await,
        "close" => close(handler, ctx, command, guild_id, reason).await,
        other => Err(AppError::BadRequest(format!("Unknown subcommand: {}", other))),
    }
}

/// Creates the private ticket channel and records the ticket.
///
/// If storing the ticket fails the channel is deleted again.
async fn open(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: GuildId,
    reason: Option<String>,
) -> Result<(), AppError> {
    let guild = guild_id.get().to_string();
    let user = command.user.id.get().to_string();

    let guild_config = GuildConfigService::new(&handler.db, &handler.config)
        .resolve(&guild)
        .await?;
    let ticket_service = TicketService::new(&handler.db);
    ticket_service.ensure_can_open(&guild, &user).await?;

    let channel_name = render_ticket_channel_name(
        &guild_config.ticket_channel_name_template,
        &command.user.name,
    );
    let bot_id = ctx.cache.current_user().id;
    let overwrites = ticket_permission_overwrites(
        guild_id,
        bot_id,
        command.user.id,
        &guild_config.moderator_role_ids,
    );

    let mut builder = CreateChannel::new(channel_name)
        .kind(ChannelType::Text)
        .topic(format!("Support ticket for {}", command.user.name))
        .permissions(overwrites);
    if let Some(category_id) = &guild_config.ticket_category_id {
        builder = builder.category(ChannelId::new(parse_snowflake(category_id)?));
    }

    let channel = guild_id.create_channel(&ctx.http, builder).await?;

    let ticket = match ticket_service
        .open(CreateTicketParam {
            guild_id: guild,
            channel_id: channel.id.get().to_string(),
            user_id: user,
            data: TicketData {
                reason: reason.clone(),
                ..Default::default()
            },
        })
        .await
    {
        Ok(ticket) => ticket,
        Err(e) => {
            if let Err(delete_err) = channel.id.delete(&ctx.http).await {
                tracing::error!(
                    "Failed to delete channel {} after ticket creation failed: {}",
                    channel.id,
                    delete_err
                );
            }
            return Err(e);
        }
    };

    let welcome = format!(
        "<@{}> opened ticket `{}`.\nReason: {}\nA moderator will be with you shortly. Use `/ticket close` when you are done.",
        command.user.id,
        ticket.id,
        reason.as_deref().unwrap_or("none given")
    );
    if let Err(e) = channel
        .id
        .send_message(&ctx.http, CreateMessage::new().content(welcome))
        .await
    {
        tracing::warn!("Failed to post welcome message in {}: {}", channel.id, e);
    }

    reply(
        ctx,
        command,
        format!("Your ticket has been opened: <#{}>", channel.id),
    )
    .await
}

/// Closes the ticket of the current channel, archives its history and deletes the channel.
///
/// A ticket already `Closed` whose channel still exists is an earlier close that failed
/// while archiving; it is archived again instead of being rejected.
async fn close(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: GuildId,
    reason: Option<String>,
) -> Result<(), AppError> {
    let guild = guild_id.get().to_string();
    let closer = command.user.id.get().to_string();
    let ticket_service = TicketService::new(&handler.db);

    let Some(ticket) = ticket_service
        .get_by_channel(&command.channel_id.get().to_string())
        .await?
    else {
        return Err(AppError::BadRequest(
            "This command can only be used inside a ticket channel.".to_string(),
        ));
    };
    if ticket.status == TicketStatus::Archived {
        return Err(AppError::BadRequest(
            "This ticket has already been archived.".to_string(),
        ));
    }

    let guild_config = GuildConfigService::new(&handler.db, &handler.config)
        .resolve(&guild)
        .await?;
    if ticket.user_id != closer && !guild_config.is_moderator(&member_role_ids(command)) {
        return Err(AuthError::AccessDenied(
            command.user.id.get(),
            format!("may not close ticket {}", ticket.id),
        )
        .into());
    }

    let messages = fetch_history(ctx, command.channel_id).await?;

    let ticket = if is_active(ticket.status) {
        ticket_service.close(&ticket.id, &closer, reason).await?
    } else {
        ticket
    };

    let username = match parse_snowflake(&ticket.user_id) {
        Ok(id) => ctx.http.get_user(UserId::new(id)).await.ok().map(|user| user.name),
        Err(_) => None,
    };

    let transcript = TranscriptService::new(&handler.db)
        .archive(&ticket, username, &messages)
        .await?;
    ticket_service
        .transition(&ticket.id, TicketStatus::Archived)
        .await?;

    let transcript_url = handler.config.transcript_url(&transcript.id);

    match guild_config
        .transcript_channel_id
        .as_deref()
        .and_then(transcript_notice_channel)
    {
        Some(channel_id) => {
            let notice = format!(
                "Ticket `{}` opened by <@{}> was closed by <@{}>.\nReason: {}\nTranscript: {}",
                ticket.id,
                ticket.user_id,
                closer,
                ticket.data.close_reason.as_deref().unwrap_or("none given"),
                transcript_url
            );
            let message = CreateMessage::new()
                .content(notice)
                .allowed_mentions(CreateAllowedMentions::new());

            if let Err(e) = channel_id.send_message(&ctx.http, message).await {
                tracing::error!(
                    "Failed to post transcript link to channel {}: {}",
                    channel_id,
                    e
                );
            }
        }
        None => tracing::warn!(
            "No usable transcript channel for guild {}, transcript {} not announced",
            guild,
            transcript.id
        ),
    }

    reply(
        ctx,
        command,
        format!(
            "Ticket closed. Transcript: {}\nThis channel will now be deleted.",
            transcript_url
        ),
    )
    .await?;

    if let Err(e) = command.channel_id.delete(&ctx.http).await {
        tracing::error!(
            "Failed to delete ticket channel {}: {}",
            command.channel_id,
            e
        );
    }

    Ok(())
}

/// Permission overwrites hiding the ticket channel from everyone except the bot, the opener
/// and the moderator roles.
fn ticket_permission_overwrites(
    guild_id: GuildId,
    bot_id: UserId,
    opener_id: UserId,
    moderator_role_ids: &[String],
) -> Vec<PermissionOverwrite> {
    let participant = Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::ATTACH_FILES
        | Permissions::EMBED_LINKS;

    let mut overwrites = vec![
        // The @everyone role shares the guild's id.
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow: participant | Permissions::MANAGE_CHANNELS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot_id),
        },
        PermissionOverwrite {
            allow: participant,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(opener_id),
        },
    ];

    for role_id in moderator_role_ids {
        match parse_snowflake(role_id) {
            Ok(id) => overwrites.push(PermissionOverwrite {
                allow: participant | Permissions::MANAGE_MESSAGES,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(RoleId::new(id)),
            }),
            _ => tracing::warn!("Ignoring invalid moderator role id {:?}", role_id),
        }
    }

    overwrites
}

/// Channel to announce archived transcripts in.
///
/// The ticket is already archived when this runs, so a bad id is logged and skipped to let
/// the reply and channel deletion still happen.
fn transcript_notice_channel(channel_id: &str) -> Option<ChannelId> {
    match parse_snowflake(channel_id) {
        Ok(id) => Some(ChannelId::new(id)),
        Err(e) => {
            tracing::warn!(
                "Ignoring invalid transcript channel id {:?}: {}",
                channel_id,
                e
            );
            None
        }
    }
}

/// Reads the channel history, oldest message first.
async fn fetch_history(
    ctx: &Context,
    channel_id: ChannelId,
) -> Result<Vec<TranscriptMessage>, AppError> {
    let mut messages = Vec::new();
    let mut before: Option<MessageId> = None;

    loop {
        let mut request = GetMessages::new().limit(HISTORY_PAGE_SIZE);
        if let Some(before) = before {
            request = request.before(before);
        }

        // Pages are returned newest first.
        let page = channel_id.messages(&ctx.http, request).await?;
        let fetched = page.len();
        before = page.last().map(|message| message.id);
        messages.extend(page.iter().map(to_transcript_message));

        if fetched < HISTORY_PAGE_SIZE as usize || messages.len() >= MAX_TRANSCRIPT_MESSAGES {
            break;
        }
    }

    if messages.len() >= MAX_TRANSCRIPT_MESSAGES {
        tracing::warn!(
            "Transcript of channel {} truncated to the latest {} messages",
            channel_id,
            messages.len()
        );
    }

    messages.reverse();
    Ok(messages)
}

fn to_transcript_message(message: &Message) -> TranscriptMessage {
    TranscriptMessage {
        author_id: message.author.id.get().to_string(),
        author_name: message
            .author
            .global_name
            .clone()
            .unwrap_or_else(|| message.author.name.clone()),
        is_bot: message.author.bot,
        content: message.content.clone(),
        sent_at: DateTime::from_timestamp(message.timestamp.unix_timestamp(), 0)
            .unwrap_or_default(),
        attachments: message
            .attachments
            .iter()
            .map(|attachment| TranscriptAttachment {
                filename: attachment.filename.clone(),
                url: attachment.url.clone(),
            })
            .collect(),
    }
}
