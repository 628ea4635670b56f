//! Slash command dispatch.
//!
//! Every command is deferred as an ephemeral reply first, then the command module edits the
//! reply. Errors are logged here and reported to the user with a generic message.

use serenity::all::{CommandInteraction, Context, Interaction};

use crate::{
    bot::{
        command::{config, reply, ticket, CONFIG_COMMAND, TICKET_COMMAND},
        handler::Handler,
    },
    error::{auth::AuthError, AppError},
};

pub async fn handle_interaction_create(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to acknowledge /{}: {}", command.data.name, e);
        return;
    }

    if let Err(e) = dispatch(handler, &ctx, &command).await {
        log_command_error(&command, &e);

        if let Err(e) = reply(&ctx, &command, e.user_message()).await {
            tracing::error!("Failed to report error for /{}: {}", command.data.name, e);
        }
    }
}

async fn dispatch(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        TICKET_COMMAND => ticket::run(handler, ctx, command).await,
        CONFIG_COMMAND => config::run(handler, ctx, command).await,
        other => Err(AppError::BadRequest(format!("Unknown command: /{}", other))),
    }
}

/// User mistakes are expected; only unexpected failures are logged as errors.
fn log_command_error(command: &CommandInteraction, error: &AppError) {
    let user = command.user.id;
    match error {
        AppError::BadRequest(_)
        | AppError::NotFound(_)
        | AppError::AuthErr(AuthError::AccessDenied(_, _)) => {
            tracing::debug!("/{} by {} rejected: {}", command.data.name, user, error)
        }
        _ => tracing::error!("/{} by {} failed: {}", command.data.name, user, error),
    }
}
