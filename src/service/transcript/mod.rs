//! Archiving closed tickets as HTML transcripts and serving them back.

pub mod render;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    data::transcript::TranscriptRepository,
    error::AppError,
    model::{
        ticket::Ticket,
        transcript::{CreateTranscriptParam, Transcript, TranscriptMessage, TranscriptTicketInfo},
    },
};

pub struct TranscriptService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TranscriptService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Renders and stores the transcript of `ticket`.
    ///
    /// The transcript shares the ticket's id. If one already exists it is returned unchanged,
    /// so retrying a failed close does not fail on the duplicate key.
    ///
    /// # Arguments
    /// - `ticket` - The ticket being archived
    /// - `username` - Display name of the ticket opener, if known
    /// - `messages` - Channel history in any order
    pub async fn archive(
        &self,
        ticket: &Ticket,
        username: Option<String>,
        messages: &[TranscriptMessage],
    ) -> Result<Transcript, AppError> {
        let repo = TranscriptRepository::new(self.db);

        if let Some(existing) = repo.get_by_id(&ticket.id).await? {
            tracing::warn!(
                "Transcript for ticket {} already exists, keeping the stored copy",
                ticket.id
            );
            return Ok(existing);
        }

        let info = ticket_info(ticket, username, messages.len());
        let html = render::render(&info, messages);

        let transcript = repo
            .create(CreateTranscriptParam {
                id: ticket.id.clone(),
                html,
                ticket_info: info,
            })
            .await?;

        tracing::info!(
            "Archived ticket {} with {} messages",
            ticket.id,
            transcript.ticket_info.message_count
        );

        Ok(transcript)
    }

    /// Fetches a transcript without touching `accessed_at`.
    pub async fn get(&self, id: &str) -> Result<Option<Transcript>, AppError> {
        TranscriptRepository::new(self.db).get_by_id(id).await
    }

    /// Fetches a transcript for display and records the access.
    pub async fn view(&self, id: &str) -> Result<Option<Transcript>, AppError> {
        TranscriptRepository::new(self.db).mark_accessed(id).await
    }
}

fn ticket_info(
    ticket: &Ticket,
    username: Option<String>,
    message_count: usize,
) -> TranscriptTicketInfo {
    TranscriptTicketInfo {
        ticket_id: ticket.id.clone(),
        guild_id: ticket.guild_id.clone(),
        channel_id: ticket.channel_id.clone(),
        user_id: ticket.user_id.clone(),
        username,
        reason: ticket.data.reason.clone(),
        closed_by: ticket.data.closed_by.clone(),
        opened_at: Some(ticket.created_at),
        closed_at: Some(ticket.closed_at.unwrap_or_else(Utc::now)),
        message_count,
        extra: Default::default(),
    }
}
