//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a closed ticket together with the transcript archived from it.
///
/// The transcript id equals the ticket id, mirroring how tickets are archived.
///
/// # Returns
/// - `Ok((ticket, transcript))` - Both created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_archived_ticket(
    db: &DatabaseConnection,
) -> Result<(entity::ticket::Model, entity::transcript::Model), DbErr> {
    let ticket = crate::factory::ticket::TicketFactory::new(db)
        .status(entity::sea_orm_active_enums::TicketStatus::Closed)
        .build()
        .await?;
    let transcript = crate::factory::transcript::TranscriptFactory::new(db, &ticket.id)
        .ticket_info(serde_json::json!({
            "ticketId": ticket.id,
            "guildId": ticket.guild_id,
            "channelId": ticket.channel_id,
            "userId": ticket.user_id,
        }))
        .build()
        .await?;

    Ok((ticket, transcript))
}
