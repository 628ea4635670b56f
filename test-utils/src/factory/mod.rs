//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let ticket = factory::ticket::TicketFactory::new(&db)
//!     .guild_id("100")
//!     .user_id("200")
//!     .status(TicketStatus::Closed)
//!     .build()
//!     .await?;
//!
//! let transcript = factory::create_transcript(&db, &ticket.id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `ticket` - Create ticket entities
//! - `transcript` - Create transcript entities
//! - `settings` - Create rows in the three per-guild settings tables
//! - `helpers` - Id generation and multi-entity helpers

pub mod helpers;
pub mod settings;
pub mod ticket;
pub mod transcript;

pub use settings::{create_command_settings, create_moderation_settings, create_server_settings};
pub use ticket::create_ticket;
pub use transcript::create_transcript;
