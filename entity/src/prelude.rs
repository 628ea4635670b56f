pub use super::command_settings::Entity as CommandSettings;
pub use super::moderation_settings::Entity as ModerationSettings;
pub use super::server_settings::Entity as ServerSettings;
pub use super::ticket::Entity as Ticket;
pub use super::transcript::Entity as Transcript;
