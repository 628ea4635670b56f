//! Typed per-guild settings payloads.
//!
//! Each settings table stores a single JSON object per guild. These structs give the known
//! keys a fixed shape while keeping any unknown keys in `extra`, so payloads written by
//! earlier versions of the bot survive a read-modify-write cycle unchanged.

use std::collections::BTreeSet;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::internal::InternalError;

/// Conversion between a settings struct and its JSON column.
pub trait SettingsPayload: Serialize + DeserializeOwned + Default {
    /// Human readable name used in error messages.
    const KIND: &'static str;

    /// Decodes a stored payload, validating it against the known keys.
    fn from_json(value: Value) -> Result<Self, InternalError> {
        serde_json::from_value(value).map_err(|source| InternalError::MalformedPayload {
            kind: Self::KIND,
            source,
        })
    }

    /// Encodes the payload for storage.
    fn to_json(&self) -> Result<Value, InternalError> {
        serde_json::to_value(self).map_err(|source| InternalError::MalformedPayload {
            kind: Self::KIND,
            source,
        })
    }
}

/// General guild configuration; overrides the environment defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_channel_name_template: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsPayload for ServerSettings {
    const KIND: &'static str = "server settings";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModerationSettings {
    /// Guild-specific moderator roles, merged with `MODERATOR_ROLE_IDS`.
    pub moderator_role_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModerationSettings {
    /// Adds a moderator role. Returns `false` if it was already present.
    pub fn add_moderator_role(&mut self, role_id: &str) -> bool {
        if self.moderator_role_ids.iter().any(|id| id == role_id) {
            return false;
        }
        self.moderator_role_ids.push(role_id.to_string());
        true
    }

    /// Removes a moderator role. Returns `false` if it was not present.
    pub fn remove_moderator_role(&mut self, role_id: &str) -> bool {
        let before = self.moderator_role_ids.len();
        self.moderator_role_ids.retain(|id| id != role_id);
        before != self.moderator_role_ids.len()
    }
}

impl SettingsPayload for ModerationSettings {
    const KIND: &'static str = "moderation settings";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommandSettings {
    pub disabled_commands: BTreeSet<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommandSettings {
    pub fn is_enabled(&self, command: &str) -> bool {
        !self.disabled_commands.contains(command)
    }

    /// Returns `false` if the command was already disabled.
    pub fn disable(&mut self, command: &str) -> bool {
        self.disabled_commands.insert(command.to_string())
    }

    /// Returns `false` if the command was not disabled.
    pub fn enable(&mut self, command: &str) -> bool {
        self.disabled_commands.remove(command)
    }
}

impl SettingsPayload for CommandSettings {
    const KIND: &'static str = "command settings";
}
