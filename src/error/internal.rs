use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a Discord snowflake id from String
    ///
    /// Ids are stored as strings; a stored value that is not a valid `u64` results in a
    /// 500 Internal Server Error with a generic message returned to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A snowflake id string that parses but is zero.
    ///
    /// Discord never issues id 0 and serenity's id types cannot hold it.
    #[error("Discord id must be non-zero, got '{0}'")]
    ZeroId(String),

    /// A JSON payload column does not match its expected shape.
    #[error("Malformed {kind} payload: {source}")]
    MalformedPayload {
        /// Which payload failed to decode (e.g. "server settings")
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A stored epoch-millisecond timestamp is outside the representable range.
    #[error("Invalid epoch millisecond timestamp {0}")]
    InvalidTimestamp(i64),
}
