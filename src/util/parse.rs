use crate::error::{internal::InternalError, AppError};

/// Parses a Discord snowflake id stored as a string.
///
/// # Arguments
/// - `value` - The string to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed id
/// - `Err(AppError::InternalErr(ParseStringId))` - The string is not a valid `u64`
pub fn parse_u64_from_str(value: &str) -> Result<u64, AppError> {
    let result = value
        .trim()
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    Ok(result)
}

/// Parses a Discord snowflake id that will be turned into a serenity id type.
///
/// Serenity ids are non-zero, so `0` is rejected here instead of panicking in
/// `ChannelId::new` and friends.
///
/// # Returns
/// - `Ok(u64)` - Non-zero id
/// - `Err(AppError::InternalErr(ParseStringId))` - The string is not a valid `u64`
/// - `Err(AppError::InternalErr(ZeroId))` - The string is `0`
pub fn parse_snowflake(value: &str) -> Result<u64, AppError> {
    match parse_u64_from_str(value)? {
        0 => Err(InternalError::ZeroId(value.to_string()).into()),
        id => Ok(id),
    }
}
