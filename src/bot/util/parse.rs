use serenity::utils::parse_channel_mention;

use crate::bot::error::session::SessionError;

/// Parses a Discord snowflake id from operator input.
///
/// Accepts surrounding whitespace and a channel mention (`<#123>`). Zero is not a
/// valid snowflake.
///
/// # Arguments
/// - `value` - The text to attempt to parse into a snowflake
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed id
/// - `Err(SessionError::InvalidChannelId)` - Text is not a positive integer id
pub fn parse_channel_id(value: &str) -> Result<u64, SessionError> {
    let trimmed = value.trim();
    if let Some(channel_id) = parse_channel_mention(trimmed) {
        return Ok(channel_id.get());
    }

    match trimmed.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(SessionError::InvalidChannelId(value.to_string())),
    }
}
