//! Test factory for creating Serenity Message objects.

use serenity::all::{Message, User};

use crate::factory::{TEST_CHANNEL_ID, TEST_GUILD_ID};

/// Creates a test Serenity Message posted in the test guild's channel.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake)
/// - `author` - Message author
/// - `content` - Message text
/// - `mentions` - Users mentioned in the message
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_message(
    message_id: u64,
    author: &User,
    content: &str,
    mentions: &[User],
) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": TEST_CHANNEL_ID.to_string(),
        "guild_id": TEST_GUILD_ID.to_string(),
        "author": author,
        "content": content,
        "timestamp": "2025-01-01T12:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": mentions,
        "mention_roles": [],
        "mention_channels": [],
        "attachments": [],
        "embeds": [],
        "reactions": [],
        "pinned": false,
        "type": 0,
        "components": [],
        "sticker_items": [],
    }))
    .expect("Failed to create test message - invalid JSON structure")
}
