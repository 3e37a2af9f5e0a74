//! Test factory for creating Serenity User objects.

use serenity::all::User;

/// Creates a test Serenity User.
///
/// The user uses the new username system (discriminator `0`) and has no global
/// display name, so `display_name()` returns the username.
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, username: &str, bot: bool) -> User {
    serde_json::from_value(serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": null,
        "avatar": null,
        "bot": bot,
    }))
    .expect("Failed to create test user - invalid JSON structure")
}
