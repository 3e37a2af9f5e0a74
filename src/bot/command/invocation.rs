use chrono::{DateTime, Local};
use serenity::all::{GuildId, Timestamp, UserId};

/// Context of a single command message, captured when it arrives.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub author: UserSnapshot,
    pub channel_id: u64,
    pub message_id: u64,
    /// `None` for direct messages.
    pub guild: Option<GuildSnapshot>,
    /// Whether the author holds Manage Server in the invoking channel.
    pub can_manage_guild: bool,
    /// Users mentioned in the message, in order.
    pub mentions: Vec<UserSnapshot>,
    pub received_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub bot: bool,
}

impl UserSnapshot {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// Account creation time, read from the id.
    pub fn created_at(&self) -> Timestamp {
        UserId::new(self.id).created_at()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSnapshot {
    pub id: u64,
    pub name: String,
    pub owner_id: u64,
    pub member_count: u64,
    pub channel_count: usize,
    pub role_count: usize,
}

impl GuildSnapshot {
    pub fn created_at(&self) -> Timestamp {
        GuildId::new(self.id).created_at()
    }
}
