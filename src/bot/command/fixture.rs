//! Helpers shared by command tests.

use chrono::{Local, TimeZone};
use serenity::async_trait;
use std::sync::Mutex;

use crate::bot::error::{content::ContentError, gateway::GatewayError};
use crate::bot::service::content::{ContentSource, DucatPrice, Meme, Quote};

use super::{GuildSnapshot, Invocation, OutboundMessage, Outbox, UserSnapshot};

pub const CHANNEL_ID: u64 = 555_000_000_000_000_001;
pub const AUTHOR_ID: u64 = 175_928_847_299_117_063;
pub const GUILD_ID: u64 = 197_038_439_483_310_086;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message { id: u64, message: OutboundMessage },
    Reaction { message_id: u64, emoji: String },
}

/// Outbox that records everything instead of talking to Discord.
#[derive(Default)]
pub struct RecordingOutbox {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
    fail_reactions: bool,
}

impl RecordingOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Delivers messages but rejects every reaction.
    pub fn failing_reactions() -> Self {
        Self {
            fail_reactions: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Message { message, .. } => Some(message.content),
                Sent::Reaction { .. } => None,
            })
            .collect()
    }

    pub fn reactions(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Reaction { emoji, .. } => Some(emoji),
                Sent::Message { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Outbox for RecordingOutbox {
    async fn send(&self, _channel_id: u64, message: OutboundMessage) -> Result<u64, GatewayError> {
        if self.fail {
            return Err(GatewayError::Transport("connection reset".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        let id = 1000 + sent.len() as u64;
        sent.push(Sent::Message { id, message });
        Ok(id)
    }

    async fn react(
        &self,
        _channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), GatewayError> {
        if self.fail || self.fail_reactions {
            return Err(GatewayError::Transport("connection reset".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Reaction {
            message_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }
}

pub fn user(id: u64, name: &str) -> UserSnapshot {
    UserSnapshot {
        id,
        name: name.to_string(),
        display_name: name.to_string(),
        bot: false,
    }
}

pub fn guild() -> GuildSnapshot {
    GuildSnapshot {
        id: GUILD_ID,
        name: "Tavern".to_string(),
        owner_id: AUTHOR_ID,
        member_count: 42,
        channel_count: 7,
        role_count: 5,
    }
}

/// A guild message from a regular member, received at 2025-01-01 12:00 local time.
pub fn invocation() -> Invocation {
    Invocation {
        author: user(AUTHOR_ID, "alice"),
        channel_id: CHANNEL_ID,
        message_id: 900,
        guild: Some(guild()),
        can_manage_guild: false,
        mentions: Vec::new(),
        received_at: Local
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .unwrap(),
    }
}

/// Content source returning canned data.
#[derive(Default)]
pub struct StubContent {
    pub ducats: Vec<DucatPrice>,
    pub news: Vec<String>,
    pub quote: Option<Quote>,
    pub meme: Option<Meme>,
    pub fail: bool,
}

impl StubContent {
    fn check(&self) -> Result<(), ContentError> {
        if self.fail {
            return Err(ContentError::UnexpectedResponse {
                source_name: "stub".to_string(),
                reason: "offline".to_string(),
            });
        }
        Ok(())
    }

    fn missing(what: &str) -> ContentError {
        ContentError::UnexpectedResponse {
            source_name: "stub".to_string(),
            reason: format!("no {what} configured"),
        }
    }
}

#[async_trait]
impl ContentSource for StubContent {
    async fn ducat_prices(&self, limit: usize) -> Result<Vec<DucatPrice>, ContentError> {
        self.check()?;
        Ok(self.ducats.iter().take(limit).cloned().collect())
    }

    async fn news_headlines(&self, limit: usize) -> Result<Vec<String>, ContentError> {
        self.check()?;
        Ok(self.news.iter().take(limit).cloned().collect())
    }

    async fn weather(&self, city: &str) -> Result<String, ContentError> {
        self.check()?;
        Ok(format!("{city}: ☀️ +21°C"))
    }

    async fn quote(&self) -> Result<Quote, ContentError> {
        self.check()?;
        self.quote.clone().ok_or_else(|| Self::missing("quote"))
    }

    async fn meme(&self) -> Result<Meme, ContentError> {
        self.check()?;
        self.meme.clone().ok_or_else(|| Self::missing("meme"))
    }
}
