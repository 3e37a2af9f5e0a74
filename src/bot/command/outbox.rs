use serenity::async_trait;
use std::path::PathBuf;

use crate::bot::error::gateway::GatewayError;

/// A message to post, optionally with a file attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub content: String,
    pub attachment: Option<PathBuf>,
}

impl OutboundMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attachment: None,
        }
    }
}

/// Where command replies go.
///
/// Implemented over the live gateway connection, and by recording fakes in tests.
#[async_trait]
pub trait Outbox: Send + Sync {
    /// Posts a message, returning the id of the created message.
    async fn send(&self, channel_id: u64, message: OutboundMessage) -> Result<u64, GatewayError>;

    async fn react(&self, channel_id: u64, message_id: u64, emoji: &str)
        -> Result<(), GatewayError>;
}
