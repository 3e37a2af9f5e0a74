use std::time::Duration;
use thiserror::Error;

use crate::bot::error::gateway::GatewayError;

/// Failures of [`SessionManager`](crate::bot::session::SessionManager) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The credential is empty or does not look like a bot token.
    #[error("Invalid or missing bot token")]
    InvalidCredential,

    /// A session is already connecting or connected.
    #[error("The bot is already running")]
    AlreadyRunning,

    /// No session is connecting or connected.
    #[error("The bot is not running")]
    NotRunning,

    /// The session is still completing its handshake and cannot serve the request yet.
    #[error("The bot is still connecting")]
    NotReady,

    /// The channel id is not a Discord snowflake.
    #[error("'{0}' is not a valid channel id")]
    InvalidChannelId(String),

    /// The channel does not exist or is not visible to the bot.
    #[error("Channel {0} was not found")]
    ChannelNotFound(u64),

    /// Discord throttled the request; back off and retry.
    ///
    /// This is recoverable and must not be treated as a session failure.
    #[error("Rate limited by Discord")]
    RateLimited { retry_after: Option<Duration> },

    /// Handshake or transport failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The session thread did not answer within the caller's bound.
    #[error("Timed out waiting for the bot session")]
    Timeout,

    /// The session thread has shut down.
    #[error("The bot session has shut down")]
    Closed,
}

impl SessionError {
    /// Whether the caller should back off and retry rather than report a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout | Self::NotReady)
    }
}

impl From<GatewayError> for SessionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidCredential => Self::InvalidCredential,
            GatewayError::ChannelNotFound(id) => Self::ChannelNotFound(id),
            GatewayError::RateLimited { retry_after } => Self::RateLimited { retry_after },
            GatewayError::Transport(reason) => Self::Connection(reason),
        }
    }
}
