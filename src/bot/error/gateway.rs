use serenity::http::HttpError;
use std::time::Duration;
use thiserror::Error;

/// Failures reported by the gateway adapter.
///
/// This is the narrow vocabulary the session needs from the Discord client; the
/// serenity error tree is collapsed into it at the adapter boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Discord rejected the token during the handshake.
    #[error("Discord rejected the bot token")]
    InvalidCredential,

    /// The channel is unknown or the bot lacks access to it.
    #[error("Channel {0} was not found")]
    ChannelNotFound(u64),

    /// HTTP 429 from Discord.
    #[error("Rate limited by Discord")]
    RateLimited { retry_after: Option<Duration> },

    /// Any other transport, gateway or HTTP failure.
    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    /// Maps a serenity error raised while operating on `channel_id`.
    ///
    /// Unknown-channel and missing-access responses become `ChannelNotFound` so the
    /// operator sees the same error whether or not the channel exists.
    pub fn for_channel(err: serenity::Error, channel_id: u64) -> Self {
        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
            let status = response.status_code.as_u16();
            if status == 403 || status == 404 {
                return Self::ChannelNotFound(channel_id);
            }
        }
        Self::from(err)
    }
}

impl From<serenity::Error> for GatewayError {
    fn from(err: serenity::Error) -> Self {
        match &err {
            serenity::Error::Gateway(serenity::gateway::GatewayError::InvalidAuthentication) => {
                Self::InvalidCredential
            }
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                match response.status_code.as_u16() {
                    401 => Self::InvalidCredential,
                    429 => Self::RateLimited { retry_after: None },
                    _ => Self::Transport(err.to_string()),
                }
            }
            _ => Self::Transport(err.to_string()),
        }
    }
}
