//! Operator actions behind the control panel.
//!
//! Every method that reaches the session submits work and awaits the answer, so
//! calling from the UI's event loop never blocks it.

use chrono::{DateTime, Local};
use dioxus_logger::tracing;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::bot::bridge::EventBridge;
use crate::bot::error::{config::ConfigError, session::SessionError, AppError};
use crate::bot::service::{AutoModService, TokenStore};
use crate::bot::session::{Pending, SessionManager};
use crate::model::credential::Credential;
use crate::model::log::{LogLevel, LogRecord};
use crate::model::session::{Presence, ServerSummary, SessionSnapshot};

#[derive(Clone)]
pub struct ControlPanel {
    session: Arc<SessionManager>,
    tokens: Arc<dyn TokenStore>,
    automod: AutoModService,
    bridge: Arc<EventBridge>,
    launched_at: DateTime<Local>,
}

impl ControlPanel {
    pub fn new(
        session: Arc<SessionManager>,
        tokens: Arc<dyn TokenStore>,
        automod: AutoModService,
        bridge: Arc<EventBridge>,
    ) -> Self {
        Self {
            session,
            tokens,
            automod,
            bridge,
            launched_at: Local::now(),
        }
    }

    pub fn bridge(&self) -> &Arc<EventBridge> {
        &self.bridge
    }

    pub fn launched_at(&self) -> DateTime<Local> {
        self.launched_at
    }

    async fn resolve<T>(&self, pending: Pending<T>) -> Result<T, SessionError> {
        pending.resolve(self.session.timeout()).await
    }

    /// Masked form of the stored token, if one is stored.
    pub fn masked_token(&self) -> Option<String> {
        self.tokens.load().map(|credential| credential.masked())
    }

    /// Stores a new token.
    ///
    /// A storage failure is published as a warning and returned; the previous token
    /// stays in effect.
    ///
    /// # Returns
    /// - `Ok(())` - The token is stored
    /// - `Err(AppError::ConfigErr(MissingCredential))` - Input was blank
    /// - `Err(AppError::IoErr)` - The token file could not be written
    pub fn save_token(&self, raw: &str) -> Result<(), AppError> {
        let credential = Credential::parse(raw).ok_or(ConfigError::MissingCredential)?;
        if !credential.is_plausible() {
            self.bridge.publish_message(
                LogLevel::Warn,
                "The saved token does not look like a Discord bot token.",
            );
        }

        if let Err(e) = self.tokens.save(&credential) {
            self.bridge.publish_message(
                LogLevel::Warn,
                format!("Failed to save token to {}: {}", self.tokens.location(), e),
            );
            return Err(e.into());
        }

        self.bridge
            .publish_message(LogLevel::Info, "Bot token saved.");
        Ok(())
    }

    /// Starts the bot with the stored token.
    pub async fn start(&self) -> Result<(), SessionError> {
        let credential = self.tokens.load();
        if credential.is_none() {
            tracing::warn!("No bot token stored at {}", self.tokens.location());
        }
        self.resolve(self.session.request_start(credential)).await
    }

    pub async fn stop(&self) -> Result<(), SessionError> {
        self.resolve(self.session.request_stop()).await
    }

    /// Stops the bot if it is running, then starts it again.
    pub async fn restart(&self) -> Result<(), SessionError> {
        match self.stop().await {
            Ok(()) | Err(SessionError::NotRunning) => {}
            Err(err) => return Err(err),
        }
        self.start().await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.resolve(self.session.request_snapshot()).await
    }

    pub async fn set_presence(&self, presence: Presence) -> Result<(), SessionError> {
        self.resolve(self.session.request_presence(presence)).await
    }

    pub async fn set_operating_channel(&self, channel_id: &str) -> Result<(), SessionError> {
        self.resolve(self.session.request_operating_channel(channel_id))
            .await
    }

    /// Sets the log channel; blank input clears it.
    pub async fn set_log_channel(&self, channel_id: &str) -> Result<(), SessionError> {
        self.resolve(self.session.request_log_channel(Some(channel_id)))
            .await
    }

    pub async fn servers(&self) -> Vec<ServerSummary> {
        match self.resolve(self.session.request_servers()).await {
            Ok(servers) => servers,
            Err(err) => {
                tracing::warn!("Failed to list servers: {}", err);
                Vec::new()
            }
        }
    }

    /// Online members who can see the channel.
    ///
    /// A recoverable failure, such as Discord rate limiting the lookup, is also
    /// published as a warning telling the operator to retry.
    pub async fn online_members(&self, channel_id: &str) -> Result<Vec<String>, SessionError> {
        let result = self
            .resolve(self.session.request_online_members(channel_id))
            .await;
        if let Err(err) = &result {
            if err.is_recoverable() {
                self.bridge.publish_message(
                    LogLevel::Warn,
                    format!("Member lookup did not complete ({err}); try again shortly."),
                );
            }
        }
        result
    }

    /// Flips auto-moderation for a server and records the change.
    pub async fn toggle_automod(&self, server: &ServerSummary) -> bool {
        let enabled = self.automod.toggle(server.id).await;
        self.bridge.publish_message(
            LogLevel::Info,
            format!(
                "Auto moderation {} for {}.",
                if enabled { "enabled" } else { "disabled" },
                server.name
            ),
        );
        enabled
    }

    pub async fn automod_enabled(&self, guild_id: u64) -> bool {
        self.automod.is_enabled(guild_id).await
    }
}

/// Time since the session connected.
pub fn uptime(snapshot: &SessionSnapshot, now: DateTime<Local>) -> Option<Duration> {
    let since = snapshot.connected_since?;
    (now - since).to_std().ok()
}

/// Formats a duration as `1d 02h 03m 04s`, omitting leading zero units.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        total % 86_400 / 3_600,
        total % 3_600 / 60,
        total % 60,
    );

    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m {seconds:02}s")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

/// Writes log records to `path`, one formatted line each.
pub fn save_log(path: &Path, records: &[LogRecord]) -> Result<(), AppError> {
    let mut contents = String::new();
    for record in records {
        // writing to a String cannot fail
        let _ = writeln!(contents, "{record}");
    }
    fs::write(path, contents)?;
    Ok(())
}
