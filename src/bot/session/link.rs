//! Seams between the session actor and the Discord client library.

use serenity::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::bot::bridge::EventBridge;
use crate::bot::command::Dispatcher;
use crate::bot::error::gateway::GatewayError;
use crate::model::credential::Credential;
use crate::model::session::{Presence, ServerSummary};

use super::actor::Work;

/// Operations on an established connection.
#[async_trait]
pub trait GatewayLink: Send + Sync {
    /// Updates the bot's presence. `activity` is shown as "Playing ..." when set.
    fn set_presence(&self, presence: Presence, activity: Option<&str>);

    /// Checks the channel exists and is visible, returning its name.
    async fn resolve_channel(&self, channel_id: u64) -> Result<String, GatewayError>;

    /// Display names of online members who can see the channel.
    async fn online_members(&self, channel_id: u64) -> Result<Vec<String>, GatewayError>;

    async fn say(&self, channel_id: u64, content: &str) -> Result<(), GatewayError>;
}

/// Opens and drives one connection.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connects with `credential` and runs until `shutdown` flips to `true` or the
    /// connection ends on its own.
    ///
    /// Every event handler must be wired from `wiring` before the handshake starts.
    /// Once the handshake completes the implementation calls
    /// [`SessionSignals::ready`].
    async fn run(
        &self,
        credential: Credential,
        wiring: SessionWiring,
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), GatewayError>;
}

/// Lets a running connection report back to the session that owns it.
///
/// Signals carry the generation of the session they were created for; the
/// session ignores signals from connections it has already stopped.
#[derive(Clone)]
pub struct SessionSignals {
    generation: u64,
    tx: mpsc::UnboundedSender<Work>,
}

impl SessionSignals {
    pub(crate) fn new(generation: u64, tx: mpsc::UnboundedSender<Work>) -> Self {
        Self { generation, tx }
    }

    /// Reports a completed handshake. `server_count` is the number of guilds the
    /// bot is in, available or not; the list itself follows through
    /// [`SessionSignals::servers_changed`].
    pub fn ready(&self, bot_name: String, link: Arc<dyn GatewayLink>, server_count: usize) {
        let _ = self.tx.send(Work::Ready {
            generation: self.generation,
            bot_name,
            link,
            server_count,
        });
    }

    pub fn servers_changed(&self, servers: Vec<ServerSummary>) {
        let _ = self.tx.send(Work::ServersChanged {
            generation: self.generation,
            servers,
        });
    }
}

/// Everything a connection needs to serve events, built fresh for each session.
#[derive(Clone)]
pub struct SessionWiring {
    pub signals: SessionSignals,
    pub dispatcher: Dispatcher,
    pub bridge: Arc<EventBridge>,
}
