//! In-process stand-ins for the Discord connection.

use serenity::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

use crate::bot::command::Suspensions;
use crate::bot::error::gateway::GatewayError;
use crate::model::credential::Credential;
use crate::model::session::{Presence, ServerSummary};

use super::{Connector, GatewayLink, SessionWiring};

pub const TOKEN: &str = "MTA5ODc2NTQzMjEwOTg3NjU0MzIx.GhIjKl.abcdefghijklmnopqrstuvwxyz0123456789AB";
pub const GENERAL: u64 = 111_111_111_111_111_111;
pub const RATE_LIMITED: u64 = 222_222_222_222_222_222;

#[derive(Default)]
pub struct FakeLink {
    channels: HashMap<u64, String>,
    pub presences: Mutex<Vec<(Presence, Option<String>)>>,
    said: Mutex<Vec<(u64, String)>>,
}

impl FakeLink {
    pub fn new() -> Self {
        Self {
            channels: HashMap::from([(GENERAL, "general".to_string())]),
            ..Default::default()
        }
    }

    pub fn said(&self) -> Vec<(u64, String)> {
        self.said.lock().unwrap().clone()
    }
}

#[async_trait]
impl GatewayLink for FakeLink {
    fn set_presence(&self, presence: Presence, activity: Option<&str>) {
        self.presences
            .lock()
            .unwrap()
            .push((presence, activity.map(str::to_string)));
    }

    async fn resolve_channel(&self, channel_id: u64) -> Result<String, GatewayError> {
        self.channels
            .get(&channel_id)
            .cloned()
            .ok_or(GatewayError::ChannelNotFound(channel_id))
    }

    async fn online_members(&self, channel_id: u64) -> Result<Vec<String>, GatewayError> {
        if channel_id == RATE_LIMITED {
            return Err(GatewayError::RateLimited { retry_after: None });
        }
        self.resolve_channel(channel_id).await?;
        Ok(vec!["alice".to_string(), "bob".to_string()])
    }

    async fn say(&self, channel_id: u64, content: &str) -> Result<(), GatewayError> {
        self.resolve_channel(channel_id).await?;
        self.said
            .lock()
            .unwrap()
            .push((channel_id, content.to_string()));
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub enum Handshake {
    Accept,
    Reject,
    /// Connects, then ignores shutdown until aborted.
    Linger,
}

/// Connector that never touches the network.
pub struct FakeConnector {
    handshake: Handshake,
    pub link: Arc<FakeLink>,
    suspensions: Mutex<Option<Arc<Suspensions>>>,
}

impl FakeConnector {
    pub fn new(handshake: Handshake) -> Arc<Self> {
        Arc::new(Self {
            handshake,
            link: Arc::new(FakeLink::new()),
            suspensions: Mutex::new(None),
        })
    }

    pub fn suspensions(&self) -> Arc<Suspensions> {
        self.suspensions.lock().unwrap().clone().unwrap()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn run(
        &self,
        _credential: Credential,
        wiring: SessionWiring,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), GatewayError> {
        *self.suspensions.lock().unwrap() = Some(wiring.dispatcher.suspensions().clone());

        if let Handshake::Reject = self.handshake {
            return Err(GatewayError::InvalidCredential);
        }

        let servers = vec![
            ServerSummary {
                name: "Tavern".to_string(),
                id: 1,
                member_count: 42,
            },
            ServerSummary {
                name: "Guild Hall".to_string(),
                id: 2,
                member_count: 7,
            },
        ];
        // guilds can load before the session has processed ready; a third guild
        // stays unavailable and is only counted
        wiring.signals.servers_changed(servers);
        wiring
            .signals
            .ready("Department 14".to_string(), self.link.clone(), 3);

        if let Handshake::Linger = self.handshake {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return Ok(());
        }
        while !*shutdown.borrow() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }
        Ok(())
    }
}
