//! The session state machine, run on the session thread.

use chrono::Local;
use dioxus_logger::tracing;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::bot::bridge::{EventBridge, SessionEvent};
use crate::bot::command::{CommandRegistry, Dispatcher, Suspensions};
use crate::bot::error::{gateway::GatewayError, session::SessionError};
use crate::model::credential::Credential;
use crate::model::log::LogLevel;
use crate::model::session::{Presence, ServerSummary, SessionSnapshot, SessionStatus};

use super::link::{Connector, GatewayLink, SessionSignals, SessionWiring};
use super::pending::Responder;

/// Activity shown while the bot is online.
pub const ONLINE_ACTIVITY: &str = "Type !help";

/// Work items for the session thread, from the control panel or from a running
/// connection.
pub(crate) enum Work {
    Start {
        credential: Credential,
        reply: Responder<()>,
    },
    Stop {
        reply: Responder<()>,
    },
    SetPresence {
        presence: Presence,
        reply: Responder<()>,
    },
    SetOperatingChannel {
        channel_id: u64,
        reply: Responder<()>,
    },
    SetLogChannel {
        channel_id: Option<u64>,
        reply: Responder<()>,
    },
    ListServers {
        reply: Responder<Vec<ServerSummary>>,
    },
    ListOnlineMembers {
        channel_id: u64,
        reply: Responder<Vec<String>>,
    },
    Snapshot {
        reply: Responder<SessionSnapshot>,
    },
    Ready {
        generation: u64,
        bot_name: String,
        link: Arc<dyn GatewayLink>,
        server_count: usize,
    },
    ServersChanged {
        generation: u64,
        servers: Vec<ServerSummary>,
    },
    ChannelResolved {
        generation: u64,
        channel_id: u64,
        result: Result<String, GatewayError>,
        reply: Responder<()>,
    },
    Ended {
        generation: u64,
        result: Result<(), GatewayError>,
    },
    Shutdown,
}

/// A connection that has been started and not yet stopped.
struct LiveSession {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    link: Option<Arc<dyn GatewayLink>>,
    suspensions: Arc<Suspensions>,
}

pub(crate) struct Session {
    connector: Arc<dyn Connector>,
    registry: Arc<CommandRegistry>,
    bridge: Arc<EventBridge>,
    tx: mpsc::UnboundedSender<Work>,
    grace: Duration,

    status: SessionStatus,
    servers: Vec<ServerSummary>,
    operating_channel: Option<u64>,
    log_channel: Option<u64>,
    presence: Option<Presence>,
    connected_since: Option<chrono::DateTime<Local>>,
    generation: u64,
    live: Option<LiveSession>,
}

impl Session {
    pub(crate) fn new(
        connector: Arc<dyn Connector>,
        registry: Arc<CommandRegistry>,
        bridge: Arc<EventBridge>,
        tx: mpsc::UnboundedSender<Work>,
        grace: Duration,
        log_channel: Option<u64>,
    ) -> Self {
        Self {
            connector,
            registry,
            bridge,
            tx,
            grace,
            status: SessionStatus::Disconnected,
            servers: Vec::new(),
            operating_channel: None,
            log_channel,
            presence: None,
            connected_since: None,
            generation: 0,
            live: None,
        }
    }

    /// Processes work until a shutdown request arrives or every sender is gone.
    pub(crate) async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Work>) {
        while let Some(work) = rx.recv().await {
            if matches!(work, Work::Shutdown) {
                break;
            }
            self.handle(work).await;
        }

        if self.live.is_some() {
            self.stop_live().await;
        }
        tracing::debug!("Session thread finished");
    }

    async fn handle(&mut self, work: Work) {
        match work {
            Work::Start { credential, reply } => {
                let _ = reply.send(self.start(credential));
            }
            Work::Stop { reply } => {
                let result = if self.live.is_some() {
                    self.stop_live().await;
                    Ok(())
                } else {
                    Err(SessionError::NotRunning)
                };
                let _ = reply.send(result);
            }
            Work::SetPresence { presence, reply } => {
                let _ = reply.send(self.set_presence(presence));
            }
            Work::SetOperatingChannel { channel_id, reply } => {
                self.resolve_operating_channel(channel_id, reply);
            }
            Work::SetLogChannel { channel_id, reply } => {
                self.log_channel = channel_id;
                let _ = reply.send(Ok(()));
            }
            Work::ListServers { reply } => {
                let _ = reply.send(Ok(self.servers.clone()));
            }
            Work::ListOnlineMembers { channel_id, reply } => {
                self.list_online_members(channel_id, reply);
            }
            Work::Snapshot { reply } => {
                let _ = reply.send(Ok(self.snapshot()));
            }
            Work::Ready {
                generation,
                bot_name,
                link,
                server_count,
            } => {
                if generation == self.generation {
                    self.on_ready(bot_name, link, server_count);
                }
            }
            Work::ServersChanged {
                generation,
                servers,
            } => {
                if generation == self.generation && self.live.is_some() {
                    self.servers = servers;
                }
            }
            Work::ChannelResolved {
                generation,
                channel_id,
                result,
                reply,
            } => {
                let _ = reply.send(self.on_channel_resolved(generation, channel_id, result));
            }
            Work::Ended { generation, result } => {
                if generation == self.generation {
                    self.on_ended(result);
                }
            }
            Work::Shutdown => {}
        }
    }

    fn start(&mut self, credential: Credential) -> Result<(), SessionError> {
        if self.status.is_active() {
            return Err(SessionError::AlreadyRunning);
        }

        self.generation += 1;
        let generation = self.generation;
        self.status = SessionStatus::Connecting;
        self.servers.clear();
        self.presence = None;
        self.connected_since = None;
        self.bridge.publish(SessionEvent::Connecting);

        let suspensions = Arc::new(Suspensions::new());
        let wiring = SessionWiring {
            signals: SessionSignals::new(generation, self.tx.clone()),
            dispatcher: Dispatcher::new(self.registry.clone(), suspensions.clone()),
            bridge: self.bridge.clone(),
        };
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let connector = self.connector.clone();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let result = connector.run(credential, wiring, shutdown_rx).await;
            let _ = tx.send(Work::Ended { generation, result });
        });

        self.live = Some(LiveSession {
            shutdown: shutdown_tx,
            task,
            link: None,
            suspensions,
        });
        Ok(())
    }

    /// Cancels parked commands, signals the connection to close and waits for it
    /// within the grace period.
    async fn stop_live(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };

        let cancelled = live.suspensions.cancel_all();
        if cancelled > 0 {
            tracing::debug!("Cancelled {} suspended commands", cancelled);
        }

        let _ = live.shutdown.send(true);
        if tokio::time::timeout(self.grace, &mut live.task).await.is_err() {
            tracing::warn!("Connection did not close within {:?}, aborting", self.grace);
            live.task.abort();
        }

        // connection events still in flight belong to the old generation
        self.generation += 1;
        self.status = SessionStatus::Disconnected;
        self.reset_connection_state();
        self.bridge.publish(SessionEvent::Disconnected);
    }

    fn reset_connection_state(&mut self) {
        self.servers.clear();
        self.operating_channel = None;
        self.presence = None;
        self.connected_since = None;
    }

    /// The link of a connected session.
    fn link(&self) -> Result<Arc<dyn GatewayLink>, SessionError> {
        let live = self.live.as_ref().ok_or(SessionError::NotRunning)?;
        live.link.clone().ok_or(SessionError::NotReady)
    }

    fn set_presence(&mut self, presence: Presence) -> Result<(), SessionError> {
        let link = self.link()?;
        let activity = (presence == Presence::Online).then_some(ONLINE_ACTIVITY);
        link.set_presence(presence, activity);
        self.presence = Some(presence);
        Ok(())
    }

    fn resolve_operating_channel(&mut self, channel_id: u64, reply: Responder<()>) {
        let link = match self.link() {
            Ok(link) => link,
            Err(err) => {
                let _ = reply.send(Err(err));
                return;
            }
        };

        let generation = self.generation;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = link.resolve_channel(channel_id).await;
            let _ = tx.send(Work::ChannelResolved {
                generation,
                channel_id,
                result,
                reply,
            });
        });
    }

    fn on_channel_resolved(
        &mut self,
        generation: u64,
        channel_id: u64,
        result: Result<String, GatewayError>,
    ) -> Result<(), SessionError> {
        if generation != self.generation {
            return Err(SessionError::NotRunning);
        }
        let name = result?;
        let link = self.link()?;

        self.operating_channel = Some(channel_id);
        self.bridge.publish_message(
            LogLevel::Info,
            format!("Operating channel set to #{name} ({channel_id})."),
        );

        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            if let Err(err) = link.say(channel_id, "Bot has entered the channel.").await {
                bridge.publish_message(
                    LogLevel::Warn,
                    format!("Could not announce in channel {channel_id}: {err}"),
                );
            }
        });
        Ok(())
    }

    fn list_online_members(&self, channel_id: u64, reply: Responder<Vec<String>>) {
        let link = match self.link() {
            Ok(link) => link,
            Err(err) => {
                let _ = reply.send(Err(err));
                return;
            }
        };

        tokio::spawn(async move {
            let result = link
                .online_members(channel_id)
                .await
                .map_err(SessionError::from);
            let _ = reply.send(result);
        });
    }

    fn on_ready(&mut self, bot_name: String, link: Arc<dyn GatewayLink>, server_count: usize) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        live.link = Some(link.clone());

        self.status = SessionStatus::Connected;
        self.connected_since = Some(Local::now());
        link.set_presence(Presence::Online, Some(ONLINE_ACTIVITY));
        self.presence = Some(Presence::Online);

        self.bridge.publish(SessionEvent::Connected {
            bot_name: bot_name.clone(),
            server_count,
        });

        if let Some(channel_id) = self.log_channel {
            let bridge = self.bridge.clone();
            tokio::spawn(async move {
                let announcement = format!("{bot_name} has connected to Discord!");
                if let Err(err) = link.say(channel_id, &announcement).await {
                    bridge.publish_message(
                        LogLevel::Warn,
                        format!("Could not announce in log channel {channel_id}: {err}"),
                    );
                }
            });
        }
    }

    fn on_ended(&mut self, result: Result<(), GatewayError>) {
        if let Some(live) = self.live.take() {
            live.suspensions.cancel_all();
        }
        self.generation += 1;
        self.reset_connection_state();

        match result {
            Ok(()) => {
                self.status = SessionStatus::Disconnected;
                self.bridge.publish(SessionEvent::Disconnected);
            }
            Err(err) => {
                let reason = SessionError::from(err).to_string();
                self.status = SessionStatus::Failed(reason.clone());
                self.bridge
                    .publish(SessionEvent::ConnectionFailed { reason });
            }
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status.clone(),
            server_count: self.servers.len(),
            operating_channel: self.operating_channel,
            log_channel: self.log_channel,
            presence: self.presence,
            connected_since: self.connected_since,
        }
    }
}
