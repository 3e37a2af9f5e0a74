//! Ownership of the single bot session.
//!
//! All session state lives on a dedicated thread driving its own tokio runtime.
//! [`SessionManager`] is the handle other threads use: every call is submitted to
//! that thread as a work item and answered through a [`Pending`] result, so the
//! caller never touches session state directly. Async callers await the
//! `request_*` forms; the blocking forms are for threads outside any runtime.

mod actor;
pub mod link;
pub mod pending;

use dioxus_logger::tracing;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::bot::bridge::EventBridge;
use crate::bot::command::CommandRegistry;
use crate::bot::error::session::SessionError;
use crate::bot::util::parse::parse_channel_id;
use crate::model::credential::Credential;
use crate::model::session::{Presence, ServerSummary, SessionSnapshot};

use actor::{Session, Work};

pub use actor::ONLINE_ACTIVITY;
pub use link::{Connector, GatewayLink, SessionSignals, SessionWiring};
pub use pending::Pending;

/// Handle to the session thread.
pub struct SessionManager {
    tx: mpsc::UnboundedSender<Work>,
    thread: Option<JoinHandle<()>>,
    handle: Handle,
    timeout: Duration,
}

impl SessionManager {
    /// Starts the session thread.
    ///
    /// The thread idles in the disconnected state until [`SessionManager::start`].
    ///
    /// # Arguments
    /// - `connector` - Opens connections for each started session
    /// - `registry` - Commands served by every session
    /// - `bridge` - Receives lifecycle and content events
    /// - `timeout` - Bound for blocking calls; stopping waits at most half of it
    ///   for the connection to close
    /// - `log_channel` - Channel for the connected announcement, if any
    ///
    /// # Returns
    /// - `Ok(SessionManager)` - Thread and runtime are running
    /// - `Err(io::Error)` - The runtime or thread could not be created
    pub fn spawn(
        connector: Arc<dyn Connector>,
        registry: Arc<CommandRegistry>,
        bridge: Arc<EventBridge>,
        timeout: Duration,
        log_channel: Option<u64>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("session-worker")
            .build()?;

        let handle = runtime.handle().clone();
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session::new(
            connector,
            registry,
            bridge,
            tx.clone(),
            timeout / 2,
            log_channel,
        );

        let thread = thread::Builder::new()
            .name("discord-session".to_string())
            .spawn(move || runtime.block_on(session.run(rx)))?;

        Ok(Self {
            tx,
            thread: Some(thread),
            handle,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Waits on the session runtime for at most the configured timeout.
    ///
    /// Panics if called from inside an async context; use the `request_*` form there.
    fn block<T>(&self, pending: Pending<T>) -> Result<T, SessionError> {
        self.handle.block_on(pending.resolve(self.timeout))
    }

    fn submit<T>(&self, build: impl FnOnce(pending::Responder<T>) -> Work) -> Pending<T> {
        let (reply, pending) = Pending::channel();
        if self.tx.send(build(reply)).is_err() {
            return Pending::failed(SessionError::Closed);
        }
        pending
    }

    /// Submits a start request.
    ///
    /// Resolves once the session is `Connecting`; the handshake then completes in
    /// the background and is reported through the event bridge.
    pub fn request_start(&self, credential: Option<Credential>) -> Pending<()> {
        let Some(credential) = credential.filter(Credential::is_plausible) else {
            return Pending::failed(SessionError::InvalidCredential);
        };
        self.submit(|reply| Work::Start { credential, reply })
    }

    /// Starts a session.
    ///
    /// # Returns
    /// - `Ok(())` - The session is connecting
    /// - `Err(SessionError::InvalidCredential)` - Missing or malformed token
    /// - `Err(SessionError::AlreadyRunning)` - A session is connecting or connected
    pub fn start(&self, credential: Option<Credential>) -> Result<(), SessionError> {
        self.block(self.request_start(credential))
    }

    pub fn request_stop(&self) -> Pending<()> {
        self.submit(|reply| Work::Stop { reply })
    }

    /// Stops the session, cancelling any suspended commands.
    ///
    /// # Returns
    /// - `Ok(())` - The session is disconnected
    /// - `Err(SessionError::NotRunning)` - Nothing was running; nothing changed
    pub fn stop(&self) -> Result<(), SessionError> {
        self.block(self.request_stop())
    }

    pub fn request_presence(&self, presence: Presence) -> Pending<()> {
        self.submit(|reply| Work::SetPresence { presence, reply })
    }

    pub fn set_presence(&self, presence: Presence) -> Result<(), SessionError> {
        self.block(self.request_presence(presence))
    }

    /// Submits a change of operating channel. The id is validated here, so a
    /// malformed id never reaches the session.
    pub fn request_operating_channel(&self, channel_id: &str) -> Pending<()> {
        match parse_channel_id(channel_id) {
            Ok(channel_id) => self.submit(|reply| Work::SetOperatingChannel { channel_id, reply }),
            Err(err) => Pending::failed(err),
        }
    }

    /// Sets the channel the bot operates in and announces itself there.
    ///
    /// # Returns
    /// - `Ok(())` - The channel is set
    /// - `Err(SessionError::InvalidChannelId)` - Not a numeric channel id
    /// - `Err(SessionError::ChannelNotFound)` - No visible channel has this id
    /// - `Err(SessionError::NotRunning)` / `Err(SessionError::NotReady)` - No
    ///   connected session
    pub fn set_operating_channel(&self, channel_id: &str) -> Result<(), SessionError> {
        self.block(self.request_operating_channel(channel_id))
    }

    /// Submits a change of the channel used for the connected announcement. A
    /// blank id clears it.
    pub fn request_log_channel(&self, channel_id: Option<&str>) -> Pending<()> {
        let parsed = channel_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(parse_channel_id)
            .transpose();
        match parsed {
            Ok(channel_id) => self.submit(|reply| Work::SetLogChannel { channel_id, reply }),
            Err(err) => Pending::failed(err),
        }
    }

    /// Sets or clears the channel used for the connected announcement. Allowed
    /// while disconnected; takes effect on the next connection.
    pub fn set_log_channel(&self, channel_id: Option<&str>) -> Result<(), SessionError> {
        self.block(self.request_log_channel(channel_id))
    }

    pub fn request_servers(&self) -> Pending<Vec<ServerSummary>> {
        self.submit(|reply| Work::ListServers { reply })
    }

    /// Servers the bot is in; empty while disconnected or if the session does not
    /// answer in time.
    pub fn list_servers(&self) -> Vec<ServerSummary> {
        match self.block(self.request_servers()) {
            Ok(servers) => servers,
            Err(err) => {
                tracing::warn!("Failed to list servers: {}", err);
                Vec::new()
            }
        }
    }

    pub fn request_online_members(&self, channel_id: &str) -> Pending<Vec<String>> {
        match parse_channel_id(channel_id) {
            Ok(channel_id) => self.submit(|reply| Work::ListOnlineMembers { channel_id, reply }),
            Err(err) => Pending::failed(err),
        }
    }

    /// Online members who can see the channel.
    ///
    /// `RateLimited` is recoverable: back off and retry.
    pub fn list_online_members(&self, channel_id: &str) -> Result<Vec<String>, SessionError> {
        self.block(self.request_online_members(channel_id))
    }

    pub fn request_snapshot(&self) -> Pending<SessionSnapshot> {
        self.submit(|reply| Work::Snapshot { reply })
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.block(self.request_snapshot())
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        let _ = self.tx.send(Work::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Session thread panicked");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod test;
