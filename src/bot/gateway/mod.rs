//! Discord connection through serenity.
//!
//! Everything that touches serenity types lives here; the session and command
//! layers only see the [`Connector`], [`GatewayLink`](crate::bot::session::GatewayLink)
//! and [`Outbox`](crate::bot::command::Outbox) seams.

pub mod handler;
pub mod link;

use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};
use serenity::cache::Settings as CacheSettings;
use serenity::async_trait;
use tokio::sync::watch;

use crate::bot::error::gateway::GatewayError;
use crate::bot::session::{Connector, SessionWiring};
use crate::model::credential::Credential;

use handler::Handler;

/// Gateway intents the bot subscribes to.
///
/// GUILD_MEMBERS, GUILD_PRESENCES and MESSAGE_CONTENT are privileged and must be
/// enabled for the application in the Discord Developer Portal.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_PRESENCES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::DIRECT_MESSAGE_REACTIONS
        | GatewayIntents::MESSAGE_CONTENT
}

/// Messages kept per channel in serenity's cache; edits and deletions of older
/// messages are reported without their previous text or author.
pub const CACHED_MESSAGES_PER_CHANNEL: usize = 200;

fn cache_settings() -> CacheSettings {
    let mut settings = CacheSettings::default();
    settings.max_messages = CACHED_MESSAGES_PER_CHANNEL;
    settings
}

/// Opens real gateway connections.
#[derive(Default)]
pub struct SerenityConnector;

impl SerenityConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for SerenityConnector {
    async fn run(
        &self,
        credential: Credential,
        wiring: SessionWiring,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), GatewayError> {
        // handlers are wired before the client exists, so no event can slip past
        let handler = Handler::new(wiring);

        let mut client = Client::builder(credential.expose(), intents())
            .cache_settings(cache_settings())
            .event_handler(handler)
            .await?;

        let shard_manager = client.shard_manager.clone();
        let watcher = tokio::spawn(async move {
            while !*shutdown.borrow_and_update() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            tracing::info!("Shutting down Discord connection...");
            shard_manager.shutdown_all().await;
        });

        tracing::info!("Starting Discord bot...");
        let result = client.start().await.map_err(GatewayError::from);

        watcher.abort();
        result
    }
}
