//! Ready event handler.
//!
//! Fired once the gateway handshake completes. Hands the session a link to the
//! connection. At this point every guild is still unavailable, so only the count
//! is reported; the server list follows from `guild_create` and `cache_ready`.

use dioxus_logger::tracing;
use serenity::all::{Context, Ready};
use std::sync::Arc;

use crate::bot::gateway::link::SerenityLink;

use super::Handler;

pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    handler.wiring.signals.ready(
        ready.user.name.clone(),
        Arc::new(SerenityLink::new(ctx)),
        ready.guilds.len(),
    );
}
