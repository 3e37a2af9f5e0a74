use chrono::Local;
use dioxus_logger::tracing;
use serenity::all::{ChannelId, Context, Guild, Message, MessageId, MessageUpdateEvent, User};

use crate::bot::bridge::SessionEvent;
use crate::bot::command::{GuildSnapshot, Invocation, UserSnapshot};
use crate::bot::error::dispatch::DispatchError;
use crate::bot::gateway::link::SerenityOutbox;

use super::Handler;

fn user_snapshot(user: &User) -> UserSnapshot {
    UserSnapshot {
        id: user.id.get(),
        name: user.name.clone(),
        display_name: user.display_name().to_string(),
        bot: user.bot,
    }
}

fn guild_snapshot(guild: &Guild) -> GuildSnapshot {
    GuildSnapshot {
        id: guild.id.get(),
        name: guild.name.clone(),
        owner_id: guild.owner_id.get(),
        member_count: guild.member_count,
        channel_count: guild.channels.len(),
        role_count: guild.roles.len(),
    }
}

fn build_invocation(
    message: &Message,
    guild: Option<GuildSnapshot>,
    can_manage_guild: bool,
) -> Invocation {
    Invocation {
        author: user_snapshot(&message.author),
        channel_id: message.channel_id.get(),
        message_id: message.id.get(),
        guild,
        can_manage_guild,
        mentions: message.mentions.iter().map(user_snapshot).collect(),
        received_at: Local::now(),
    }
}

/// Captures the command context from the message and the cache.
fn invocation_from(ctx: &Context, message: &Message) -> Invocation {
    let guild = message
        .guild_id
        .and_then(|guild_id| ctx.cache.guild(guild_id).map(|guild| guild_snapshot(&guild)));

    let can_manage_guild = message
        .author_permissions(&ctx.cache)
        .is_some_and(|permissions| permissions.manage_guild());

    build_invocation(message, guild, can_manage_guild)
}

/// Handle message creation in a channel
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let dispatcher = &handler.wiring.dispatcher;
    if !message
        .content
        .trim_start()
        .starts_with(dispatcher.registry().prefix())
    {
        return;
    }

    let invocation = invocation_from(&ctx, &message);
    let outbox = SerenityOutbox::new(ctx.http.clone());

    match dispatcher
        .dispatch(&message.content, &invocation, &outbox)
        .await
    {
        Ok(()) => {}
        // ordinary chat that happens to start with the prefix
        Err(DispatchError::NotACommand | DispatchError::UnknownCommand(_)) => {}
        Err(DispatchError::Handler { command, detail }) => {
            handler
                .wiring
                .bridge
                .publish(SessionEvent::CommandFailed { command, detail });
        }
        Err(err) => {
            tracing::debug!("Command from {} not run: {}", message.author.name, err);
        }
    }
}

const UNKNOWN_AUTHOR: &str = "an unknown user";

/// Name to report for a deleted message, if the cache still holds it.
fn deleted_author(cached: Option<&Message>) -> String {
    cached
        .map(|message| message.author.name.clone())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// Author to report for an edit, or `None` when the text did not change.
///
/// Without a cached copy the change cannot be compared, so any update carrying
/// text counts as an edit.
fn edited_by(old: Option<&Message>, content: Option<&str>, author: Option<&User>) -> Option<String> {
    let content = content?;
    if old.is_some_and(|old| old.content == content) {
        return None;
    }

    let name = author
        .or(old.map(|old| &old.author))
        .map(|user| user.name.clone())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    Some(name)
}

pub fn handle_message_delete(
    handler: &Handler,
    ctx: &Context,
    channel_id: ChannelId,
    message_id: MessageId,
) {
    let author = {
        let cached = ctx.cache.message(channel_id, message_id);
        deleted_author(cached.as_deref())
    };

    handler
        .wiring
        .bridge
        .publish(SessionEvent::MessageDeleted { author });
}

/// Publishes an edit only when the text changed; embeds and pins also arrive as
/// message updates. The previous text comes from serenity's message cache.
pub fn handle_message_update(
    handler: &Handler,
    old_if_available: Option<Message>,
    event: MessageUpdateEvent,
) {
    let Some(author) = edited_by(
        old_if_available.as_ref(),
        event.content.as_deref(),
        event.author.as_ref(),
    ) else {
        return;
    };

    handler
        .wiring
        .bridge
        .publish(SessionEvent::MessageEdited { author });
}
