use dioxus_logger::tracing;
use serenity::all::{ChannelId, Context, GuildId, Mentionable, Member, User};

use crate::bot::bridge::SessionEvent;

use super::Handler;

/// Name and system channel of a cached guild.
fn guild_details(ctx: &Context, guild_id: GuildId) -> (String, Option<ChannelId>) {
    match ctx.cache.guild(guild_id) {
        Some(guild) => (guild.name.clone(), guild.system_channel_id),
        None => (format!("server {guild_id}"), None),
    }
}

async fn post_in_system_channel(ctx: &Context, channel_id: Option<ChannelId>, content: String) {
    let Some(channel_id) = channel_id else {
        return;
    };
    if let Err(e) = channel_id.say(&ctx.http, content).await {
        tracing::warn!("Failed to post in system channel {}: {}", channel_id, e);
    }
}

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(handler: &Handler, ctx: Context, new_member: Member) {
    let (server, system_channel) = guild_details(&ctx, new_member.guild_id);

    handler.wiring.bridge.publish(SessionEvent::MemberJoined {
        name: new_member.user.name.clone(),
        server: server.clone(),
    });

    post_in_system_channel(
        &ctx,
        system_channel,
        format!("Welcome {} to {}!", new_member.mention(), server),
    )
    .await;
}

/// Handles the guild_member_removal event when a member leaves a guild
pub async fn handle_guild_member_removal(
    handler: &Handler,
    ctx: Context,
    guild_id: GuildId,
    user: User,
) {
    let (server, system_channel) = guild_details(&ctx, guild_id);

    handler.wiring.bridge.publish(SessionEvent::MemberLeft {
        name: user.name.clone(),
        server: server.clone(),
    });

    post_in_system_channel(
        &ctx,
        system_channel,
        format!("Goodbye {} from {}.", user.mention(), server),
    )
    .await;
}
