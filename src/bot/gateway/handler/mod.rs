use serenity::all::{
    ChannelId, Context, EventHandler, Guild, GuildId, Member, Message, MessageId,
    MessageUpdateEvent, Reaction, Ready, UnavailableGuild, User,
};
use serenity::async_trait;

use crate::bot::session::SessionWiring;

pub mod guild;
pub mod member;
pub mod message;
pub mod reaction;
pub mod ready;

/// Discord event handler for one session.
pub struct Handler {
    pub wiring: SessionWiring,
}

impl Handler {
    pub fn new(wiring: SessionWiring) -> Self {
        Self { wiring }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called once every guild from the ready payload is in the cache
    async fn cache_ready(&self, ctx: Context, _guilds: Vec<GuildId>) {
        guild::refresh_servers(self, &ctx);
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, _is_new: Option<bool>) {
        guild::handle_guild_create(self, ctx, guild).await;
    }

    /// Called when the bot leaves a guild or it becomes unavailable
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        guild::handle_guild_delete(self, ctx, incomplete).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(self, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(self, ctx, guild_id, user).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, new_message: Message) {
        message::handle_message(self, ctx, new_message).await;
    }

    /// Called when a message is deleted
    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        _guild_id: Option<GuildId>,
    ) {
        message::handle_message_delete(self, &ctx, channel_id, deleted_message_id);
    }

    /// Called when a message is edited
    async fn message_update(
        &self,
        _ctx: Context,
        old_if_available: Option<Message>,
        _new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        message::handle_message_update(self, old_if_available, event);
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, _ctx: Context, add_reaction: Reaction) {
        reaction::handle_reaction_add(self, add_reaction);
    }
}
