use serenity::all::{
    ActivityData, Channel, ChannelId, Context, CreateAttachment, CreateMessage, Http, MessageId,
    OnlineStatus, ReactionType,
};
use serenity::async_trait;
use std::sync::Arc;

use crate::bot::command::{OutboundMessage, Outbox};
use crate::bot::error::gateway::GatewayError;
use crate::bot::session::GatewayLink;
use crate::model::session::Presence;

/// [`GatewayLink`] over a live serenity context.
pub struct SerenityLink {
    ctx: Context,
}

impl SerenityLink {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

fn online_status(presence: Presence) -> OnlineStatus {
    match presence {
        Presence::Online => OnlineStatus::Online,
        Presence::Idle => OnlineStatus::Idle,
        Presence::Invisible => OnlineStatus::Invisible,
    }
}

#[async_trait]
impl GatewayLink for SerenityLink {
    fn set_presence(&self, presence: Presence, activity: Option<&str>) {
        self.ctx
            .set_presence(activity.map(ActivityData::playing), online_status(presence));
    }

    async fn resolve_channel(&self, channel_id: u64) -> Result<String, GatewayError> {
        let channel = ChannelId::new(channel_id)
            .to_channel(&self.ctx)
            .await
            .map_err(|e| GatewayError::for_channel(e, channel_id))?;

        match channel {
            Channel::Guild(channel) => Ok(channel.name),
            Channel::Private(channel) => Ok(channel.recipient.name),
            _ => Err(GatewayError::ChannelNotFound(channel_id)),
        }
    }

    async fn online_members(&self, channel_id: u64) -> Result<Vec<String>, GatewayError> {
        let channel = ChannelId::new(channel_id)
            .to_channel(&self.ctx)
            .await
            .map_err(|e| GatewayError::for_channel(e, channel_id))?
            .guild()
            .ok_or(GatewayError::ChannelNotFound(channel_id))?;

        // cache reference must not be held across an await
        let guild = self
            .ctx
            .cache
            .guild(channel.guild_id)
            .ok_or(GatewayError::ChannelNotFound(channel_id))?;

        let mut names: Vec<String> = guild
            .members
            .values()
            .filter(|member| {
                guild.presences.get(&member.user.id).is_some_and(|presence| {
                    !matches!(
                        presence.status,
                        OnlineStatus::Offline | OnlineStatus::Invisible
                    )
                })
            })
            .filter(|member| guild.user_permissions_in(&channel, member).view_channel())
            .map(|member| member.display_name().to_string())
            .collect();
        names.sort_by_key(|name| name.to_lowercase());

        Ok(names)
    }

    async fn say(&self, channel_id: u64, content: &str) -> Result<(), GatewayError> {
        ChannelId::new(channel_id)
            .say(&self.ctx.http, content)
            .await
            .map_err(|e| GatewayError::for_channel(e, channel_id))?;
        Ok(())
    }
}

/// [`Outbox`] posting command replies over HTTP.
pub struct SerenityOutbox {
    http: Arc<Http>,
}

impl SerenityOutbox {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Outbox for SerenityOutbox {
    async fn send(&self, channel_id: u64, message: OutboundMessage) -> Result<u64, GatewayError> {
        let mut builder = CreateMessage::new().content(message.content);
        if let Some(path) = message.attachment {
            let attachment = CreateAttachment::path(&path)
                .await
                .map_err(|e| GatewayError::Transport(format!("{}: {e}", path.display())))?;
            builder = builder.add_file(attachment);
        }

        let sent = ChannelId::new(channel_id)
            .send_message(&self.http, builder)
            .await
            .map_err(|e| GatewayError::for_channel(e, channel_id))?;
        Ok(sent.id.get())
    }

    async fn react(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), GatewayError> {
        ChannelId::new(channel_id)
            .create_reaction(
                &self.http,
                MessageId::new(message_id),
                ReactionType::Unicode(emoji.to_string()),
            )
            .await
            .map_err(|e| GatewayError::for_channel(e, channel_id))
    }
}
