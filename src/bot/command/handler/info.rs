use chrono::{DateTime, Utc};
use serenity::all::Timestamp;
use serenity::async_trait;
use serenity::utils::parse_user_mention;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date of a Discord timestamp, in UTC.
fn format_date(timestamp: Timestamp) -> String {
    DateTime::<Utc>::from_timestamp(timestamp.unix_timestamp(), 0)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub struct ServerInfoCommand;

#[async_trait]
impl CommandHandler for ServerInfoCommand {
    async fn handle(&self, invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        let Some(guild) = &invocation.guild else {
            return Err(CommandError::Forbidden(
                "This command can only be used in a server.".to_string(),
            ));
        };

        Ok(Reply::text(format!(
            "**Server Info**\nName: {}\nID: {}\nOwner: <@{}>\nMembers: {}\nChannels: {}\nRoles: {}\nCreated: {}",
            guild.name,
            guild.id,
            guild.owner_id,
            guild.member_count,
            guild.channel_count,
            guild.role_count,
            format_date(guild.created_at())
        )))
    }
}

pub struct UserInfoCommand;

#[async_trait]
impl CommandHandler for UserInfoCommand {
    async fn handle(&self, invocation: &Invocation, args: &Args) -> Result<Reply, CommandError> {
        let usage = || {
            CommandError::Usage("Please mention a user, e.g. `!userinfo @someone`.".to_string())
        };

        let user_id = args.get(0).and_then(parse_user_mention).ok_or_else(usage)?;
        let user = invocation
            .mentions
            .iter()
            .find(|user| user.id == user_id.get())
            .ok_or_else(usage)?;

        Ok(Reply::text(format!(
            "**User Info**\nName: {}\nDisplay name: {}\nID: {}\nBot: {}\nAccount created: {}",
            user.name,
            user.display_name,
            user.id,
            if user.bot { "yes" } else { "no" },
            format_date(user.created_at())
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::fixture;

    /// Tests server info inside a server.
    ///
    /// Expected: name, counts and creation date from the snowflake
    #[tokio::test]
    async fn describes_server() {
        let reply = ServerInfoCommand
            .handle(&fixture::invocation(), &Args::parse(""))
            .await
            .unwrap();

        let text = reply.messages()[0];
        assert!(text.contains("Name: Tavern"));
        assert!(text.contains("Members: 42"));
        assert!(text.contains("Channels: 7"));
        assert!(text.contains("Created: 2016-06-27"));
    }

    /// Tests user info for a mentioned user.
    ///
    /// Expected: details of the mentioned user
    #[tokio::test]
    async fn describes_mentioned_user() {
        let mut invocation = fixture::invocation();
        let bob = fixture::user(80_351_110_224_678_912, "bob");
        invocation.mentions.push(bob);

        let reply = UserInfoCommand
            .handle(&invocation, &Args::parse("<@80351110224678912>"))
            .await
            .unwrap();

        let text = reply.messages()[0];
        assert!(text.contains("Name: bob"));
        assert!(text.contains("ID: 80351110224678912"));
        assert!(text.contains("Bot: no"));
        assert!(text.contains("Account created: 2015-"));
    }

    /// Tests the nickname mention form and a known creation date.
    ///
    /// Expected: 175928847299117063 resolves through `<@!…>` and was created 2016-04-30
    #[tokio::test]
    async fn accepts_nickname_mentions() {
        let mut invocation = fixture::invocation();
        invocation.mentions.push(invocation.author.clone());

        let reply = UserInfoCommand
            .handle(&invocation, &Args::parse("<@!175928847299117063>"))
            .await
            .unwrap();

        let text = reply.messages()[0];
        assert!(text.contains("Name: alice"));
        assert!(text.contains("Account created: 2016-04-30"));
    }

    /// Tests user info without a resolvable mention.
    ///
    /// Expected: Usage error
    #[tokio::test]
    async fn requires_mention() {
        let result = UserInfoCommand
            .handle(&fixture::invocation(), &Args::parse("bob"))
            .await;
        assert!(matches!(result, Err(CommandError::Usage(_))));

        let result = UserInfoCommand
            .handle(&fixture::invocation(), &Args::parse("<@123>"))
            .await;
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }
}
