use serenity::async_trait;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;
use crate::bot::service::AutoModService;

pub struct ToggleAutoModCommand {
    service: AutoModService,
}

impl ToggleAutoModCommand {
    pub fn new(service: AutoModService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for ToggleAutoModCommand {
    async fn handle(&self, invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        let Some(guild) = &invocation.guild else {
            return Err(CommandError::Forbidden(
                "This command can only be used in a server.".to_string(),
            ));
        };

        if !invocation.can_manage_guild {
            return Err(CommandError::Forbidden(
                "You need the Manage Server permission to use this command.".to_string(),
            ));
        }

        let state = if self.service.toggle(guild.id).await {
            "enabled"
        } else {
            "disabled"
        };

        Ok(Reply::text(format!("Auto moderation is now {state}.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::fixture;

    /// Tests toggling by a member with Manage Server.
    ///
    /// Expected: enabled, then disabled
    #[tokio::test]
    async fn toggles_for_managers() {
        let service = AutoModService::new();
        let command = ToggleAutoModCommand::new(service.clone());
        let mut invocation = fixture::invocation();
        invocation.can_manage_guild = true;

        let first = command.handle(&invocation, &Args::parse("")).await.unwrap();
        let second = command.handle(&invocation, &Args::parse("")).await.unwrap();

        assert_eq!(first.messages(), vec!["Auto moderation is now enabled."]);
        assert_eq!(second.messages(), vec!["Auto moderation is now disabled."]);
        assert!(!service.is_enabled(fixture::GUILD_ID).await);
    }

    /// Tests toggling without Manage Server.
    ///
    /// Expected: Forbidden and no state change
    #[tokio::test]
    async fn refuses_without_permission() {
        let service = AutoModService::new();
        let command = ToggleAutoModCommand::new(service.clone());

        let result = command.handle(&fixture::invocation(), &Args::parse("")).await;

        assert!(matches!(result, Err(CommandError::Forbidden(_))));
        assert!(!service.is_enabled(fixture::GUILD_ID).await);
    }

    /// Tests toggling from a direct message.
    ///
    /// Expected: Forbidden
    #[tokio::test]
    async fn refuses_outside_servers() {
        let command = ToggleAutoModCommand::new(AutoModService::new());
        let mut invocation = fixture::invocation();
        invocation.guild = None;
        invocation.can_manage_guild = true;

        let result = command.handle(&invocation, &Args::parse("")).await;

        assert!(matches!(result, Err(CommandError::Forbidden(_))));
    }
}
