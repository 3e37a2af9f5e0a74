//! Built-in commands.

pub mod automod;
pub mod character;
pub mod content;
pub mod dice;
pub mod help;
pub mod info;
pub mod poll;
pub mod reminder;
pub mod schedule;
pub mod uwu;

use std::path::PathBuf;
use std::sync::Arc;

use crate::bot::error::dispatch::RegistryError;
use crate::bot::service::{AutoModService, ContentSource};

use super::{Arity, CommandRegistry};

/// Services the built-in commands depend on.
#[derive(Clone)]
pub struct CommandDeps {
    pub content: Arc<dyn ContentSource>,
    pub automod: AutoModService,
    pub images_dir: PathBuf,
}

/// Builds the registry with every built-in command, `help` last so it can list the
/// others.
pub fn build_registry(prefix: &str, deps: CommandDeps) -> Result<CommandRegistry, RegistryError> {
    let mut registry = CommandRegistry::new(prefix);

    registry.register(
        "roll",
        "Rolls a dice in NdN format.",
        Arity::Exact(&["NdN"]),
        dice::RollCommand,
    )?;
    registry.register(
        "character",
        "Generates a detailed random D&D character.",
        Arity::None,
        character::CharacterCommand::new(deps.images_dir.clone()),
    )?;
    registry.register(
        "schedule",
        "Schedules a game session.",
        Arity::Exact(&["YYYY-MM-DD", "HH:MM"]),
        schedule::ScheduleCommand,
    )?;
    registry.register(
        "poll",
        "Creates a simple yes or no poll.",
        Arity::Rest(&["question"]),
        poll::PollCommand,
    )?;
    registry.register(
        "ducats",
        "Shows ducat values for items.",
        Arity::None,
        content::DucatsCommand::new(deps.content.clone()),
    )?;
    registry.register(
        "news",
        "Provides the latest gaming news.",
        Arity::None,
        content::NewsCommand::new(deps.content.clone()),
    )?;
    registry.register(
        "toggleAutoMod",
        "Toggles auto moderation on or off.",
        Arity::None,
        automod::ToggleAutoModCommand::new(deps.automod.clone()),
    )?;
    registry.register(
        "uwu",
        "Uwu-ifies your message.",
        Arity::Rest(&["message"]),
        uwu::UwuCommand,
    )?;
    registry.register(
        "weather",
        "Shows the current weather for a city.",
        Arity::Rest(&["city"]),
        content::WeatherCommand::new(deps.content.clone()),
    )?;
    registry.register(
        "quote",
        "Shares an inspirational quote.",
        Arity::None,
        content::QuoteCommand::new(deps.content.clone()),
    )?;
    registry.register(
        "serverinfo",
        "Shows information about this server.",
        Arity::None,
        info::ServerInfoCommand,
    )?;
    registry.register(
        "userinfo",
        "Shows information about a mentioned user.",
        Arity::Exact(&["@user"]),
        info::UserInfoCommand,
    )?;
    registry.register(
        "reminder",
        "Reminds you about something after a number of minutes.",
        Arity::Rest(&["minutes", "text"]),
        reminder::ReminderCommand,
    )?;
    registry.register(
        "meme",
        "Posts a random meme.",
        Arity::None,
        content::MemeCommand::new(deps.content),
    )?;

    let listing = registry.listing();
    registry.register(
        "help",
        "Shows this message.",
        Arity::None,
        help::HelpCommand::new(listing),
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::fixture::StubContent;

    /// Tests that every built-in command is registered once.
    ///
    /// Expected: 15 commands with help listing all
    #[test]
    fn registers_every_command() {
        let deps = CommandDeps {
            content: Arc::new(StubContent::default()),
            automod: AutoModService::new(),
            images_dir: PathBuf::from("images/DnD"),
        };

        let registry = build_registry("!", deps).unwrap();

        let names: Vec<&str> = registry.commands().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "roll",
                "character",
                "schedule",
                "poll",
                "ducats",
                "news",
                "toggleAutoMod",
                "uwu",
                "weather",
                "quote",
                "serverinfo",
                "userinfo",
                "reminder",
                "meme",
                "help"
            ]
        );
    }
}
