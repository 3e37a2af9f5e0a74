//! Prefix-triggered text commands.
//!
//! A [`CommandRegistry`] maps command names to handlers. Handlers never talk to
//! Discord themselves: they receive an [`Invocation`] describing who asked and
//! where, and return a [`Reply`] describing what to send. The [`Dispatcher`] parses
//! the message, runs the handler and carries out the reply through an
//! [`Outbox`], suspending on reaction waits and delays without holding up other
//! events.

pub mod dispatch;
pub mod handler;
pub mod invocation;
pub mod outbox;
pub mod reply;
pub mod suspend;

use serenity::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::bot::error::dispatch::{CommandError, DispatchError, RegistryError};

pub use dispatch::Dispatcher;
pub use invocation::{GuildSnapshot, Invocation, UserSnapshot};
pub use outbox::{Outbox, OutboundMessage};
pub use reply::{Action, Reply};
pub use suspend::{ReactionFilter, Suspensions, WaitOutcome};

/// Logic behind a single command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, invocation: &Invocation, args: &Args) -> Result<Reply, CommandError>;
}

/// Argument signature of a command, by parameter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Takes no arguments; anything after the name is ignored.
    None,
    /// Exactly these whitespace-separated parameters.
    Exact(&'static [&'static str]),
    /// These parameters, the last one absorbing the rest of the line.
    Rest(&'static [&'static str]),
}

impl Arity {
    pub fn accepts(&self, args: &Args) -> bool {
        match self {
            Self::None => true,
            Self::Exact(params) => args.len() == params.len(),
            Self::Rest(params) => args.len() >= params.len(),
        }
    }

    /// Parameter list as shown in usage hints, e.g. `<minutes> <text...>`.
    pub fn signature(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Exact(params) => params
                .iter()
                .map(|p| format!("<{p}>"))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Rest(params) => {
                let last = params.len().saturating_sub(1);
                params
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        if i == last {
                            format!("<{p}...>")
                        } else {
                            format!("<{p}>")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

/// Arguments following the command name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    text: String,
    words: Vec<String>,
}

impl Args {
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_string();
        let words = text.split_whitespace().map(str::to_string).collect();
        Self { text, words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Raw text starting at word `index`, with its original inner spacing.
    pub fn rest_from(&self, index: usize) -> &str {
        let mut rest = self.text.as_str();
        for _ in 0..index {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            rest = rest[end..].trim_start();
        }
        rest
    }
}

/// A registered command.
pub struct Command {
    pub name: String,
    pub help: String,
    pub arity: Arity,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub(crate) fn handler(&self) -> Arc<dyn CommandHandler> {
        self.handler.clone()
    }
}

/// Name → command table. Built once at startup and shared immutably afterwards.
pub struct CommandRegistry {
    prefix: String,
    commands: HashMap<String, Command>,
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers a command.
    ///
    /// # Returns
    /// - `Ok(())` - The command is now dispatchable
    /// - `Err(RegistryError::DuplicateCommand)` - A command with this name exists
    pub fn register(
        &mut self,
        name: &str,
        help: &str,
        arity: Arity,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), RegistryError> {
        if self.commands.contains_key(name) {
            return Err(RegistryError::DuplicateCommand(name.to_string()));
        }

        self.commands.insert(
            name.to_string(),
            Command {
                name: name.to_string(),
                help: help.to_string(),
                arity,
                handler: Arc::new(handler),
            },
        );
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Splits raw message text into a known command and its arguments.
    ///
    /// Command names are case-sensitive.
    ///
    /// # Returns
    /// - `Ok((command, args))` - The text invokes a registered command
    /// - `Err(DispatchError::NotACommand)` - The text lacks the prefix or a name
    /// - `Err(DispatchError::UnknownCommand)` - No command has that name
    pub fn resolve(&self, raw: &str) -> Result<(&Command, Args), DispatchError> {
        let body = raw
            .trim_start()
            .strip_prefix(self.prefix.as_str())
            .ok_or(DispatchError::NotACommand)?;

        // "! roll" is not a command
        if body.starts_with(char::is_whitespace) {
            return Err(DispatchError::NotACommand);
        }

        let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
        let name = &body[..name_end];
        if name.is_empty() {
            return Err(DispatchError::NotACommand);
        }

        let command = self
            .commands
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        Ok((command, Args::parse(&body[name_end..])))
    }

    /// Usage line for a command, e.g. ``Usage: `!roll <NdN>` ``.
    pub fn usage(&self, command: &Command) -> String {
        let signature = command.arity.signature();
        if signature.is_empty() {
            format!("Usage: `{}{}`", self.prefix, command.name)
        } else {
            format!("Usage: `{}{} {}`", self.prefix, command.name, signature)
        }
    }

    /// One line per command with usage and help text.
    pub fn listing(&self) -> Vec<String> {
        self.commands()
            .map(|command| {
                let signature = command.arity.signature();
                let call = if signature.is_empty() {
                    format!("{}{}", self.prefix, command.name)
                } else {
                    format!("{}{} {}", self.prefix, command.name, signature)
                };
                format!("`{call}` - {}", command.help)
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixture;
