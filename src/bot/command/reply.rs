use std::path::PathBuf;
use std::time::Duration;

use super::outbox::OutboundMessage;

/// Step of a command reply, carried out in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send(OutboundMessage),
    /// React to the most recently sent message.
    React(String),
    /// React to the most recently sent message with `emoji`, then wait for the
    /// invoking user to add the same reaction.
    Confirm {
        emoji: String,
        timeout: Duration,
        confirmed: String,
        timed_out: String,
    },
    /// Post `content` after `delay`, unless the session stops first.
    After { delay: Duration, content: String },
}

/// Ordered list of actions a handler wants performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    actions: Vec<Action>,
}

impl Reply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply consisting of a single text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new().say(content)
    }

    pub fn say(mut self, content: impl Into<String>) -> Self {
        self.actions
            .push(Action::Send(OutboundMessage::text(content)));
        self
    }

    pub fn say_with_file(mut self, content: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.actions.push(Action::Send(OutboundMessage {
            content: content.into(),
            attachment: Some(path.into()),
        }));
        self
    }

    pub fn react(mut self, emoji: impl Into<String>) -> Self {
        self.actions.push(Action::React(emoji.into()));
        self
    }

    pub fn confirm(
        mut self,
        emoji: impl Into<String>,
        timeout: Duration,
        confirmed: impl Into<String>,
        timed_out: impl Into<String>,
    ) -> Self {
        self.actions.push(Action::Confirm {
            emoji: emoji.into(),
            timeout,
            confirmed: confirmed.into(),
            timed_out: timed_out.into(),
        });
        self
    }

    pub fn after(mut self, delay: Duration, content: impl Into<String>) -> Self {
        self.actions.push(Action::After {
            delay,
            content: content.into(),
        });
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Text of every message this reply sends immediately.
    pub fn messages(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                Action::Send(message) => Some(message.content.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}
