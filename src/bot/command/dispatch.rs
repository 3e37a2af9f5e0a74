use dioxus_logger::tracing;
use std::sync::Arc;

use crate::bot::error::{
    dispatch::{CommandError, DispatchError},
    gateway::GatewayError,
};

use super::{
    outbox::{OutboundMessage, Outbox},
    reply::{Action, Reply},
    suspend::{ReactionFilter, Suspensions, WaitOutcome},
    Command, CommandRegistry, Invocation,
};

/// Reply sent when a handler fails internally.
pub const GENERIC_APOLOGY: &str = "Sorry, something went wrong while running that command.";

/// Runs commands for one session.
///
/// The registry is shared by every session; the suspension registry belongs to the
/// session so stopping it cancels that session's parked commands only.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    suspensions: Arc<Suspensions>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, suspensions: Arc<Suspensions>) -> Self {
        Self {
            registry,
            suspensions,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn suspensions(&self) -> &Arc<Suspensions> {
        &self.suspensions
    }

    /// Parses `raw`, runs the matching handler and carries out its reply in the
    /// invoking channel.
    ///
    /// Handler failures never escape: usage and permission problems are answered in
    /// the channel, internal failures and panics get a generic apology.
    ///
    /// # Returns
    /// - `Ok(())` - The command ran and its reply was delivered
    /// - `Err(DispatchError)` - See [`DispatchError`] for which variants were
    ///   already answered in the channel
    pub async fn dispatch(
        &self,
        raw: &str,
        invocation: &Invocation,
        outbox: &dyn Outbox,
    ) -> Result<(), DispatchError> {
        let (command, args) = self.registry.resolve(raw)?;

        if !command.arity.accepts(&args) {
            let usage = self.registry.usage(command);
            self.notify(outbox, invocation, &usage).await;
            return Err(DispatchError::ArgumentParse {
                command: command.name.clone(),
                usage,
            });
        }

        tracing::debug!(
            "Running command '{}' for {} in channel {}",
            command.name,
            invocation.author.name,
            invocation.channel_id
        );

        let handler = command.handler();
        let owned_invocation = invocation.clone();
        let task = tokio::spawn(async move { handler.handle(&owned_invocation, &args).await });

        let result = match task.await {
            Ok(result) => result,
            Err(join) => Err(CommandError::Failed(format!("handler panicked: {join}"))),
        };

        match result {
            Ok(reply) => self
                .execute(reply, invocation, outbox)
                .await
                .map_err(|err| handler_error(command, format!("Failed to deliver reply: {err}"))),
            Err(CommandError::Usage(hint)) => {
                self.notify(outbox, invocation, &hint).await;
                Err(DispatchError::ArgumentParse {
                    command: command.name.clone(),
                    usage: hint,
                })
            }
            Err(CommandError::Forbidden(reason)) => {
                self.notify(outbox, invocation, &reason).await;
                Err(DispatchError::MissingPermission {
                    command: command.name.clone(),
                    reason,
                })
            }
            Err(CommandError::Failed(detail)) => {
                tracing::error!("Command '{}' failed: {}", command.name, detail);
                self.notify(outbox, invocation, GENERIC_APOLOGY).await;
                Err(handler_error(command, detail))
            }
        }
    }

    /// Carries out reply actions in order.
    ///
    /// Reactions target the message sent most recently by this reply. A cancelled
    /// wait ends the reply silently.
    pub async fn execute(
        &self,
        reply: Reply,
        invocation: &Invocation,
        outbox: &dyn Outbox,
    ) -> Result<(), GatewayError> {
        let channel_id = invocation.channel_id;
        let mut last_sent: Option<u64> = None;

        for action in reply.into_actions() {
            match action {
                Action::Send(message) => {
                    last_sent = Some(outbox.send(channel_id, message).await?);
                }
                Action::React(emoji) => {
                    let Some(message_id) = last_sent else {
                        tracing::warn!("Dropping reaction {} with no message to react to", emoji);
                        continue;
                    };
                    outbox.react(channel_id, message_id, &emoji).await?;
                }
                Action::Confirm {
                    emoji,
                    timeout,
                    confirmed,
                    timed_out,
                } => {
                    let Some(message_id) = last_sent else {
                        tracing::warn!("Dropping confirmation with no message to confirm");
                        continue;
                    };

                    let parked = self.suspensions.park(Some(ReactionFilter {
                        message_id,
                        user_id: invocation.author.id,
                        emoji: emoji.clone(),
                    }));
                    if let Err(err) = outbox.react(channel_id, message_id, &emoji).await {
                        self.suspensions.release(parked);
                        return Err(err);
                    }

                    let content = match self.suspensions.wait(parked, timeout).await {
                        WaitOutcome::Matched => confirmed,
                        WaitOutcome::TimedOut => timed_out,
                        WaitOutcome::Cancelled => return Ok(()),
                    };
                    last_sent = Some(outbox.send(channel_id, OutboundMessage::text(content)).await?);
                }
                Action::After { delay, content } => {
                    if self.suspensions.sleep(delay).await == WaitOutcome::Cancelled {
                        return Ok(());
                    }
                    last_sent = Some(outbox.send(channel_id, OutboundMessage::text(content)).await?);
                }
            }
        }

        Ok(())
    }

    async fn notify(&self, outbox: &dyn Outbox, invocation: &Invocation, content: &str) {
        if let Err(err) = outbox
            .send(invocation.channel_id, OutboundMessage::text(content))
            .await
        {
            tracing::warn!(
                "Failed to answer in channel {}: {}",
                invocation.channel_id,
                err
            );
        }
    }
}

fn handler_error(command: &Command, detail: String) -> DispatchError {
    DispatchError::Handler {
        command: command.name.clone(),
        detail,
    }
}
