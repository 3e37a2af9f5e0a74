use serenity::async_trait;
use std::time::Duration;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

/// Longest reminder accepted, one day.
pub const MAX_MINUTES: u64 = 24 * 60;

pub struct ReminderCommand;

#[async_trait]
impl CommandHandler for ReminderCommand {
    async fn handle(&self, invocation: &Invocation, args: &Args) -> Result<Reply, CommandError> {
        let minutes: u64 = args
            .get(0)
            .and_then(|m| m.parse().ok())
            .filter(|m| (1..=MAX_MINUTES).contains(m))
            .ok_or_else(|| {
                CommandError::Usage(format!(
                    "Minutes must be a whole number between 1 and {MAX_MINUTES}."
                ))
            })?;
        let text = args.rest_from(1);
        let mention = invocation.author.mention();
        let unit = if minutes == 1 { "minute" } else { "minutes" };

        Ok(Reply::text(format!(
            "Okay {mention}, I will remind you in {minutes} {unit}."
        ))
        .after(
            Duration::from_secs(minutes * 60),
            format!("{mention} Reminder: {text}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::{fixture, Action, OutboundMessage};

    /// Tests a valid reminder.
    ///
    /// Expected: acknowledgement, then the reminder after the delay
    #[tokio::test]
    async fn schedules_reminder() {
        let reply = ReminderCommand
            .handle(&fixture::invocation(), &Args::parse("5 feed the  cat"))
            .await
            .unwrap();

        let mention = format!("<@{}>", fixture::AUTHOR_ID);
        assert_eq!(
            reply.actions(),
            &[
                Action::Send(OutboundMessage::text(format!(
                    "Okay {mention}, I will remind you in 5 minutes."
                ))),
                Action::After {
                    delay: Duration::from_secs(300),
                    content: format!("{mention} Reminder: feed the  cat"),
                },
            ]
        );
    }

    /// Tests invalid minute values.
    ///
    /// Expected: Usage error
    #[tokio::test]
    async fn rejects_bad_minutes() {
        for args in ["0 nap", "soon nap", "-3 nap", "1441 nap"] {
            let result = ReminderCommand
                .handle(&fixture::invocation(), &Args::parse(args))
                .await;
            assert!(matches!(result, Err(CommandError::Usage(_))), "{args}");
        }
    }
}
