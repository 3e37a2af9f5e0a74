use chrono::NaiveDateTime;
use serenity::async_trait;
use std::time::Duration;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

/// How long the invoker has to confirm a scheduled session.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);

const CONFIRM_EMOJI: &str = "👍";

pub struct ScheduleCommand;

pub fn parse_session_time(date: &str, time: &str) -> Result<NaiveDateTime, CommandError> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").map_err(|_| {
        CommandError::Usage("Invalid date format. Please use YYYY-MM-DD HH:MM format.".to_string())
    })
}

#[async_trait]
impl CommandHandler for ScheduleCommand {
    async fn handle(&self, invocation: &Invocation, args: &Args) -> Result<Reply, CommandError> {
        let scheduled = parse_session_time(
            args.get(0).unwrap_or_default(),
            args.get(1).unwrap_or_default(),
        )?;

        if scheduled < invocation.received_at.naive_local() {
            return Ok(Reply::text("You cannot schedule a session in the past."));
        }

        let when = scheduled.format("%Y-%m-%d at %H:%M");
        Ok(Reply::text(format!(
            "Game session scheduled on {when}. React with {CONFIRM_EMOJI} to confirm."
        ))
        .confirm(
            CONFIRM_EMOJI,
            CONFIRMATION_TIMEOUT,
            format!("Session confirmed for {when}."),
            "Session scheduling timed out.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::{fixture, Action, OutboundMessage};

    /// Tests scheduling a session before the invocation time.
    ///
    /// Expected: refusal text and no reactions
    #[tokio::test]
    async fn rejects_past_sessions() {
        let reply = ScheduleCommand
            .handle(&fixture::invocation(), &Args::parse("2000-01-01 10:00"))
            .await
            .unwrap();

        assert_eq!(
            reply.actions(),
            &[Action::Send(OutboundMessage::text(
                "You cannot schedule a session in the past."
            ))]
        );
    }

    /// Tests scheduling a future session.
    ///
    /// Expected: announcement followed by a 60 second confirmation
    #[tokio::test]
    async fn schedules_future_sessions() {
        let reply = ScheduleCommand
            .handle(&fixture::invocation(), &Args::parse("2025-03-14 19:30"))
            .await
            .unwrap();

        assert_eq!(
            reply.actions(),
            &[
                Action::Send(OutboundMessage::text(
                    "Game session scheduled on 2025-03-14 at 19:30. React with 👍 to confirm."
                )),
                Action::Confirm {
                    emoji: "👍".to_string(),
                    timeout: CONFIRMATION_TIMEOUT,
                    confirmed: "Session confirmed for 2025-03-14 at 19:30.".to_string(),
                    timed_out: "Session scheduling timed out.".to_string(),
                },
            ]
        );
    }

    /// Tests malformed dates and times.
    ///
    /// Expected: Usage error
    #[test]
    fn rejects_malformed_input() {
        for (date, time) in [("2025-13-01", "10:00"), ("tomorrow", "10:00"), ("2025-01-01", "25:00")] {
            assert!(matches!(
                parse_session_time(date, time),
                Err(CommandError::Usage(_))
            ));
        }
    }
}
