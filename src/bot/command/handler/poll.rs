use serenity::async_trait;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

pub struct PollCommand;

#[async_trait]
impl CommandHandler for PollCommand {
    async fn handle(&self, _invocation: &Invocation, args: &Args) -> Result<Reply, CommandError> {
        Ok(Reply::text(format!("Poll: {}", args.rest_from(0)))
            .react("👍")
            .react("👎"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::{fixture, Action, OutboundMessage};

    /// Tests the poll message and its reactions.
    ///
    /// Expected: one message followed by 👍 then 👎
    #[tokio::test]
    async fn posts_question_with_votes() {
        let reply = PollCommand
            .handle(&fixture::invocation(), &Args::parse("Pizza tonight?"))
            .await
            .unwrap();

        assert_eq!(
            reply.actions(),
            &[
                Action::Send(OutboundMessage::text("Poll: Pizza tonight?")),
                Action::React("👍".to_string()),
                Action::React("👎".to_string()),
            ]
        );
    }
}
