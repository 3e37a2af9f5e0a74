use serenity::async_trait;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

pub struct HelpCommand {
    listing: Vec<String>,
}

impl HelpCommand {
    pub fn new(listing: Vec<String>) -> Self {
        Self { listing }
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, _invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        Ok(Reply::text(format!(
            "**Commands**\n{}",
            self.listing.join("\n")
        )))
    }
}
