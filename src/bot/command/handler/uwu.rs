use serenity::async_trait;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

pub struct UwuCommand;

/// Swaps r/l for w, softens "n" before vowels and adds a trailing face.
pub fn uwuify(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut previous: Option<char> = None;

    for c in text.chars() {
        match c {
            'r' | 'l' => out.push('w'),
            'R' | 'L' => out.push('W'),
            'a' | 'e' | 'i' | 'o' | 'u' if matches!(previous, Some('n')) => {
                out.push('y');
                out.push(c);
            }
            'a' | 'e' | 'i' | 'o' | 'u' if matches!(previous, Some('N')) => {
                out.push('y');
                out.push(c);
            }
            _ => out.push(c),
        }
        previous = Some(c);
    }

    out.push_str(" uwu");
    out
}

#[async_trait]
impl CommandHandler for UwuCommand {
    async fn handle(&self, _invocation: &Invocation, args: &Args) -> Result<Reply, CommandError> {
        Ok(Reply::text(uwuify(args.rest_from(0))))
    }
}
