use rand::Rng;
use serenity::async_trait;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

/// Longest message Discord accepts.
pub const MESSAGE_LIMIT: u64 = 2000;

const FORMAT_HINT: &str = "Format has to be in NdN!";

pub struct RollCommand;

/// Parses `NdN` into (count, sides). Both must be at least 1.
pub fn parse_dice(notation: &str) -> Result<(u32, u32), CommandError> {
    let (count, sides) = notation
        .split_once('d')
        .ok_or_else(|| CommandError::Usage(FORMAT_HINT.to_string()))?;

    let count: u32 = count
        .parse()
        .map_err(|_| CommandError::Usage(FORMAT_HINT.to_string()))?;
    let sides: u32 = sides
        .parse()
        .map_err(|_| CommandError::Usage(FORMAT_HINT.to_string()))?;

    if count == 0 || sides == 0 {
        return Err(CommandError::Usage(FORMAT_HINT.to_string()));
    }
    if longest_reply(count, sides) > MESSAGE_LIMIT {
        return Err(CommandError::Usage(format!(
            "{count}d{sides} would not fit in one message."
        )));
    }

    Ok((count, sides))
}

/// Length of the reply when every die shows its widest value.
fn longest_reply(count: u32, sides: u32) -> u64 {
    let width = u64::from(sides.ilog10() + 1);
    let count = u64::from(count);
    count * width + 2 * (count - 1)
}

pub fn roll(count: u32, sides: u32, rng: &mut impl Rng) -> Vec<u32> {
    (0..count).map(|_| rng.random_range(1..=sides)).collect()
}

#[async_trait]
impl CommandHandler for RollCommand {
    async fn handle(&self, _invocation: &Invocation, args: &Args) -> Result<Reply, CommandError> {
        let (count, sides) = parse_dice(args.get(0).unwrap_or_default())?;

        let results = roll(count, sides, &mut rand::rng());
        let text = results
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Reply::text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::fixture;

    /// Tests the reply for `2d6`.
    ///
    /// Expected: two comma-separated values in 1..=6
    #[tokio::test]
    async fn rolls_two_six_sided_dice() {
        let reply = RollCommand
            .handle(&fixture::invocation(), &Args::parse("2d6"))
            .await
            .unwrap();

        let messages = reply.messages();
        assert_eq!(messages.len(), 1);
        let values: Vec<u32> = messages[0]
            .split(", ")
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| (1..=6).contains(v)));
    }

    /// Tests roll counts and ranges across many well-formed inputs.
    ///
    /// Expected: exactly `count` values, each within 1..=sides
    #[test]
    fn roll_respects_count_and_sides() {
        let mut rng = rand::rng();
        for count in [1, 2, 7, 101] {
            for sides in [1, 2, 6, 20, 1000] {
                let results = roll(count, sides, &mut rng);
                assert_eq!(results.len(), count as usize);
                assert!(results.iter().all(|v| (1..=sides).contains(v)));
            }
        }
    }

    /// Tests malformed dice specs.
    ///
    /// Expected: Usage error for each
    #[test]
    fn rejects_malformed_specs() {
        for notation in ["", "abc", "5dd6", "d6", "2d", "0d6", "2d0", "-1d6", "2x6", "1.5d6"] {
            assert!(
                matches!(parse_dice(notation), Err(CommandError::Usage(_))),
                "{notation} should be rejected"
            );
        }
    }

    /// Tests rolls sized against the message limit.
    ///
    /// Expected: accepted while the widest reply fits in 2000 characters
    #[test]
    fn accepts_rolls_that_fit_one_message() {
        assert_eq!(parse_dice("101d6"), Ok((101, 6)));
        // 667 digits plus 666 separators is 1999 characters
        assert_eq!(parse_dice("667d6"), Ok((667, 6)));
        assert!(matches!(parse_dice("668d6"), Err(CommandError::Usage(_))));
        assert_eq!(parse_dice("1d4294967295"), Ok((1, u32::MAX)));
        assert!(matches!(
            parse_dice("4294967295d6"),
            Err(CommandError::Usage(_))
        ));
    }

    /// Tests that the widest accepted roll really fits.
    ///
    /// Expected: the rendered reply is at most 2000 characters
    #[tokio::test]
    async fn largest_roll_fits_in_message() {
        let reply = RollCommand
            .handle(&fixture::invocation(), &Args::parse("500d20"))
            .await
            .unwrap();

        assert!(reply.messages()[0].len() as u64 <= MESSAGE_LIMIT);
    }
}
