use serenity::async_trait;
use std::sync::Arc;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::{content::ContentError, dispatch::CommandError};
use crate::bot::service::ContentSource;

const DUCAT_LIMIT: usize = 10;
const NEWS_LIMIT: usize = 5;

fn fetch_failed(what: &str, err: ContentError) -> CommandError {
    CommandError::Failed(format!("Error fetching {what}: {err}"))
}

pub struct DucatsCommand {
    source: Arc<dyn ContentSource>,
}

impl DucatsCommand {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CommandHandler for DucatsCommand {
    async fn handle(&self, _invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        let prices = self
            .source
            .ducat_prices(DUCAT_LIMIT)
            .await
            .map_err(|e| fetch_failed("ducat prices", e))?;

        let lines = if prices.is_empty() {
            "No ducat prices found.".to_string()
        } else {
            prices
                .iter()
                .map(|price| format!("{}: {}", price.item, price.ducats))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(Reply::text(format!("Ducat Prices:\n{lines}")))
    }
}

pub struct NewsCommand {
    source: Arc<dyn ContentSource>,
}

impl NewsCommand {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CommandHandler for NewsCommand {
    async fn handle(&self, _invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        let titles = self
            .source
            .news_headlines(NEWS_LIMIT)
            .await
            .map_err(|e| fetch_failed("news", e))?;

        let body = if titles.is_empty() {
            "No news found.".to_string()
        } else {
            titles.join("\n")
        };

        Ok(Reply::text(format!("Latest gaming news:\n{body}")))
    }
}

pub struct WeatherCommand {
    source: Arc<dyn ContentSource>,
}

impl WeatherCommand {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CommandHandler for WeatherCommand {
    async fn handle(&self, _invocation: &Invocation, args: &Args) -> Result<Reply, CommandError> {
        let city = args.rest_from(0);
        let report = self
            .source
            .weather(city)
            .await
            .map_err(|e| fetch_failed("weather", e))?;

        Ok(Reply::text(report))
    }
}

pub struct QuoteCommand {
    source: Arc<dyn ContentSource>,
}

impl QuoteCommand {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CommandHandler for QuoteCommand {
    async fn handle(&self, _invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        let quote = self
            .source
            .quote()
            .await
            .map_err(|e| fetch_failed("quote", e))?;

        Ok(Reply::text(format!("\"{}\" - {}", quote.text, quote.author)))
    }
}

pub struct MemeCommand {
    source: Arc<dyn ContentSource>,
}

impl MemeCommand {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CommandHandler for MemeCommand {
    async fn handle(&self, _invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        let meme = self
            .source
            .meme()
            .await
            .map_err(|e| fetch_failed("meme", e))?;

        Ok(Reply::text(format!("{}\n{}", meme.title, meme.url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::command::fixture::{self, StubContent};
    use crate::bot::service::content::{DucatPrice, Meme, Quote};

    async fn run(command: impl CommandHandler, args: &str) -> Result<Reply, CommandError> {
        command.handle(&fixture::invocation(), &Args::parse(args)).await
    }

    /// Tests the ducat listing layout.
    ///
    /// Expected: header followed by `item: value` lines
    #[tokio::test]
    async fn lists_ducat_prices() {
        let source = StubContent {
            ducats: vec![
                DucatPrice {
                    item: "ash_prime_systems".to_string(),
                    ducats: 100,
                },
                DucatPrice {
                    item: "bo_prime_handle".to_string(),
                    ducats: 15,
                },
            ],
            ..Default::default()
        };

        let reply = run(DucatsCommand::new(Arc::new(source)), "").await.unwrap();

        assert_eq!(
            reply.messages(),
            vec!["Ducat Prices:\nash_prime_systems: 100\nbo_prime_handle: 15"]
        );
    }

    /// Tests the news reply with and without headlines.
    ///
    /// Expected: joined titles, or the empty notice
    #[tokio::test]
    async fn lists_news_or_reports_none() {
        let source = StubContent {
            news: vec!["One".to_string(), "Two".to_string()],
            ..Default::default()
        };
        let reply = run(NewsCommand::new(Arc::new(source)), "").await.unwrap();
        assert_eq!(reply.messages(), vec!["Latest gaming news:\nOne\nTwo"]);

        let reply = run(NewsCommand::new(Arc::new(StubContent::default())), "")
            .await
            .unwrap();
        assert_eq!(reply.messages(), vec!["Latest gaming news:\nNo news found."]);
    }

    /// Tests that a fetch failure becomes an internal handler failure.
    ///
    /// Expected: Err(Failed) naming what was fetched
    #[tokio::test]
    async fn fetch_failure_is_internal() {
        let source = StubContent {
            fail: true,
            ..Default::default()
        };

        let result = run(NewsCommand::new(Arc::new(source)), "").await;

        assert!(matches!(result, Err(CommandError::Failed(detail)) if detail.starts_with("Error fetching news")));
    }

    /// Tests weather, quote and meme formatting.
    ///
    /// Expected: the city passed through whole, quote and meme formatted
    #[tokio::test]
    async fn formats_weather_quote_and_meme() {
        let source = Arc::new(StubContent {
            quote: Some(Quote {
                text: "Stay curious.".to_string(),
                author: "Anon".to_string(),
            }),
            meme: Some(Meme {
                title: "Monday".to_string(),
                url: "https://i.example/monday.png".to_string(),
            }),
            ..Default::default()
        });

        let weather = run(WeatherCommand::new(source.clone()), "New York").await.unwrap();
        let quote = run(QuoteCommand::new(source.clone()), "").await.unwrap();
        let meme = run(MemeCommand::new(source), "").await.unwrap();

        assert_eq!(weather.messages(), vec!["New York: ☀️ +21°C"]);
        assert_eq!(quote.messages(), vec!["\"Stay curious.\" - Anon"]);
        assert_eq!(meme.messages(), vec!["Monday\nhttps://i.example/monday.png"]);
    }
}
