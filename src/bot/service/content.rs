//! Third-party content behind the `ducats`, `news`, `weather`, `quote` and `meme`
//! commands.

use serde::Deserialize;
use serenity::async_trait;
use std::time::Duration;

use crate::bot::error::content::ContentError;

const DUCATS_URL: &str = "https://api.warframe.market/v1/tools/ducats";
const NEWS_URL: &str = "https://www.reddit.com/r/pcgaming/hot.json";
const WEATHER_URL: &str = "https://wttr.in/";
const QUOTE_URL: &str = "https://zenquotes.io/api/random";
const MEME_URL: &str = "https://meme-api.com/gimme";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("department14/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DucatPrice {
    pub item: String,
    pub ducats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meme {
    pub title: String,
    pub url: String,
}

/// Source of fetched content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn ducat_prices(&self, limit: usize) -> Result<Vec<DucatPrice>, ContentError>;

    async fn news_headlines(&self, limit: usize) -> Result<Vec<String>, ContentError>;

    /// One-line current conditions for a city.
    async fn weather(&self, city: &str) -> Result<String, ContentError>;

    async fn quote(&self) -> Result<Quote, ContentError>;

    async fn meme(&self) -> Result<Meme, ContentError>;
}

#[derive(Deserialize)]
struct DucatsResponse {
    payload: DucatsPayload,
}

#[derive(Deserialize)]
struct DucatsPayload {
    previous_hour: Vec<DucatEntry>,
}

#[derive(Deserialize)]
struct DucatEntry {
    item: String,
    ducats: u32,
}

#[derive(Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Deserialize)]
struct RedditListingData {
    children: Vec<RedditChild>,
}

#[derive(Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Deserialize)]
struct RedditPost {
    title: String,
    #[serde(default)]
    stickied: bool,
}

#[derive(Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

#[derive(Deserialize)]
struct MemeResponse {
    title: String,
    url: String,
}

/// Highest ducat values first, ties broken by item name.
fn top_ducats(response: DucatsResponse, limit: usize) -> Vec<DucatPrice> {
    let mut prices: Vec<DucatPrice> = response
        .payload
        .previous_hour
        .into_iter()
        .map(|entry| DucatPrice {
            item: entry.item,
            ducats: entry.ducats,
        })
        .collect();
    prices.sort_by(|a, b| b.ducats.cmp(&a.ducats).then_with(|| a.item.cmp(&b.item)));
    prices.dedup_by(|a, b| a.item == b.item);
    prices.truncate(limit);
    prices
}

/// Post titles in listing order, skipping pinned posts.
fn headlines(listing: RedditListing, limit: usize) -> Vec<String> {
    listing
        .data
        .children
        .into_iter()
        .filter(|child| !child.data.stickied)
        .map(|child| child.data.title)
        .take(limit)
        .collect()
}

/// Fetches content over HTTPS with a shared [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpContentSource {
    http_client: reqwest::Client,
}

impl HttpContentSource {
    pub fn new() -> Result<Self, ContentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http_client })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ContentError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn ducat_prices(&self, limit: usize) -> Result<Vec<DucatPrice>, ContentError> {
        let response: DucatsResponse = self.get_json(DUCATS_URL).await?;
        Ok(top_ducats(response, limit))
    }

    async fn news_headlines(&self, limit: usize) -> Result<Vec<String>, ContentError> {
        let url = format!("{NEWS_URL}?limit={}", limit + 5);
        let listing: RedditListing = self.get_json(&url).await?;
        Ok(headlines(listing, limit))
    }

    async fn weather(&self, city: &str) -> Result<String, ContentError> {
        let url = reqwest::Url::parse(WEATHER_URL)
            .and_then(|base| base.join(city))
            .map_err(|e| ContentError::UnexpectedResponse {
                source_name: "wttr.in".to_string(),
                reason: format!("invalid city '{city}': {e}"),
            })?;

        let body = self
            .http_client
            .get(url)
            .query(&[("format", "3")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let line = body.trim();
        if line.is_empty() {
            return Err(ContentError::UnexpectedResponse {
                source_name: "wttr.in".to_string(),
                reason: "empty body".to_string(),
            });
        }
        Ok(line.to_string())
    }

    async fn quote(&self) -> Result<Quote, ContentError> {
        let quotes: Vec<ZenQuote> = self.get_json(QUOTE_URL).await?;
        let quote = quotes
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::UnexpectedResponse {
                source_name: "zenquotes".to_string(),
                reason: "no quote returned".to_string(),
            })?;
        Ok(Quote {
            text: quote.q,
            author: quote.a,
        })
    }

    async fn meme(&self) -> Result<Meme, ContentError> {
        let meme: MemeResponse = self.get_json(MEME_URL).await?;
        Ok(Meme {
            title: meme.title,
            url: meme.url,
        })
    }
}
