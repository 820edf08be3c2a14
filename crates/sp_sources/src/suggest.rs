//! Ticker suggestions for the search box: trending US symbols from Yahoo and
//! the most searched names on Naver Finance. Both lists are cached per market
//! for a fixed TTL. Failed fetches are not cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use scraper::Html;
use serde::{Deserialize, Serialize};
use sp_core::{Config, Error, Market, Result};
use tracing::{debug, info};

use crate::sources::{utils, BROWSER_USER_AGENT};

const SUGGEST_TIMEOUT: Duration = Duration::from_secs(3);
const MAX_SUGGESTIONS: usize = 10;
/// The first two rows of the popular-search table are headers and spacing.
const POPULAR_HEADER_ROWS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub symbol: String,
    pub name: String,
}

#[derive(Deserialize)]
struct TrendingResponse {
    finance: TrendingFinance,
}

#[derive(Deserialize)]
struct TrendingFinance {
    result: Vec<TrendingResult>,
}

#[derive(Deserialize)]
struct TrendingResult {
    #[serde(default)]
    quotes: Vec<TrendingQuote>,
}

#[derive(Deserialize)]
struct TrendingQuote {
    symbol: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}

#[derive(Clone)]
pub struct SuggestionService {
    http: Client,
    trending_url: String,
    popular_url: String,
    cache: Cache<Market, Arc<Vec<Suggestion>>>,
}

impl SuggestionService {
    pub fn new(
        trending_url: impl Into<String>,
        popular_url: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(SUGGEST_TIMEOUT)
            .build()?;
        let cache = Cache::builder().max_capacity(4).time_to_live(ttl).build();

        Ok(Self {
            http,
            trending_url: trending_url.into(),
            popular_url: popular_url.into(),
            cache,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.trending_url.clone(),
            config.popular_url.clone(),
            config.suggest_ttl,
        )
    }

    pub async fn suggestions(&self, market: Market) -> Result<Arc<Vec<Suggestion>>> {
        self.cache
            .try_get_with(market, async {
                let list = match market {
                    Market::Global => self.fetch_trending().await?,
                    Market::Korea => self.fetch_popular().await?,
                };
                info!(%market, count = list.len(), "💡 Refreshed suggestions");
                Ok::<_, Error>(Arc::new(list))
            })
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("suggestions for {}: {}", market, e)))
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn fetch_trending(&self) -> Result<Vec<Suggestion>> {
        debug!(url = %self.trending_url, "Fetching trending tickers");
        let response = self.http.get(&self.trending_url).send().await?.error_for_status()?;
        let body: TrendingResponse = response.json().await?;
        parse_trending(body)
    }

    async fn fetch_popular(&self) -> Result<Vec<Suggestion>> {
        debug!(url = %self.popular_url, "Fetching popular searches");
        let response = self.http.get(&self.popular_url).send().await?.error_for_status()?;
        let html = response.text().await?;
        parse_popular(&html)
    }
}

impl std::fmt::Debug for SuggestionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionService")
            .field("trending_url", &self.trending_url)
            .field("popular_url", &self.popular_url)
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

fn parse_trending(body: TrendingResponse) -> Result<Vec<Suggestion>> {
    let result = body
        .finance
        .result
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedPayload("trending response has no result".to_string()))?;

    Ok(result
        .quotes
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|quote| Suggestion {
            symbol: quote.symbol,
            name: quote.short_name.unwrap_or_default(),
        })
        .collect())
}

fn parse_popular(html: &str) -> Result<Vec<Suggestion>> {
    let rows = utils::selector("table.type_5 tr")?;
    let anchor = utils::selector("a")?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&rows)
        .skip(POPULAR_HEADER_ROWS)
        .take(MAX_SUGGESTIONS)
        .filter_map(|row| row.select(&anchor).next())
        .map(utils::clean_text)
        .filter(|name| !name.is_empty())
        .map(|name| Suggestion {
            symbol: name.clone(),
            name,
        })
        .collect())
}
