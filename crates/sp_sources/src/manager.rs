use std::sync::Arc;

use sp_core::{AggregationResult, Config, Market, NewsSource, Result, SentimentClassifier};
use tracing::{info, warn};

use crate::pipeline::{self, DEFAULT_CLASSIFY_CONCURRENCY};
use crate::sources::{NaverNewsScraper, YahooNewsClient};

/// Wires each market's news source to its classifier and runs the
/// aggregation pipeline over whatever the source returns.
#[derive(Clone)]
pub struct NewsManager {
    global: Arc<dyn NewsSource>,
    korea: Arc<dyn NewsSource>,
    english: Arc<dyn SentimentClassifier>,
    korean: Arc<dyn SentimentClassifier>,
    concurrency: usize,
}

impl NewsManager {
    pub fn new(
        global: Arc<dyn NewsSource>,
        korea: Arc<dyn NewsSource>,
        english: Arc<dyn SentimentClassifier>,
        korean: Arc<dyn SentimentClassifier>,
    ) -> Self {
        Self {
            global,
            korea,
            english,
            korean,
            concurrency: DEFAULT_CLASSIFY_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn from_config(
        config: &Config,
        english: Arc<dyn SentimentClassifier>,
        korean: Arc<dyn SentimentClassifier>,
    ) -> Result<Self> {
        let global = Arc::new(YahooNewsClient::from_config(config)?);
        let korea = Arc::new(NaverNewsScraper::from_config(config)?);
        Ok(Self::new(global, korea, english, korean).with_concurrency(config.classify_concurrency))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// English news for a ticker symbol. Provider failures propagate; an empty
    /// feed is a zero-count success.
    pub async fn global_news(&self, symbol: &str) -> Result<AggregationResult> {
        info!(symbol, source = self.global.name(), "🔍 Fetching global news");
        let articles = self.global.fetch_news(symbol).await?;
        Ok(pipeline::aggregate(symbol, articles, Arc::clone(&self.english), self.concurrency).await)
    }

    /// Korean news for a company name. Never fails: a source error is logged
    /// and treated as an empty result.
    pub async fn korean_news(&self, name: &str) -> AggregationResult {
        info!(name, source = self.korea.name(), "🔍 Fetching Korean news");
        let articles = match self.korea.fetch_news(name).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(name, "Korean news source failed, returning no articles: {}", e);
                Vec::new()
            }
        };
        pipeline::aggregate(name, articles, Arc::clone(&self.korean), self.concurrency).await
    }

    pub async fn news(&self, market: Market, query: &str) -> Result<AggregationResult> {
        match market {
            Market::Global => self.global_news(query).await,
            Market::Korea => Ok(self.korean_news(query).await),
        }
    }
}

impl std::fmt::Debug for NewsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsManager")
            .field("global", &self.global.name())
            .field("korea", &self.korea.name())
            .field("english", &self.english.model_id())
            .field("korean", &self.korean.model_id())
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
