use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sentiment::{Sentiment, SentimentCounts};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "pubDate", alias = "publishedAt", default)]
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
        published_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            published_at: published_at.into(),
            sentiment: None,
            guid: None,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }
}

/// Classified batch of articles for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub query_subject: String,
    pub counts: SentimentCounts,
    pub articles: Vec<Article>,
}

impl AggregationResult {
    pub fn empty(query_subject: impl Into<String>) -> Self {
        Self {
            query_subject: query_subject.into(),
            counts: SentimentCounts::default(),
            articles: Vec::new(),
        }
    }
}

/// Payload of `/news/global/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalNewsResponse {
    pub symbol: String,
    pub sentiment_counts: SentimentCounts,
    pub news: Vec<Article>,
}

impl From<AggregationResult> for GlobalNewsResponse {
    fn from(result: AggregationResult) -> Self {
        Self {
            symbol: result.query_subject,
            sentiment_counts: result.counts,
            news: result.articles,
        }
    }
}

/// Payload of `/news/korea/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KoreanNewsResponse {
    pub name: String,
    pub sentiment_counts: SentimentCounts,
    pub news: Vec<Article>,
}

impl From<AggregationResult> for KoreanNewsResponse {
    fn from(result: AggregationResult) -> Self {
        Self {
            name: result.query_subject,
            sentiment_counts: result.counts,
            news: result.articles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Global,
    Korea,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Global => f.write_str("global"),
            Market::Korea => f.write_str("korea"),
        }
    }
}

impl std::str::FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" | "us" => Ok(Market::Global),
            "korea" | "korean" | "kr" => Ok(Market::Korea),
            other => Err(format!("Unknown market: {}", other)),
        }
    }
}
