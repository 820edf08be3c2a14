use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_ENGLISH_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";
pub const DEFAULT_KOREAN_MODEL: &str = "snunlp/KR-FinBert-SC";
pub const DEFAULT_CLASSIFY_CONCURRENCY: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface_api_key: Option<String>,
    pub huggingface_base_url: String,
    pub english_model: String,
    pub korean_model: String,
    pub classify_timeout: Duration,
    pub classify_concurrency: usize,
    pub news_api_key: Option<String>,
    pub news_api_host: String,
    pub news_api_base_url: String,
    pub news_timeout: Duration,
    pub naver_search_url: String,
    pub korean_news_limit: usize,
    pub scrape_timeout: Duration,
    pub trending_url: String,
    pub popular_url: String,
    pub suggest_ttl: Duration,
    pub allowed_origins: Vec<String>,
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            huggingface_api_key: None,
            huggingface_base_url: "https://api-inference.huggingface.co".to_string(),
            english_model: DEFAULT_ENGLISH_MODEL.to_string(),
            korean_model: DEFAULT_KOREAN_MODEL.to_string(),
            classify_timeout: Duration::from_secs(15),
            classify_concurrency: DEFAULT_CLASSIFY_CONCURRENCY,
            news_api_key: None,
            news_api_host: "yahoo-finance15.p.rapidapi.com".to_string(),
            news_api_base_url: "https://yahoo-finance15.p.rapidapi.com".to_string(),
            news_timeout: Duration::from_secs(20),
            naver_search_url: "https://search.naver.com/search.naver".to_string(),
            korean_news_limit: 20,
            scrape_timeout: Duration::from_secs(10),
            trending_url: "https://query2.finance.yahoo.com/v1/finance/trending/US".to_string(),
            popular_url: "https://finance.naver.com/sise/lastsearch2.naver".to_string(),
            suggest_ttl: Duration::from_secs(600),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let news_api_host = get("YAHOO_API_HOST").unwrap_or(defaults.news_api_host);
        let news_api_base_url = get("NEWS_API_BASE_URL")
            .unwrap_or_else(|| format!("https://{}", news_api_host));

        let allowed_origins = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.allowed_origins,
        };

        Ok(Self {
            huggingface_api_key: get("HUGGINGFACE_STOCK_API_KEY")
                .or_else(|| get("HUGGINGFACE-STOCK-API-KEY")),
            huggingface_base_url: get("HUGGINGFACE_BASE_URL")
                .unwrap_or(defaults.huggingface_base_url),
            english_model: get("SENTIMENT_MODEL_EN").unwrap_or(defaults.english_model),
            korean_model: get("SENTIMENT_MODEL_KO").unwrap_or(defaults.korean_model),
            classify_timeout: parse_secs_or(&get, "CLASSIFY_TIMEOUT_SECS", defaults.classify_timeout)?,
            classify_concurrency: parse_or(&get, "CLASSIFY_CONCURRENCY", defaults.classify_concurrency)?
                .max(1),
            news_api_key: get("YAHOO_API_KEY"),
            news_api_host,
            news_api_base_url: news_api_base_url.trim_end_matches('/').to_string(),
            news_timeout: parse_secs_or(&get, "NEWS_TIMEOUT_SECS", defaults.news_timeout)?,
            naver_search_url: get("NAVER_SEARCH_URL").unwrap_or(defaults.naver_search_url),
            korean_news_limit: parse_or(&get, "KOREAN_NEWS_LIMIT", defaults.korean_news_limit)?,
            scrape_timeout: parse_secs_or(&get, "SCRAPE_TIMEOUT_SECS", defaults.scrape_timeout)?,
            trending_url: get("TRENDING_URL").unwrap_or(defaults.trending_url),
            popular_url: get("NAVER_POPULAR_URL").unwrap_or(defaults.popular_url),
            suggest_ttl: parse_secs_or(&get, "SUGGEST_TTL_SECS", defaults.suggest_ttl)?,
            allowed_origins,
            bind_addr: parse_or(&get, "BIND_ADDR", defaults.bind_addr)?,
        })
    }
}

fn parse_secs_or<G>(get: &G, key: &str, default: Duration) -> Result<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    parse_or(get, key, default.as_secs()).map(Duration::from_secs)
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Configuration(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}
