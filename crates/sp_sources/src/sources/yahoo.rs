use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use sp_core::{Article, Config, Error, Market, NewsSource, Result};
use tracing::info;
use url::Url;

use super::utils;

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    guid: Option<String>,
    source: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let mut article = Article::new(
            raw.title.unwrap_or_default(),
            raw.link.unwrap_or_default(),
            raw.description.unwrap_or_default(),
            raw.pub_date.unwrap_or_default(),
        );
        article.guid = raw.guid;
        article.source = raw.source;
        article
    }
}

/// News-by-ticker client for the RapidAPI Yahoo Finance provider.
///
/// Unlike the Korean scraper this source reports failures: a transport error
/// or non-success status is [`Error::UpstreamUnavailable`], a response without
/// a `body` list is [`Error::MalformedPayload`]. An empty `body` list is a
/// valid answer with no articles.
#[derive(Clone)]
pub struct YahooNewsClient {
    http: Client,
    base_url: String,
    api_host: String,
    api_key: Option<String>,
}

impl YahooNewsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_host: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_host: api_host.into(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.news_api_base_url.clone(),
            config.news_api_host.clone(),
            config.news_api_key.clone(),
            config.news_timeout,
        )
    }

    fn news_url(&self, symbol: &str) -> Result<Url> {
        let mut url = utils::parse_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| Error::Configuration(format!("Not a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "yahoo", "ne", "news", symbol]);
        Ok(url)
    }
}

impl fmt::Debug for YahooNewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YahooNewsClient")
            .field("base_url", &self.base_url)
            .field("api_host", &self.api_host)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl NewsSource for YahooNewsClient {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn market(&self) -> Market {
        Market::Global
    }

    async fn fetch_news(&self, symbol: &str) -> Result<Vec<Article>> {
        let mut request = self
            .http
            .get(self.news_url(symbol)?)
            .header("x-rapidapi-host", &self.api_host);
        if let Some(key) = &self.api_key {
            request = request.header("x-rapidapi-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("news request failed: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "news provider returned {}",
                status
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::MalformedPayload(format!("news response is not JSON: {}", e)))?;
        let articles = parse_news_body(payload)?;
        info!(symbol, count = articles.len(), "📰 Fetched global news");
        Ok(articles)
    }
}

fn parse_news_body(mut payload: Value) -> Result<Vec<Article>> {
    let body = match payload.get_mut("body").map(Value::take) {
        Some(body @ Value::Array(_)) => body,
        Some(_) => return Err(Error::MalformedPayload("`body` is not a list".to_string())),
        None => return Err(Error::MalformedPayload("response has no `body`".to_string())),
    };

    let raw: Vec<RawArticle> = serde_json::from_value(body)
        .map_err(|e| Error::MalformedPayload(format!("unexpected article shape: {}", e)))?;
    Ok(raw.into_iter().map(Article::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer, body: ResponseTemplate) -> YahooNewsClient {
        Mock::given(method("GET"))
            .and(path("/api/yahoo/ne/news/AAPL"))
            .and(header("x-rapidapi-host", "yahoo-finance15.p.rapidapi.com"))
            .and(header("x-rapidapi-key", "rapid_key"))
            .respond_with(body)
            .mount(server)
            .await;
        YahooNewsClient::new(
            server.uri(),
            "yahoo-finance15.p.rapidapi.com",
            Some("rapid_key".to_string()),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[test]
    fn test_news_url() {
        let client = YahooNewsClient::new("https://example.com/", "h", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.news_url("BRK.B").unwrap().as_str(),
            "https://example.com/api/yahoo/ne/news/BRK.B"
        );
        let client = YahooNewsClient::new("https://example.com/proxy", "h", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.news_url("AAPL").unwrap().as_str(),
            "https://example.com/proxy/api/yahoo/ne/news/AAPL"
        );
    }

    #[tokio::test]
    async fn test_fetch_news_success() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "meta": {"version": "v1.0"},
            "body": [
                {
                    "title": "Apple beats estimates",
                    "link": "https://finance.yahoo.com/a",
                    "description": "Revenue rose 8%",
                    "pubDate": "Mon, 01 Jul 2024 12:00:00 +0000",
                    "guid": "abc",
                    "source": "Reuters"
                },
                {
                    "title": "Apple event recap",
                    "link": "https://finance.yahoo.com/b",
                    "pubDate": "Mon, 01 Jul 2024 13:00:00 +0000"
                }
            ]
        });
        let client = client_for(&server, ResponseTemplate::new(200).set_body_json(body)).await;

        let articles = client.fetch_news("AAPL").await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Apple beats estimates");
        assert_eq!(articles[0].guid.as_deref(), Some("abc"));
        assert_eq!(articles[0].source.as_deref(), Some("Reuters"));
        assert_eq!(articles[1].description, "");
        assert!(articles.iter().all(|a| a.sentiment.is_none()));
    }

    #[tokio::test]
    async fn test_empty_body_is_valid() {
        let server = MockServer::start().await;
        let client = client_for(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"body": []})),
        )
        .await;
        assert!(client.fetch_news("AAPL").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_body_is_malformed() {
        let server = MockServer::start().await;
        let client = client_for(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "quota"})),
        )
        .await;
        let err = client.fetch_news("AAPL").await.unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_non_list_body_is_malformed() {
        let server = MockServer::start().await;
        let client = client_for(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"body": "nope"})),
        )
        .await;
        assert!(matches!(
            client.fetch_news("AAPL").await,
            Err(Error::MalformedPayload(_))
        ));

        let server = MockServer::start().await;
        let client = client_for(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"body": [1, 2]})),
        )
        .await;
        assert!(matches!(
            client.fetch_news("AAPL").await,
            Err(Error::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_unavailable() {
        let server = MockServer::start().await;
        let client = client_for(&server, ResponseTemplate::new(429)).await;
        let err = client.fetch_news("AAPL").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"body": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client =
            YahooNewsClient::new(server.uri(), "h", None, Duration::from_millis(50)).unwrap();
        let err = client.fetch_news("AAPL").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_non_json_is_malformed() {
        let server = MockServer::start().await;
        let client =
            client_for(&server, ResponseTemplate::new(200).set_body_string("<html/>")).await;
        assert!(matches!(
            client.fetch_news("AAPL").await,
            Err(Error::MalformedPayload(_))
        ));
    }
}
