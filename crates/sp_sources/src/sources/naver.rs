use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use sp_core::{Article, Config, Error, Market, NewsSource, Result};
use tracing::{debug, info, warn};

use super::utils;
use super::BROWSER_USER_AGENT;

pub const SOURCE_NAME: &str = "Naver";
pub const NO_DESCRIPTION: &str = "No description";

const CARD_SELECTOR: &str = "div.hfG7LjyJAPmlsSM3W_Lz";
const TITLE_SELECTOR: &str = r#"a[data-heatmap-target=".tit"]"#;
const BODY_SELECTOR: &str = r#"a[data-heatmap-target=".body"]"#;
const TIME_SELECTOR: &str = "div.sds-comps-horizontal-layout span.sds-comps-text-type-body2";

struct CardSelectors {
    card: Selector,
    title: Selector,
    body: Selector,
    time: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            card: utils::selector(CARD_SELECTOR)?,
            title: utils::selector(TITLE_SELECTOR)?,
            body: utils::selector(BODY_SELECTOR)?,
            time: utils::selector(TIME_SELECTOR)?,
        })
    }
}

/// Scrapes the Naver news search results page. Failures never reach the
/// caller: a broken page or network error yields an empty list.
#[derive(Debug, Clone)]
pub struct NaverNewsScraper {
    http: Client,
    search_url: String,
    limit: usize,
}

impl NaverNewsScraper {
    pub fn new(search_url: impl Into<String>, limit: usize, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ko-KR,ko;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.naver.com/"));

        let http = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            search_url: search_url.into(),
            limit,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.naver_search_url.clone(),
            config.korean_news_limit,
            config.scrape_timeout,
        )
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<Article>> {
        let mut url = utils::parse_url(&self.search_url)?;
        url.query_pairs_mut()
            .append_pair("where", "news")
            .append_pair("query", query);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "Naver search returned {}",
                status
            )));
        }

        let html = response.text().await?;
        parse_search_page(&html, self.limit)
    }
}

#[async_trait]
impl NewsSource for NaverNewsScraper {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn market(&self) -> Market {
        Market::Korea
    }

    async fn fetch_news(&self, query: &str) -> Result<Vec<Article>> {
        match self.try_fetch(query).await {
            Ok(articles) => {
                info!(query, count = articles.len(), "📰 Fetched Naver news");
                Ok(articles)
            }
            Err(e) => {
                warn!(query, "Naver news fetch failed, returning no articles: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

/// Extracts up to `limit` article cards from a search results page.
/// Cards without a title or link are skipped.
pub fn parse_search_page(html: &str, limit: usize) -> Result<Vec<Article>> {
    let selectors = CardSelectors::new()?;
    let document = Html::parse_document(html);

    let articles = document
        .select(&selectors.card)
        .take(limit)
        .filter_map(|card| {
            let article = parse_card(card, &selectors);
            if article.is_none() {
                debug!("Skipping search card without title or link");
            }
            article
        })
        .collect();

    Ok(articles)
}

fn parse_card(card: ElementRef<'_>, selectors: &CardSelectors) -> Option<Article> {
    let title_link = card.select(&selectors.title).next()?;
    let link = title_link.value().attr("href")?.trim();
    let title = utils::clean_text(title_link);
    if link.is_empty() || title.is_empty() {
        return None;
    }

    let description = card
        .select(&selectors.body)
        .next()
        .map(utils::clean_text)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let published_at = card
        .select(&selectors.time)
        .next()
        .map(utils::clean_text)
        .unwrap_or_default();

    Some(Article::new(title, link, description, published_at).with_source(SOURCE_NAME))
}
