use async_trait::async_trait;

use crate::types::{Article, Market};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Market this source covers
    fn market(&self) -> Market;

    /// Fetch recent articles for a ticker symbol or company name.
    /// Returned articles carry no sentiment yet.
    async fn fetch_news(&self, query: &str) -> Result<Vec<Article>>;
}
