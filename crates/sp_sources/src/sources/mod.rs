use scraper::{ElementRef, Selector};
use sp_core::{Error, Result};
use url::Url;

pub mod naver;
pub mod yahoo;

pub use naver::NaverNewsScraper;
pub use yahoo::YahooNewsClient;

pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Common utilities for sources
pub(crate) mod utils {
    use super::*;

    const HIGHLIGHT_TAGS: [&str; 3] = ["mark", "b", "strong"];
    const HIGHLIGHT_FRAGMENTS: [&str; 6] = ["<mark>", "</mark>", "<b>", "</b>", "<strong>", "</strong>"];

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL {}: {}", url, e)))
    }

    pub fn selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector {}: {}", selector, e)))
    }

    /// Text content of an element with whitespace collapsed and search
    /// highlight fragments removed. Sibling elements are separated by a
    /// space; highlight tags stay glued to the surrounding word.
    pub fn clean_text(element: ElementRef<'_>) -> String {
        let mut raw = String::new();
        push_text(element, &mut raw);
        strip_highlights(&raw)
    }

    fn push_text(element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(child) = ElementRef::wrap(child) {
                if HIGHLIGHT_TAGS.contains(&child.value().name()) {
                    push_text(child, out);
                } else {
                    out.push(' ');
                    push_text(child, out);
                    out.push(' ');
                }
            }
        }
    }

    pub fn strip_highlights(text: &str) -> String {
        let mut cleaned = text.to_string();
        for fragment in HIGHLIGHT_FRAGMENTS {
            cleaned = cleaned.replace(fragment, "");
        }
        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::utils;
    use scraper::Html;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://search.naver.com/search.naver").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_selector() {
        assert!(utils::selector("div.card a[data-heatmap-target=\".tit\"]").is_ok());
        assert!(utils::selector("div[").is_err());
    }

    #[test]
    fn test_clean_text() {
        let html = r#"<a class="t">  삼성<mark>전자</mark>
            주가 &lt;b&gt;급등&lt;/b&gt; </a>"#;
        let document = Html::parse_fragment(html);
        let selector = utils::selector("a.t").unwrap();
        let element = document.select(&selector).next().unwrap();
        assert_eq!(utils::clean_text(element), "삼성전자 주가 급등");
    }

    #[test]
    fn test_clean_text_separates_sibling_elements() {
        let document = Html::parse_fragment(
            r#"<a class="t"><span>삼성전자</span><span>주가</span> <strong>급등</strong>세</a>"#,
        );
        let selector = utils::selector("a.t").unwrap();
        let element = document.select(&selector).next().unwrap();
        assert_eq!(utils::clean_text(element), "삼성전자 주가 급등세");
    }

    #[test]
    fn test_strip_highlights() {
        assert_eq!(utils::strip_highlights("<b>Apple</b> beats  estimates"), "Apple beats estimates");
        assert_eq!(utils::strip_highlights(""), "");
    }
}
