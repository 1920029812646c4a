use std::time::Duration;

use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info, warn};

pub const UNTITLED: &str = "Untitled";

/// One feed entry, reduced to what the summarizer needs.
///
/// `content` is never empty: entries without any text are dropped while
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub content: String,
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("AINewsAgent/1.0 (RSS Summarizer)")
            .build()?;

        Ok(Self { client })
    }

    /// Fetch every feed in order and flatten their articles.
    ///
    /// A feed that cannot be retrieved or parsed is logged and skipped; the
    /// remaining feeds are still processed.
    pub async fn fetch_articles(&self, feed_urls: &[String]) -> Vec<Article> {
        let mut articles = Vec::new();

        for url in feed_urls {
            info!("Fetching feed: {}", url);
            match self.fetch_feed(url).await {
                Ok(mut feed_articles) => {
                    debug!("Got {} articles from {}", feed_articles.len(), url);
                    articles.append(&mut feed_articles);
                }
                Err(e) => {
                    warn!("Error fetching/parsing RSS feed {}: {}", url, e);
                }
            }
        }

        articles
    }

    async fn fetch_feed(&self, url: &str) -> anyhow::Result<Vec<Article>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Self::parse_articles(&bytes)
    }

    /// Parse a single RSS/Atom document into articles, keeping entry order.
    pub fn parse_articles(xml_bytes: &[u8]) -> anyhow::Result<Vec<Article>> {
        let parsed = parser::parse(xml_bytes)?;
        Ok(parsed.entries.iter().filter_map(article_from_entry).collect())
    }
}

/// Build an article from a feed entry.
///
/// Content is taken from the entry's content body first, then its summary.
/// Returns `None` when neither yields any text.
pub fn article_from_entry(entry: &Entry) -> Option<Article> {
    let content = entry
        .content
        .as_ref()
        .and_then(|c| c.body.clone())
        .filter(|body| !body.is_empty())
        .or_else(|| {
            entry
                .summary
                .as_ref()
                .map(|s| s.content.clone())
                .filter(|summary| !summary.is_empty())
        })?;

    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.clone())
        .unwrap_or_else(|| UNTITLED.to_string());

    Some(Article { title, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <feed xmlns="http://www.w3.org/2005/Atom">
            <title>Example Blog</title>
            <id>urn:example:blog</id>
            <updated>2024-12-09T12:00:00Z</updated>
            <entry>
                <title>Both fields</title>
                <id>urn:example:1</id>
                <updated>2024-12-09T12:00:00Z</updated>
                <summary>The short summary</summary>
                <content type="text">The full content</content>
            </entry>
            <entry>
                <title>Summary only</title>
                <id>urn:example:2</id>
                <updated>2024-12-09T11:00:00Z</updated>
                <summary>Only a summary here</summary>
            </entry>
            <entry>
                <title>Nothing at all</title>
                <id>urn:example:3</id>
                <updated>2024-12-09T10:00:00Z</updated>
            </entry>
        </feed>
    "#;

    const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <rss version="2.0">
            <channel>
                <title>Tech News</title>
                <link>https://technews.example.com</link>
                <description>Latest tech news</description>
                <item>
                    <title>First story</title>
                    <link>https://technews.example.com/1</link>
                    <description>First description</description>
                </item>
                <item>
                    <link>https://technews.example.com/2</link>
                    <description>A story without a title</description>
                </item>
                <item>
                    <title>Link only</title>
                    <link>https://technews.example.com/3</link>
                </item>
            </channel>
        </rss>
    "#;

    #[test]
    fn test_content_preferred_over_summary() {
        let articles = Fetcher::parse_articles(ATOM_FEED.as_bytes()).unwrap();

        assert_eq!(articles[0].title, "Both fields");
        assert_eq!(articles[0].content, "The full content");
    }

    #[test]
    fn test_summary_used_when_no_content() {
        let articles = Fetcher::parse_articles(ATOM_FEED.as_bytes()).unwrap();

        assert_eq!(articles[1].title, "Summary only");
        assert_eq!(articles[1].content, "Only a summary here");
    }

    #[test]
    fn test_empty_content_falls_back_to_summary() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
                <channel>
                    <title>Encoded</title>
                    <link>https://encoded.example.com</link>
                    <description>Feed with content:encoded</description>
                    <item>
                        <title>Blank body</title>
                        <link>https://encoded.example.com/1</link>
                        <description>Description wins</description>
                        <content:encoded></content:encoded>
                    </item>
                    <item>
                        <title>Full body</title>
                        <link>https://encoded.example.com/2</link>
                        <description>Not this one</description>
                        <content:encoded>Encoded body</content:encoded>
                    </item>
                </channel>
            </rss>
        "#;

        let articles = Fetcher::parse_articles(xml.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Blank body");
        assert_eq!(articles[0].content, "Description wins");
        assert_eq!(articles[1].content, "Encoded body");
    }

    #[test]
    fn test_entry_without_content_is_dropped() {
        let articles = Fetcher::parse_articles(ATOM_FEED.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| a.title != "Nothing at all"));
        assert!(articles.iter().all(|a| !a.content.is_empty()));
    }

    #[test]
    fn test_rss_missing_title_defaults_to_untitled() {
        let articles = Fetcher::parse_articles(RSS_FEED.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "First story");
        assert_eq!(articles[0].content, "First description");
        assert_eq!(articles[1].title, UNTITLED);
        assert_eq!(articles[1].content, "A story without a title");
    }

    #[test]
    fn test_entry_without_anything() {
        let entry = Entry::default();
        assert_eq!(article_from_entry(&entry), None);
    }

    #[test]
    fn test_parse_invalid_feed() {
        let result = Fetcher::parse_articles(b"this is not a feed");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_channel() {
        let xml = r#"
            <rss version="2.0">
                <channel>
                    <title>Empty Feed</title>
                </channel>
            </rss>
        "#;

        let articles = Fetcher::parse_articles(xml.as_bytes()).unwrap();
        assert!(articles.is_empty());
    }
}
