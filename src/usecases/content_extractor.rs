//! Content extraction: URL -> validated -> fetched -> clean article prose.

use crate::adapters::wiki::{parse_article, validate_article_url};
use crate::domain::{ExtractedArticle, ExtractionError};
use crate::ports::PageFetcher;
use std::sync::Arc;
use tracing::info;

/// Turns a Wikipedia article URL into an `ExtractedArticle`.
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl ContentExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Validate, fetch and parse. The URL is checked before any network access.
    pub async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractionError> {
        let url = url.trim();
        validate_article_url(url)?;

        let html = self.fetcher.fetch(url).await?;
        let article = parse_article(url, &html)?;

        info!(
            url,
            title = %article.title,
            content_len = article.content.chars().count(),
            "article extracted"
        );
        Ok(article)
    }
}
