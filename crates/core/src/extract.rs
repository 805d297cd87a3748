//! Page-text extraction.
//!
//! Turns a URL (or markup already in hand) into the plain visible text of
//! the page body. The [`PageSource`] trait is the seam the
//! [`Analyzer`](crate::Analyzer) fetches through.

use async_trait::async_trait;
use serde::Serialize;

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};
use crate::parse::Document;
use crate::{KotobaError, PreprocessConfig, Result};

/// Visible text extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    /// Body text, trimmed, one text node per line.
    pub content: String,
    /// Document title, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Extracts visible body text from markup.
///
/// # Errors
///
/// Returns [`KotobaError::NoContent`] when the body holds no visible text.
pub fn extract_text(html: &str) -> Result<PageText> {
    extract_text_with_config(html, &PreprocessConfig::default())
}

/// Extracts visible body text from markup with a custom preprocessing configuration.
pub fn extract_text_with_config(html: &str, config: &PreprocessConfig) -> Result<PageText> {
    let doc = Document::parse_with_preprocessing(html, config)?;
    let content = doc.body_text();

    if content.is_empty() {
        return Err(KotobaError::NoContent);
    }

    if let Some(lang) = doc.lang()
        && !lang.to_ascii_lowercase().starts_with("ja")
    {
        tracing::debug!(%lang, "page does not declare Japanese");
    }

    Ok(PageText { content, title: doc.title() })
}

/// Fetches a URL and extracts its visible body text.
#[cfg(feature = "fetch")]
pub async fn fetch_page_text(url: &str, config: &FetchConfig) -> Result<PageText> {
    fetch_page_text_with_config(url, config, &PreprocessConfig::default()).await
}

/// Fetches a URL and extracts its visible body text with a custom preprocessing configuration.
#[cfg(feature = "fetch")]
pub async fn fetch_page_text_with_config(
    url: &str, config: &FetchConfig, preprocess: &PreprocessConfig,
) -> Result<PageText> {
    let html = fetch_url(url, config).await?;
    extract_text_with_config(&html, preprocess)
}

/// Something that can turn a URL into page text.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches `url` and returns its visible text.
    async fn page_text(&self, url: &str) -> Result<PageText>;
}

/// [`PageSource`] backed by an HTTP GET.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone, Default)]
pub struct HttpPageSource {
    config: FetchConfig,
    preprocess: PreprocessConfig,
}

#[cfg(feature = "fetch")]
impl HttpPageSource {
    pub fn new(config: FetchConfig) -> Self {
        Self { config, preprocess: PreprocessConfig::default() }
    }

    /// Sets how fetched markup is cleaned before text extraction.
    pub fn with_preprocess(mut self, preprocess: PreprocessConfig) -> Self {
        self.preprocess = preprocess;
        self
    }
}

#[cfg(feature = "fetch")]
#[async_trait]
impl PageSource for HttpPageSource {
    async fn page_text(&self, url: &str) -> Result<PageText> {
        fetch_page_text_with_config(url, &self.config, &self.preprocess).await
    }
}
