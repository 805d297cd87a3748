//! Page fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving raw markup from
//! HTTP/HTTPS URLs, local files, and standard input.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::{Client, header};
use url::Url;

use crate::{KotobaError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Kotoba/1.0)".to_string() }
    }
}

/// Parses and checks a user-supplied URL.
///
/// Only `http` and `https` are accepted; anything else is
/// [`KotobaError::InvalidUrl`].
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed_url = Url::parse(url.trim()).map_err(|e| KotobaError::InvalidUrl(e.to_string()))?;

    match parsed_url.scheme() {
        "http" | "https" => Ok(parsed_url),
        other => Err(KotobaError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http:// or https://)",
            other
        ))),
    }
}

/// Returns true when a `Content-Type` value denotes a textual document.
pub fn is_text_content_type(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime.starts_with("text/") || mime.ends_with("+xml") || mime == "application/xml"
}

/// Fetches markup from a URL.
///
/// Performs an HTTP GET, follows redirects and respects the configured
/// timeout. Non-success status codes and non-text bodies are errors.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = validate_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(KotobaError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header(header::USER_AGENT, &config.user_agent)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(header::ACCEPT_LANGUAGE, "ja,en;q=0.8")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { KotobaError::Timeout { timeout: config.timeout } } else { KotobaError::HttpError(e) }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(KotobaError::HttpStatus { status: status.as_u16() });
    }

    if let Some(content_type) = response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
        && !is_text_content_type(content_type)
    {
        return Err(KotobaError::UnsupportedContent(content_type.to_string()));
    }

    // Decoded with the charset named in Content-Type, UTF-8 otherwise.
    let content = response.text().await?;
    tracing::debug!(url, bytes = content.len(), "fetched page");

    Ok(content)
}

/// Reads markup from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(KotobaError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(KotobaError::from)
    }
}

/// Reads markup from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(KotobaError::from)?;

    Ok(buffer)
}
