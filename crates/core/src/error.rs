//! Error types for Kotoba operations.
//!
//! This module defines [`KotobaError`], which covers everything that can go
//! wrong below the analyzer: fetching, HTML parsing, tokenization and
//! export. Run-level outcomes shown to a user are tagged separately by
//! [`RunError`](crate::RunError).
//!
//! # Example
//!
//! ```rust
//! use kotoba_core::{KotobaError, Result};
//!
//! fn page_body(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(KotobaError::NoContent);
//!     }
//!     Ok(text)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Kotoba operations.
#[derive(Error, Debug)]
pub enum KotobaError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status code.
    #[error("HTTP request returned status {status}")]
    HttpStatus { status: u16 },

    /// The response body is not text (e.g. an image or a PDF).
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No visible text could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// The morphological analyzer failed to load or to segment text.
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Dictionary response could not be interpreted.
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Export serialization or parsing failed.
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type alias for KotobaError.
pub type Result<T> = std::result::Result<T, KotobaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KotobaError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_status_error() {
        let err = KotobaError::HttpStatus { status: 404 };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_timeout_error() {
        let err = KotobaError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_tokenizer_error() {
        let err = KotobaError::Tokenizer("dictionary missing".to_string());
        assert_eq!(err.to_string(), "Tokenizer error: dictionary missing");
    }
}
