//! Analysis orchestration.
//!
//! The [`Analyzer`] drives one run of the pipeline: extract page text,
//! tokenize, rank, then annotate the ranked candidates through the
//! dictionary until enough words have definitions.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kotoba_core::{AnalyzeConfig, Analyzer, DictionaryConfig, HttpPageSource, JishoDictionary, LinderaTokenizer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::new(
//!     Arc::new(HttpPageSource::default()),
//!     Arc::new(JishoDictionary::new(DictionaryConfig::default())?),
//!     AnalyzeConfig::builder().target_count(10).build(),
//! )
//! .with_tokenizer(Arc::new(LinderaTokenizer::new()?));
//!
//! for word in analyzer.analyze("https://www3.nhk.or.jp/news/easy/").await? {
//!     println!("{} ({}) x{}", word.surface, word.reading, word.count);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use futures::{StreamExt, stream};
use serde::Serialize;
use thiserror::Error;

use crate::dictionary::Dictionary;
use crate::extract::PageSource;
use crate::rank::{Candidate, DEFAULT_POOL_SIZE, rank_tokens};
use crate::tokenize::Tokenizer;
use crate::word::AnnotatedWord;

/// Message shown for any extraction failure.
pub const FETCH_FAILED: &str = "Failed to fetch page content";

/// Default number of defined words a run collects.
pub const DEFAULT_TARGET_COUNT: usize = 20;

/// Why a run produced no word list.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum RunError {
    /// The run never started (empty URL, analyzer not ready, run in flight).
    #[error("{0}")]
    Validation(String),

    /// The page was processed but no candidate had a definition.
    #[error("No kanji words with dictionary definitions were found on this page")]
    NoResults,

    /// The page could not be fetched or processed.
    #[error("{0}")]
    Transport(String),
}

/// Configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Stop once this many words have definitions (default: 20).
    pub target_count: usize,

    /// Maximum ranked candidates considered (default: 50).
    pub pool_size: usize,

    /// Dictionary lookups in flight at once (default: 1, i.e. sequential).
    pub lookup_concurrency: usize,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self { target_count: DEFAULT_TARGET_COUNT, pool_size: DEFAULT_POOL_SIZE, lookup_concurrency: 1 }
    }
}

impl AnalyzeConfig {
    /// Creates a new builder for AnalyzeConfig.
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::new()
    }
}

/// Builder for AnalyzeConfig.
///
/// # Example
///
/// ```rust
/// use kotoba_core::AnalyzeConfig;
///
/// let config = AnalyzeConfig::builder().target_count(10).lookup_concurrency(4).build();
/// assert_eq!(config.pool_size, 50);
/// ```
pub struct AnalyzeConfigBuilder {
    config: AnalyzeConfig,
}

impl AnalyzeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzeConfig::default() }
    }

    /// Sets how many defined words to collect.
    pub fn target_count(mut self, value: usize) -> Self {
        self.config.target_count = value;
        self
    }

    /// Sets the candidate pool size.
    pub fn pool_size(mut self, value: usize) -> Self {
        self.config.pool_size = value;
        self
    }

    /// Sets the number of concurrent dictionary lookups.
    pub fn lookup_concurrency(mut self, value: usize) -> Self {
        self.config.lookup_concurrency = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzeConfig {
        self.config
    }
}

impl Default for AnalyzeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the fetch → tokenize → rank → annotate pipeline.
pub struct Analyzer {
    source: Arc<dyn PageSource>,
    dictionary: Arc<dyn Dictionary>,
    tokenizer: Option<Arc<dyn Tokenizer>>,
    config: AnalyzeConfig,
}

impl Analyzer {
    /// Creates an analyzer with no tokenizer; it is not ready until one is set.
    pub fn new(source: Arc<dyn PageSource>, dictionary: Arc<dyn Dictionary>, config: AnalyzeConfig) -> Self {
        Self { source, dictionary, tokenizer: None, config }
    }

    /// Supplies the morphological analyzer.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// True once a tokenizer is available.
    pub fn is_ready(&self) -> bool {
        self.tokenizer.is_some()
    }

    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    /// Checks that a run for `url` may start.
    pub fn validate(&self, url: &str) -> Result<(), RunError> {
        if url.trim().is_empty() {
            return Err(RunError::Validation("Please enter a URL".to_string()));
        }
        if !self.is_ready() {
            return Err(RunError::Validation("Tokenizer is not ready yet".to_string()));
        }
        Ok(())
    }

    fn tokenizer(&self) -> Result<&dyn Tokenizer, RunError> {
        self.tokenizer
            .as_deref()
            .ok_or_else(|| RunError::Validation("Tokenizer is not ready yet".to_string()))
    }

    /// Analyzes the page at `url`.
    #[tracing::instrument(skip(self))]
    pub async fn analyze(&self, url: &str) -> Result<Vec<AnnotatedWord>, RunError> {
        self.validate(url)?;

        let page = match self.source.page_text(url.trim()).await {
            Ok(page) if !page.content.trim().is_empty() => page,
            Ok(_) => {
                tracing::info!("page has no visible text");
                return Err(RunError::Transport(FETCH_FAILED.to_string()));
            }
            Err(error) => {
                tracing::info!(%error, "page extraction failed");
                return Err(RunError::Transport(FETCH_FAILED.to_string()));
            }
        };
        tracing::debug!(chars = page.content.chars().count(), title = ?page.title, "extracted page text");

        self.analyze_text(&page.content).await
    }

    /// Analyzes text that has already been extracted.
    pub async fn analyze_text(&self, text: &str) -> Result<Vec<AnnotatedWord>, RunError> {
        let candidates = self.candidates(text)?;
        let words = self.annotate(candidates).await;

        if words.is_empty() {
            tracing::info!("no candidate had a definition");
            return Err(RunError::NoResults);
        }

        tracing::info!(words = words.len(), "analysis complete");
        Ok(words)
    }

    /// Tokenizes and ranks `text` without consulting the dictionary.
    pub fn candidates(&self, text: &str) -> Result<Vec<Candidate>, RunError> {
        let tokenizer = self.tokenizer()?;
        let tokens = tokenizer.tokenize(text).map_err(|error| {
            tracing::warn!(tokenizer = tokenizer.name(), %error, "tokenization failed");
            RunError::Transport(error.to_string())
        })?;

        Ok(rank_tokens(&tokens, self.config.pool_size))
    }

    /// Looks candidates up in ranked order and keeps those with definitions.
    ///
    /// Up to `lookup_concurrency` lookups run at once, but results are
    /// consumed in ranked order. Once `target_count` words are kept the
    /// remaining lookups are dropped without being started.
    pub async fn annotate(&self, candidates: Vec<Candidate>) -> Vec<AnnotatedWord> {
        let target = self.config.target_count;
        let mut words = Vec::with_capacity(target.min(candidates.len()));
        if target == 0 {
            return words;
        }

        let dictionary = self.dictionary.as_ref();
        let mut lookups = stream::iter(candidates)
            .map(|candidate| async move {
                let lookup = dictionary.lookup(&candidate.surface).await;
                (candidate, lookup)
            })
            .buffered(self.config.lookup_concurrency.max(1));

        while let Some((candidate, lookup)) = lookups.next().await {
            if lookup.is_sentinel() {
                tracing::debug!(surface = %candidate.surface, definition = %lookup.definition, "skipping candidate");
                continue;
            }

            words.push(AnnotatedWord::new(candidate, lookup));
            if words.len() >= target {
                break;
            }
        }

        words
    }
}
