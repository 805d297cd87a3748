//! Dictionary lookup and result normalization.
//!
//! A [`Dictionary`] answers one word at a time with a normalized
//! [`Lookup`]. Lookups never fail at this seam: "no entry" and "could not
//! ask" come back as the sentinel results [`Lookup::not_found`] and
//! [`Lookup::failed`], which the [`Analyzer`](crate::Analyzer) skips.

use std::collections::HashMap;
#[cfg(feature = "fetch")]
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "fetch")]
use crate::{KotobaError, Result};

/// Definition text of the "no entry" sentinel.
pub const NO_DEFINITION: &str = "No definition found";

/// Definition text of the "transport or parse failure" sentinel.
pub const LOOKUP_ERROR: &str = "Error fetching definition";

/// Part of speech used when the dictionary gives none.
pub const DEFAULT_PART_OF_SPEECH: &str = "noun";

/// Normalized answer for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup {
    /// English glosses of the first sense joined with `"; "`.
    pub definition: String,
    /// First listed reading.
    pub reading: Option<String>,
    /// How many further readings the entry listed.
    pub extra_readings: usize,
    /// Coarse part-of-speech label such as `noun` or `godan verb`.
    pub part_of_speech: String,
}

impl Lookup {
    /// Sentinel for a word with no dictionary entry.
    pub fn not_found() -> Self {
        Self::sentinel(NO_DEFINITION)
    }

    /// Sentinel for a lookup that could not be completed.
    pub fn failed() -> Self {
        Self::sentinel(LOOKUP_ERROR)
    }

    fn sentinel(definition: &str) -> Self {
        Self {
            definition: definition.to_string(),
            reading: None,
            extra_readings: 0,
            part_of_speech: DEFAULT_PART_OF_SPEECH.to_string(),
        }
    }

    /// True for either sentinel result.
    pub fn is_sentinel(&self) -> bool {
        self.definition == NO_DEFINITION || self.definition == LOOKUP_ERROR
    }
}

/// Looks words up one at a time.
#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Looks up `word`, returning a sentinel on absence or failure.
    async fn lookup(&self, word: &str) -> Lookup;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// Search response of the Jisho word API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JishoResponse {
    #[serde(default)]
    pub data: Vec<JishoEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JishoEntry {
    #[serde(default)]
    pub japanese: Vec<JishoForm>,
    #[serde(default)]
    pub senses: Vec<JishoSense>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JishoForm {
    pub word: Option<String>,
    pub reading: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JishoSense {
    #[serde(default)]
    pub english_definitions: Vec<String>,
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
}

/// Normalizes a search response; only the first entry is considered.
pub fn normalize_response(response: &JishoResponse) -> Lookup {
    response.data.first().map(normalize_entry).unwrap_or_else(Lookup::not_found)
}

/// Normalizes one dictionary entry.
pub fn normalize_entry(entry: &JishoEntry) -> Lookup {
    let readings: Vec<&str> = entry
        .japanese
        .iter()
        .filter_map(|form| form.reading.as_deref())
        .filter(|reading| !reading.is_empty())
        .collect();

    let sense = entry.senses.first();
    let definition = sense.map(|s| s.english_definitions.join("; ")).unwrap_or_default();
    let part_of_speech = sense
        .map(|s| normalize_part_of_speech(&s.parts_of_speech))
        .unwrap_or_else(|| DEFAULT_PART_OF_SPEECH.to_string());

    Lookup {
        definition,
        reading: readings.first().map(|r| r.to_string()),
        extra_readings: readings.len().saturating_sub(1),
        part_of_speech,
    }
}

/// Reduces a sense's part-of-speech tags to a coarse label.
///
/// The first word of the first tag is lowercased. A bare `verb` is
/// refined to `ichidan verb` or `godan verb` when any tag names the
/// conjugation class, ichidan taking precedence.
///
/// # Example
///
/// ```rust
/// use kotoba_core::normalize_part_of_speech;
///
/// let tags = vec!["Verb".to_string(), "Godan verb with 'ku' ending".to_string()];
/// assert_eq!(normalize_part_of_speech(&tags), "godan verb");
/// assert_eq!(normalize_part_of_speech(&["Noun".to_string()]), "noun");
/// ```
pub fn normalize_part_of_speech(tags: &[String]) -> String {
    let Some(first) = tags.first().and_then(|tag| tag.split_whitespace().next()) else {
        return DEFAULT_PART_OF_SPEECH.to_string();
    };

    let label = first.to_lowercase();
    if label != "verb" {
        return label;
    }

    let mentions = |class: &str| tags.iter().any(|tag| tag.to_lowercase().contains(class));
    if mentions("ichidan") {
        "ichidan verb".to_string()
    } else if mentions("godan") {
        "godan verb".to_string()
    } else {
        label
    }
}

/// HTTP dictionary client configuration.
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// Search endpoint; the word is sent as the `keyword` query parameter.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_url: "https://jisho.org/api/v1/search/words".to_string(),
            timeout: 10,
            user_agent: "Mozilla/5.0 (compatible; Kotoba/1.0)".to_string(),
        }
    }
}

/// [`Dictionary`] backed by the Jisho search API.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct JishoDictionary {
    client: reqwest::Client,
    config: DictionaryConfig,
}

#[cfg(feature = "fetch")]
impl JishoDictionary {
    pub fn new(config: DictionaryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Looks up `word`, surfacing transport and parse failures as errors.
    pub async fn try_lookup(&self, word: &str) -> Result<Lookup> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[("keyword", word)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() { KotobaError::Timeout { timeout: self.config.timeout } } else { e.into() }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(KotobaError::HttpStatus { status: status.as_u16() });
        }

        let body: JishoResponse =
            response.json().await.map_err(|e| KotobaError::Dictionary(format!("Failed to parse response: {}", e)))?;

        Ok(normalize_response(&body))
    }
}

#[cfg(feature = "fetch")]
#[async_trait]
impl Dictionary for JishoDictionary {
    async fn lookup(&self, word: &str) -> Lookup {
        match self.try_lookup(word).await {
            Ok(lookup) => lookup,
            Err(error) => {
                tracing::warn!(word, %error, "dictionary lookup failed");
                Lookup::failed()
            }
        }
    }

    fn name(&self) -> &'static str {
        "jisho"
    }
}

/// In-memory [`Dictionary`]; words not inserted are not found.
#[derive(Debug, Clone, Default)]
pub struct MemoryDictionary {
    entries: HashMap<String, Lookup>,
}

impl MemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the answer for `word`.
    pub fn insert(&mut self, word: impl Into<String>, lookup: Lookup) -> &mut Self {
        self.entries.insert(word.into(), lookup);
        self
    }
}

impl FromIterator<(String, Lookup)> for MemoryDictionary {
    fn from_iter<I: IntoIterator<Item = (String, Lookup)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[async_trait]
impl Dictionary for MemoryDictionary {
    async fn lookup(&self, word: &str) -> Lookup {
        self.entries.get(word).cloned().unwrap_or_else(Lookup::not_found)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
