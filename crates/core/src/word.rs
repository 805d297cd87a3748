//! The annotated word, the unit rendered and exported.

use serde::{Deserialize, Serialize};

use crate::dictionary::Lookup;
use crate::rank::Candidate;
use crate::romaji::romanize;

/// A ranked candidate merged with its dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedWord {
    pub surface: String,
    pub count: usize,
    pub reading: String,
    pub extra_reading_count: usize,
    pub definition: String,
    pub part_of_speech: String,
}

impl AnnotatedWord {
    /// Merges a candidate with its lookup.
    ///
    /// When the dictionary gives no reading, the analyzer's reading (or
    /// failing that the surface form) is romanized instead.
    pub fn new(candidate: Candidate, lookup: Lookup) -> Self {
        let reading = lookup
            .reading
            .filter(|reading| !reading.is_empty())
            .unwrap_or_else(|| romanize(candidate.reading.as_deref().unwrap_or(&candidate.surface)));

        Self {
            surface: candidate.surface,
            count: candidate.count,
            reading,
            extra_reading_count: lookup.extra_readings,
            definition: lookup.definition,
            part_of_speech: lookup.part_of_speech,
        }
    }
}
