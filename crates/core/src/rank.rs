//! Frequency ranking of kanji-bearing tokens.

use indexmap::IndexMap;
use serde::Serialize;

use crate::tokenize::Token;

/// Upper bound on candidates handed to dictionary lookup.
///
/// Leaves headroom above the default target of 20 kept words, since some
/// candidates are dropped for lacking a definition.
pub const DEFAULT_POOL_SIZE: usize = 50;

/// A surface form and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub surface: String,
    pub count: usize,
    /// Analyzer reading of the first occurrence, used for romanization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
}

impl Candidate {
    pub fn new(surface: impl Into<String>, count: usize) -> Self {
        Self { surface: surface.into(), count, reading: None }
    }
}

/// True for characters in the CJK Unified Ideographs block U+4E00..=U+9FAF.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FAF}').contains(&c)
}

/// True when a surface form is longer than one character and contains a kanji.
pub fn qualifies(surface: &str) -> bool {
    surface.chars().nth(1).is_some() && surface.chars().any(is_kanji)
}

/// Counts qualifying surface forms and returns the most frequent ones.
///
/// Identity is the exact surface string. The sort is stable, so equal
/// counts keep first-seen order. At most `pool_size` candidates are
/// returned.
///
/// # Example
///
/// ```rust
/// use kotoba_core::{Token, rank_tokens};
///
/// let tokens: Vec<Token> = ["日本語", "日本語", "天気", "は", "天気", "猫"].into_iter().map(Token::new).collect();
/// let ranked = rank_tokens(&tokens, 50);
///
/// let pairs: Vec<(&str, usize)> = ranked.iter().map(|c| (c.surface.as_str(), c.count)).collect();
/// assert_eq!(pairs, [("日本語", 2), ("天気", 2)]);
/// ```
pub fn rank_tokens(tokens: &[Token], pool_size: usize) -> Vec<Candidate> {
    let mut counts: IndexMap<&str, Candidate> = IndexMap::new();

    for token in tokens.iter().filter(|t| qualifies(&t.surface)) {
        counts
            .entry(token.surface.as_str())
            .and_modify(|candidate| {
                candidate.count += 1;
                if candidate.reading.is_none() {
                    candidate.reading.clone_from(&token.reading);
                }
            })
            .or_insert_with(|| Candidate { surface: token.surface.clone(), count: 1, reading: token.reading.clone() });
    }

    let mut ranked: Vec<Candidate> = counts.into_values().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(pool_size);

    tracing::debug!(tokens = tokens.len(), candidates = ranked.len(), "ranked tokens");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens(surfaces: &[&str]) -> Vec<Token> {
        surfaces.iter().copied().map(Token::new).collect()
    }

    fn pairs(ranked: &[Candidate]) -> Vec<(&str, usize)> {
        ranked.iter().map(|c| (c.surface.as_str(), c.count)).collect()
    }

    #[rstest]
    #[case("日本語", true)]
    #[case("天気", true)]
    #[case("猫", false)]
    #[case("は", false)]
    #[case("ひらがな", false)]
    #[case("カタカナ", false)]
    #[case("食べる", true)]
    #[case("人々", true)]
    #[case("AB", false)]
    fn test_qualifies(#[case] surface: &str, #[case] expected: bool) {
        assert_eq!(qualifies(surface), expected);
    }

    #[test]
    fn test_kanji_block_bounds() {
        assert!(is_kanji('\u{4E00}'));
        assert!(is_kanji('\u{9FAF}'));
        assert!(!is_kanji('\u{9FB0}'));
        assert!(!is_kanji('\u{3005}'));
        assert!(!is_kanji('ア'));
    }

    #[test]
    fn test_rank_example() {
        let ranked = rank_tokens(&tokens(&["日本語", "日本語", "天気", "は", "天気", "猫"]), DEFAULT_POOL_SIZE);
        assert_eq!(pairs(&ranked), [("日本語", 2), ("天気", 2)]);
    }

    #[test]
    fn test_rank_orders_by_count_then_first_seen() {
        let ranked = rank_tokens(
            &tokens(&["電車", "時間", "電車", "会社", "時間", "時間", "会社", "学校"]),
            DEFAULT_POOL_SIZE,
        );
        assert_eq!(pairs(&ranked), [("時間", 3), ("電車", 2), ("会社", 2), ("学校", 1)]);
    }

    #[test]
    fn test_rank_is_exact_string_identity() {
        let ranked = rank_tokens(&tokens(&["食べる", "食べた", "食べる"]), DEFAULT_POOL_SIZE);
        assert_eq!(pairs(&ranked), [("食べる", 2), ("食べた", 1)]);
    }

    #[test]
    fn test_rank_caps_pool() {
        let surfaces: Vec<String> = (0..80u32).map(|i| format!("漢字{}", i)).collect();
        let refs: Vec<&str> = surfaces.iter().map(String::as_str).collect();
        let ranked = rank_tokens(&tokens(&refs), DEFAULT_POOL_SIZE);

        assert_eq!(ranked.len(), DEFAULT_POOL_SIZE);
        assert_eq!(ranked[0].surface, "漢字0");
        assert_eq!(ranked[49].surface, "漢字49");
    }

    #[test]
    fn test_rank_keeps_first_reading() {
        let input = vec![Token::new("今日"), Token::with_reading("今日", "キョウ"), Token::with_reading("今日", "コンニチ")];
        let ranked = rank_tokens(&input, DEFAULT_POOL_SIZE);
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[0].reading.as_deref(), Some("キョウ"));
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_tokens(&[], DEFAULT_POOL_SIZE).is_empty());
        assert!(rank_tokens(&tokens(&["の", "は", "カタカナ"]), DEFAULT_POOL_SIZE).is_empty());
    }
}
