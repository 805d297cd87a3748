//! Tokenizer adapters.
//!
//! The [`Tokenizer`] trait turns raw text into surface-form [`Token`]s.
//! [`LinderaTokenizer`] wraps the Lindera morphological analyzer with its
//! embedded IPADIC dictionary; [`ScriptTokenizer`] is a dependency-free
//! fallback that splits on changes of writing system.

use serde::Serialize;

use crate::Result;

/// One token as it appears in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Literal text of the token.
    pub surface: String,
    /// Kana reading reported by the analyzer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
}

impl Token {
    pub fn new(surface: impl Into<String>) -> Self {
        Self { surface: surface.into(), reading: None }
    }

    pub fn with_reading(surface: impl Into<String>, reading: impl Into<String>) -> Self {
        Self { surface: surface.into(), reading: Some(reading.into()) }
    }
}

/// Splits text into surface-form tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenizes `text` in source order.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

#[cfg(feature = "lindera")]
pub use self::lindera_adapter::LinderaTokenizer;

#[cfg(feature = "lindera")]
mod lindera_adapter {
    use lindera::dictionary::load_dictionary;
    use lindera::mode::Mode;
    use lindera::segmenter::Segmenter;
    use lindera::tokenizer::Tokenizer as Lindera;

    use super::{Token, Tokenizer};
    use crate::{KotobaError, Result};

    /// IPADIC puts the katakana reading at detail index 7.
    const READING_DETAIL: usize = 7;

    /// Japanese morphological analyzer backed by Lindera and IPADIC.
    pub struct LinderaTokenizer {
        inner: Lindera,
    }

    impl LinderaTokenizer {
        /// Loads the embedded IPADIC dictionary in normal segmentation mode.
        pub fn new() -> Result<Self> {
            let dictionary = load_dictionary("embedded://ipadic")
                .map_err(|e| KotobaError::Tokenizer(format!("Failed to load dictionary: {}", e)))?;
            let segmenter = Segmenter::new(Mode::Normal, dictionary, None);

            Ok(Self { inner: Lindera::new(segmenter) })
        }
    }

    impl Tokenizer for LinderaTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }

            let mut tokens = self
                .inner
                .tokenize(text)
                .map_err(|e| KotobaError::Tokenizer(format!("Failed to segment text: {}", e)))?;

            let mut result = Vec::with_capacity(tokens.len());
            for token in tokens.iter_mut() {
                let surface = token.surface.to_string();
                if surface.trim().is_empty() {
                    continue;
                }

                let details = token.details();
                let reading = details
                    .get(READING_DETAIL)
                    .filter(|reading| !reading.is_empty() && **reading != "*")
                    .map(|reading| reading.to_string());

                result.push(Token { surface, reading });
            }

            Ok(result)
        }

        fn name(&self) -> &'static str {
            "lindera"
        }
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Latin,
    Other,
}

fn script_of(c: char) -> Option<Script> {
    match c {
        '\u{3005}' | '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' => Some(Script::Kanji),
        '\u{3041}'..='\u{309F}' => Some(Script::Hiragana),
        '\u{30A0}'..='\u{30FF}' | '\u{FF66}'..='\u{FF9F}' => Some(Script::Katakana),
        c if c.is_ascii_alphanumeric() => Some(Script::Latin),
        '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => Some(Script::Latin),
        c if c.is_alphanumeric() => Some(Script::Other),
        _ => None,
    }
}

/// Splits text into maximal runs of a single writing system.
///
/// Kanji runs (including `々`), hiragana runs, katakana runs (including `ー`)
/// and Latin/digit runs each become one token. Whitespace and punctuation
/// separate tokens and are dropped. This is far coarser than a
/// morphological analyzer but needs no dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTokenizer;

impl Tokenizer for ScriptTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_script = None;

        for c in text.chars() {
            let script = script_of(c);
            if script != current_script && !current.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut current)));
            }
            if script.is_some() {
                current.push(c);
            }
            current_script = script;
        }

        if !current.is_empty() {
            tokens.push(Token::new(current));
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "script"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn surfaces(text: &str) -> Vec<String> {
        ScriptTokenizer.tokenize(text).unwrap().into_iter().map(|t| t.surface).collect()
    }

    #[rstest]
    #[case("日本語は難しい", &["日本語", "は", "難", "しい"])]
    #[case("コーヒーを飲む", &["コーヒー", "を", "飲", "む"])]
    #[case("人々が Rust2024 を使う。", &["人々", "が", "Rust2024", "を", "使", "う"])]
    #[case("東京、大阪", &["東京", "大阪"])]
    #[case("", &[])]
    fn test_script_runs(#[case] text: &str, #[case] expected: &[&str]) {
        assert_eq!(surfaces(text), expected);
    }

    #[test]
    fn test_script_tokens_have_no_reading() {
        let tokens = ScriptTokenizer.tokenize("天気").unwrap();
        assert_eq!(tokens, vec![Token::new("天気")]);
    }

    #[test]
    fn test_token_constructors() {
        let token = Token::with_reading("天気", "テンキ");
        assert_eq!(token.surface, "天気");
        assert_eq!(token.reading.as_deref(), Some("テンキ"));
    }
}
