use crate::word::AnnotatedWord;

/// Render one word the way it is copied to the clipboard
///
/// ```text
/// 天気 (てんき)
/// noun
/// weather
/// ```
pub fn word_to_text(word: &AnnotatedWord) -> String {
    format!("{} ({})\n{}\n{}", word.surface, word.reading, word.part_of_speech, word.definition)
}

/// Render a word list for the clipboard, entries separated by a blank line
pub fn words_to_text(words: &[AnnotatedWord]) -> String {
    words.iter().map(word_to_text).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(surface: &str, reading: &str, definition: &str) -> AnnotatedWord {
        AnnotatedWord {
            surface: surface.to_string(),
            count: 3,
            reading: reading.to_string(),
            extra_reading_count: 1,
            definition: definition.to_string(),
            part_of_speech: "noun".to_string(),
        }
    }

    #[test]
    fn test_single_word() {
        let text = word_to_text(&word("天気", "てんき", "weather"));
        assert_eq!(text, "天気 (てんき)\nnoun\nweather");
    }

    #[test]
    fn test_multiple_words_blank_line_between() {
        let text = words_to_text(&[word("天気", "てんき", "weather"), word("電車", "でんしゃ", "train")]);
        assert_eq!(text, "天気 (てんき)\nnoun\nweather\n\n電車 (でんしゃ)\nnoun\ntrain");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(words_to_text(&[]), "");
    }
}
