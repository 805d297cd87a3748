use crate::word::AnnotatedWord;
use crate::{KotobaError, Result};

/// Suggested filename for the flashcard export.
pub const CSV_FILENAME: &str = "anki_import.csv";

/// Header row of the flashcard export.
pub const CSV_HEADER: &str = "Front;Back;Part of Speech;Definition";

const DELIMITER: char = ';';

/// One data row of the flashcard export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub front: String,
    pub back: String,
    pub part_of_speech: String,
    pub definition: String,
}

impl From<&AnnotatedWord> for CsvRow {
    fn from(word: &AnnotatedWord) -> Self {
        Self {
            front: word.surface.clone(),
            back: word.reading.clone(),
            part_of_speech: word.part_of_speech.clone(),
            definition: word.definition.clone(),
        }
    }
}

/// Quote a field when it holds the delimiter, a quote, or a line break
fn escape_field(value: &str) -> String {
    if value.contains([DELIMITER, '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render words as a semicolon-delimited flashcard import
///
/// Rows are `surface;reading;part of speech;definition` in list order.
/// Definitions are joined with `"; "`, so they are quoted.
pub fn to_csv(words: &[AnnotatedWord]) -> String {
    let mut output = String::from(CSV_HEADER);
    output.push('\n');

    for word in words {
        let fields = [&word.surface, &word.reading, &word.part_of_speech, &word.definition];
        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        output.push_str(&row.join(";"));
        output.push('\n');
    }

    output
}

/// Split CSV text into records of raw fields
fn split_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            DELIMITER => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(KotobaError::Export("unterminated quoted field".to_string()));
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// Parse a flashcard export produced by [`to_csv`]
///
/// # Errors
///
/// Returns [`KotobaError::Export`] if the header is missing or a row does
/// not have exactly four fields.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRow>> {
    let mut records = split_records(text)?.into_iter();

    match records.next() {
        Some(header) if header.join(";") == CSV_HEADER => {}
        _ => return Err(KotobaError::Export(format!("expected header '{}'", CSV_HEADER))),
    }

    records
        .enumerate()
        .map(|(index, record)| match <[String; 4]>::try_from(record) {
            Ok([front, back, part_of_speech, definition]) => Ok(CsvRow { front, back, part_of_speech, definition }),
            Err(record) => Err(KotobaError::Export(format!(
                "row {} has {} fields, expected 4",
                index + 1,
                record.len()
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(surface: &str, reading: &str, pos: &str, definition: &str) -> AnnotatedWord {
        AnnotatedWord {
            surface: surface.to_string(),
            count: 1,
            reading: reading.to_string(),
            extra_reading_count: 0,
            definition: definition.to_string(),
            part_of_speech: pos.to_string(),
        }
    }

    #[test]
    fn test_header_only_for_empty_list() {
        assert_eq!(to_csv(&[]), "Front;Back;Part of Speech;Definition\n");
    }

    #[test]
    fn test_plain_rows() {
        let csv = to_csv(&[word("天気", "てんき", "noun", "weather")]);
        assert_eq!(csv, "Front;Back;Part of Speech;Definition\n天気;てんき;noun;weather\n");
    }

    #[test]
    fn test_definitions_with_semicolons_are_quoted() {
        let csv = to_csv(&[word("食べる", "たべる", "ichidan verb", "to eat; to live on")]);
        assert!(csv.contains("食べる;たべる;ichidan verb;\"to eat; to live on\"\n"));
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(escape_field(r#"the "real" thing"#), r#""the ""real"" thing""#);
        assert_eq!(escape_field("plain"), "plain");
    }

    #[test]
    fn test_round_trip_preserves_rendered_order() {
        let words = vec![
            word("日本語", "にほんご", "noun", "Japanese (language)"),
            word("食べる", "たべる", "ichidan verb", "to eat; to live on (e.g. a salary)"),
            word("引用", "いんよう", "noun", "quotation; \"citation\""),
            word("改行", "かいぎょう", "noun", "line\nbreak"),
        ];

        let rows = parse_csv(&to_csv(&words)).unwrap();
        let expected: Vec<CsvRow> = words.iter().map(CsvRow::from).collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_parse_accepts_crlf() {
        let rows = parse_csv("Front;Back;Part of Speech;Definition\r\n天気;てんき;noun;weather\r\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].definition, "weather");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_csv("a;b\n"), Err(KotobaError::Export(_))));
        assert!(matches!(
            parse_csv("Front;Back;Part of Speech;Definition\n天気;てんき\n"),
            Err(KotobaError::Export(_))
        ));
        assert!(matches!(
            parse_csv("Front;Back;Part of Speech;Definition\n天気;\"open"),
            Err(KotobaError::Export(_))
        ));
    }
}
