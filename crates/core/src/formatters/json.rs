use crate::session::AnalysisRun;
use crate::word::AnnotatedWord;
use crate::{KotobaError, Result};
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.map_err(|e| KotobaError::Export(e.to_string()))
}

/// Convert a word list to a JSON array
pub fn words_to_json(words: &[AnnotatedWord], pretty: bool) -> Result<String> {
    to_json(words, pretty)
}

/// Convert a whole run (status, error tag, and words) to JSON
pub fn run_to_json(run: &AnalysisRun, pretty: bool) -> Result<String> {
    to_json(run, pretty)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn words(&self, words: &[AnnotatedWord]) -> Result<String> {
        words_to_json(words, self.config.pretty)
    }

    pub fn run(&self, run: &AnalysisRun) -> Result<String> {
        run_to_json(run, self.config.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn word() -> AnnotatedWord {
        AnnotatedWord {
            surface: "天気".to_string(),
            count: 2,
            reading: "てんき".to_string(),
            extra_reading_count: 0,
            definition: "weather".to_string(),
            part_of_speech: "noun".to_string(),
        }
    }

    #[test]
    fn test_words_to_json() {
        let json = words_to_json(&[word()], false).unwrap();
        assert_eq!(
            json,
            r#"[{"surface":"天気","count":2,"reading":"てんき","extraReadingCount":0,"definition":"weather","partOfSpeech":"noun"}]"#
        );
    }

    #[test]
    fn test_pretty_output() {
        let json = words_to_json(&[word()], true).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  \"surface\": \"天気\""));
    }

    #[test]
    fn test_run_to_json() {
        let mut session = Session::new();
        let ticket = session.submit("https://example.jp", true).unwrap();
        session.finish(&ticket, Ok(vec![word()]));

        let formatter = JsonFormatter::new(JsonConfig { pretty: false });
        let value: serde_json::Value = serde_json::from_str(&formatter.run(session.current()).unwrap()).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["url"], "https://example.jp");
        assert_eq!(value["words"][0]["surface"], "天気");
        assert!(value["error"].is_null());
    }
}
