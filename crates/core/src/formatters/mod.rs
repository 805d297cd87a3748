pub mod csv;
pub mod json;
pub mod text;

pub use csv::{CSV_FILENAME, CSV_HEADER, CsvRow, parse_csv, to_csv};
pub use json::{JsonConfig, JsonFormatter, run_to_json, words_to_json};
pub use text::{word_to_text, words_to_text};
