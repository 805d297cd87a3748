pub mod analyze;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod parse;
pub mod preprocess;
pub mod rank;
pub mod romaji;
pub mod session;
pub mod tokenize;
pub mod word;

pub use analyze::{AnalyzeConfig, AnalyzeConfigBuilder, Analyzer, DEFAULT_TARGET_COUNT, FETCH_FAILED, RunError};
#[cfg(feature = "fetch")]
pub use dictionary::JishoDictionary;
pub use dictionary::{Dictionary, DictionaryConfig, LOOKUP_ERROR, Lookup, MemoryDictionary, NO_DEFINITION};
#[doc(hidden)]
pub use dictionary::{JishoEntry, JishoResponse, normalize_entry, normalize_response};
pub use dictionary::normalize_part_of_speech;
pub use error::{KotobaError, Result};
#[cfg(feature = "fetch")]
pub use extract::{HttpPageSource, fetch_page_text, fetch_page_text_with_config};
pub use extract::{PageSource, PageText, extract_text, extract_text_with_config};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin, validate_url};
pub use formatters::{CSV_FILENAME, CSV_HEADER, CsvRow, parse_csv, to_csv};
pub use formatters::{JsonConfig, JsonFormatter, run_to_json, words_to_json};
pub use formatters::{word_to_text, words_to_text};
pub use parse::Document;
pub use preprocess::PreprocessConfig;
pub use preprocess::preprocess_html;
pub use rank::{Candidate, DEFAULT_POOL_SIZE, rank_tokens};
pub use romaji::romanize;
pub use session::{AnalysisRun, RunStatus, RunTicket, Session};
#[cfg(feature = "lindera")]
pub use tokenize::LinderaTokenizer;
pub use tokenize::{ScriptTokenizer, Token, Tokenizer};
pub use word::AnnotatedWord;
