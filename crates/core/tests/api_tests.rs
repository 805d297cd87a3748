//! Library API integration tests
use std::sync::Arc;

use async_trait::async_trait;
use kotoba_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

/// Serves fixture files, keyed by URL path.
struct FixtureSource;

#[async_trait]
impl PageSource for FixtureSource {
    async fn page_text(&self, url: &str) -> Result<PageText> {
        let name = url.rsplit('/').next().unwrap_or_default();
        let html = fetch_file(&get_fixture_path(name))?;
        extract_text(&html)
    }
}

fn defined(definition: &str, reading: &str) -> Lookup {
    Lookup {
        definition: definition.to_string(),
        reading: Some(reading.to_string()),
        extra_readings: 0,
        part_of_speech: "noun".to_string(),
    }
}

fn analyzer(dictionary: MemoryDictionary, target: usize) -> Analyzer {
    Analyzer::new(
        Arc::new(FixtureSource),
        Arc::new(dictionary),
        AnalyzeConfig::builder().target_count(target).build(),
    )
    .with_tokenizer(Arc::new(ScriptTokenizer))
}

#[test]
fn test_extract_text_api() {
    let page = extract_text(&read_fixture("japanese_article.html")).expect("should extract");

    assert_eq!(page.title.as_deref(), Some("東京の天気"));
    assert!(page.content.contains("今日の東京は晴れです。"));
    assert!(!page.content.contains("削除"));
    assert!(!page.content.contains("広告"));
    assert!(!page.content.contains("無効"));
}

#[test]
fn test_extract_empty_page() {
    let result = extract_text(&read_fixture("empty_content.html"));
    assert!(matches!(result, Err(KotobaError::NoContent)));
}

#[test]
fn test_rank_fixture_words() {
    let page = extract_text(&read_fixture("japanese_article.html")).unwrap();
    let tokens = ScriptTokenizer.tokenize(&page.content).unwrap();
    let ranked = rank_tokens(&tokens, DEFAULT_POOL_SIZE);

    let top: Vec<(&str, usize)> = ranked.iter().take(3).map(|c| (c.surface.as_str(), c.count)).collect();
    assert_eq!(top, [("東京", 3), ("天気", 2), ("電車", 2)]);
    assert!(ranked.iter().all(|c| c.surface.chars().count() > 1));
}

#[test]
fn test_inline_markup_counts_whole_words() {
    let page = extract_text(r##"<p><b>天</b>気と<a href="#">天</a>気</p>"##).unwrap();
    let tokens = ScriptTokenizer.tokenize(&page.content).unwrap();
    let ranked = rank_tokens(&tokens, DEFAULT_POOL_SIZE);

    let top: Vec<(&str, usize)> = ranked.iter().map(|c| (c.surface.as_str(), c.count)).collect();
    assert_eq!(top, [("天気", 2)]);
}

#[test]
fn test_english_page_has_no_candidates() {
    let page = extract_text(&read_fixture("english_only.html")).unwrap();
    let tokens = ScriptTokenizer.tokenize(&page.content).unwrap();
    assert!(rank_tokens(&tokens, DEFAULT_POOL_SIZE).is_empty());
}

#[test]
fn test_normalize_recorded_response() {
    let response: JishoResponse = serde_json::from_str(&read_fixture("jisho_tenki.json")).unwrap();
    let lookup = normalize_response(&response);

    assert_eq!(lookup.definition, "weather; the elements");
    assert_eq!(lookup.reading.as_deref(), Some("てんき"));
    assert_eq!(lookup.extra_readings, 1);
    assert_eq!(lookup.part_of_speech, "noun");
}

#[tokio::test]
async fn test_analyze_fixture_page() {
    let mut dictionary = MemoryDictionary::new();
    dictionary
        .insert("東京", defined("Tokyo", "とうきょう"))
        .insert("電車", defined("train", "でんしゃ"))
        .insert("天気", Lookup::failed());

    let words = analyzer(dictionary, 20).analyze("https://example.jp/japanese_article.html").await.unwrap();

    let surfaces: Vec<&str> = words.iter().map(|w| w.surface.as_str()).collect();
    assert_eq!(surfaces, ["東京", "電車"]);
    assert_eq!(words[0].reading, "とうきょう");
    assert_eq!(words[0].count, 3);
}

#[tokio::test]
async fn test_analyze_stops_at_target() {
    let dictionary: MemoryDictionary = ["東京", "天気", "電車", "今日"]
        .into_iter()
        .map(|word| (word.to_string(), defined("meaning", "よみ")))
        .collect();

    let words = analyzer(dictionary, 2).analyze("https://example.jp/japanese_article.html").await.unwrap();

    let surfaces: Vec<&str> = words.iter().map(|w| w.surface.as_str()).collect();
    assert_eq!(surfaces, ["東京", "天気"]);
}

#[tokio::test]
async fn test_analyze_outcomes() {
    let words = analyzer(MemoryDictionary::new(), 20)
        .analyze("https://example.jp/japanese_article.html")
        .await;
    assert_eq!(words, Err(RunError::NoResults));

    let empty = analyzer(MemoryDictionary::new(), 20)
        .analyze("https://example.jp/empty_content.html")
        .await;
    assert_eq!(empty, Err(RunError::Transport(FETCH_FAILED.to_string())));

    let missing = analyzer(MemoryDictionary::new(), 20)
        .analyze("https://example.jp/missing.html")
        .await;
    assert_eq!(missing, Err(RunError::Transport(FETCH_FAILED.to_string())));
}

#[tokio::test]
async fn test_session_run_exports() {
    let mut dictionary = MemoryDictionary::new();
    dictionary.insert("東京", defined("Tokyo; capital of Japan", "とうきょう"));
    let analyzer = analyzer(dictionary, 20);

    let mut session = Session::new();
    let ticket = session.submit("https://example.jp/japanese_article.html", analyzer.is_ready()).unwrap();
    let outcome = analyzer.analyze(ticket.url()).await;
    assert!(session.finish(&ticket, outcome));

    let run = session.current();
    assert_eq!(run.status, RunStatus::Success);

    let csv = to_csv(&run.words);
    assert_eq!(
        csv,
        "Front;Back;Part of Speech;Definition\n東京;とうきょう;noun;\"Tokyo; capital of Japan\"\n"
    );
    let rows = parse_csv(&csv).unwrap();
    assert_eq!(rows[0].definition, "Tokyo; capital of Japan");

    assert_eq!(words_to_text(&run.words), "東京 (とうきょう)\nnoun\nTokyo; capital of Japan");

    let json: serde_json::Value = serde_json::from_str(&run_to_json(run, false).unwrap()).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["words"][0]["partOfSpeech"], "noun");
}

#[cfg(feature = "lindera")]
#[test]
fn test_lindera_ranks_fixture() {
    let page = extract_text(&read_fixture("japanese_article.html")).unwrap();
    let tokenizer = LinderaTokenizer::new().unwrap();
    let ranked = rank_tokens(&tokenizer.tokenize(&page.content).unwrap(), DEFAULT_POOL_SIZE);

    assert_eq!(ranked[0].surface, "東京");
    assert_eq!(ranked[0].reading.as_deref(), Some("トウキョウ"));
}
