//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("kotoba")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

/// Nothing listens on the discard port, so every lookup fails fast.
const DEAD_DICTIONARY: &str = "http://127.0.0.1:9/api/v1/search/words";

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: kotoba"))
        .stdout(predicate::str::contains("--candidates"));
}

#[test]
fn test_cli_candidates_script_tokenizer() {
    cmd()
        .args(["--candidates", "--tokenizer", "script", &get_fixture_path("japanese_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. 東京\t3\t-"))
        .stdout(predicate::str::contains("  2. 天気\t2\t-"))
        .stdout(predicate::str::contains("削除").not());
}

#[test]
fn test_cli_candidates_lindera() {
    cmd()
        .args(["--candidates", &get_fixture_path("japanese_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("東京\t3\tトウキョウ"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("japanese_article.html")).unwrap();
    cmd()
        .args(["--candidates", "--tokenizer", "script", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("東京"));
}

#[test]
fn test_cli_hidden_text_counts_by_default() {
    cmd()
        .args(["--candidates", "--tokenizer", "script", &get_fixture_path("hidden_content.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. 地震\t3\t-"))
        .stdout(predicate::str::contains("広告"));
}

#[test]
fn test_cli_remove_hidden() {
    cmd()
        .args(["--candidates", "--tokenizer", "script", "--remove-hidden", &get_fixture_path("hidden_content.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. 電車\t2\t-"))
        .stdout(predicate::str::contains("地震").not())
        .stdout(predicate::str::contains("広告").not());
}

#[test]
fn test_cli_candidates_pool() {
    cmd()
        .args(["--candidates", "--tokenizer", "script", "--pool", "2", &get_fixture_path("japanese_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("  2. 天気"))
        .stdout(predicate::str::contains("  3.").not());
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("candidates.txt");

    cmd()
        .args(["--candidates", "--tokenizer", "script", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("japanese_article.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("  1. 東京"));
}

#[test]
fn test_cli_english_page_warns() {
    cmd()
        .args(["--candidates", "--tokenizer", "script", &get_fixture_path("english_only.html")])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No kanji words found"));
}

#[test]
fn test_cli_no_definitions() {
    cmd()
        .args([
            "--tokenizer",
            "script",
            "--timeout",
            "2",
            "--dictionary-url",
            DEAD_DICTIONARY,
            &get_fixture_path("japanese_article.html"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No kanji words with dictionary definitions"));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .arg("/nonexistent/file.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_empty_content() {
    cmd()
        .args(["--candidates", &get_fixture_path("empty_content.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to extract page text"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "yaml", &get_fixture_path("japanese_article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_missing_input() {
    cmd().assert().failure().stderr(predicate::str::contains("INPUT"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kotoba"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "--candidates", "--tokenizer", "script", &get_fixture_path("japanese_article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Kotoba"))
        .stderr(predicate::str::contains("Timing Summary"));
}
