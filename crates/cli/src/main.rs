use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use kotoba_core::{
    AnalyzeConfig, Analyzer, AnnotatedWord, DictionaryConfig, FetchConfig, HttpPageSource, JishoDictionary,
    LinderaTokenizer, PageSource, PreprocessConfig, RunError, ScriptTokenizer, Tokenizer, extract_text_with_config,
    fetch_file, fetch_stdin, to_csv, words_to_json, words_to_text,
};
use owo_colors::OwoColorize;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the word list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Cards,
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cards" => Ok(Self::Cards),
            "text" | "txt" => Ok(Self::Text),
            "csv" | "anki" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: cards, text, csv, json", s)),
        }
    }
}

/// Morphological analyzer used to split page text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenizerKind {
    Lindera,
    Script,
}

impl FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lindera" | "ipadic" => Ok(Self::Lindera),
            "script" => Ok(Self::Script),
            _ => Err(format!("Invalid tokenizer: {}. Valid options: lindera, script", s)),
        }
    }
}

/// Build a kanji word-frequency study list from a Japanese web page
#[derive(Parser, Debug)]
#[command(name = "kotoba")]
#[command(author = "Kotoba Contributors")]
#[command(version)]
#[command(about = "Kanji word frequency lists from Japanese pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (cards, text, csv, json)
    #[arg(short, long, default_value = "cards", value_name = "FORMAT")]
    format: OutputFormat,

    /// Number of defined words to collect
    #[arg(long, default_value = "20", value_name = "NUM")]
    target: usize,

    /// Maximum ranked candidates to look up
    #[arg(long, default_value = "50", value_name = "NUM")]
    pool: usize,

    /// Dictionary lookups in flight at once
    #[arg(long, default_value = "1", value_name = "NUM")]
    concurrency: usize,

    /// Tokenizer (lindera, script)
    #[arg(long, default_value = "lindera", value_name = "NAME")]
    tokenizer: TokenizerKind,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Dictionary search endpoint
    #[arg(long, value_name = "URL")]
    dictionary_url: Option<String>,

    /// Drop elements styled display:none or visibility:hidden before counting
    #[arg(long)]
    remove_hidden: bool,

    /// Print the ranked candidate pool without dictionary lookups
    #[arg(long)]
    candidates: bool,

    /// Copy the word list to the system clipboard
    #[arg(long)]
    copy: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn build_tokenizer(kind: TokenizerKind) -> anyhow::Result<Arc<dyn Tokenizer>> {
    Ok(match kind {
        TokenizerKind::Lindera => Arc::new(LinderaTokenizer::new().context("Failed to load tokenizer")?),
        TokenizerKind::Script => Arc::new(ScriptTokenizer),
    })
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kotoba_core=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn render(words: &[AnnotatedWord], format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Cards => echo::render_cards(words),
        OutputFormat::Text => format!("{}\n", words_to_text(words)),
        OutputFormat::Csv => to_csv(words),
        OutputFormat::Json => format!("{}\n", words_to_json(words, true).context("Failed to convert to JSON")?),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "kotoba", &mut io::stdout());
        return Ok(());
    }

    let input = args.input.clone().context("INPUT is required")?;
    let total = if args.candidates { 3 } else { 4 };
    let started = Instant::now();
    let mut timings: Vec<(&str, Duration)> = Vec::new();

    if args.verbose {
        init_tracing();
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let fetch_config = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
    };
    let preprocess = PreprocessConfig { remove_hidden: args.remove_hidden, ..Default::default() };
    let source = HttpPageSource::new(fetch_config.clone()).with_preprocess(preprocess.clone());

    let step = Instant::now();
    let page = if is_url(&input) {
        if args.verbose {
            echo::print_step(1, total, &format!("Fetching from {}", input.bright_white().underline()));
        }
        source.page_text(&input).await.context("Failed to fetch page content")?
    } else {
        let html = if input == "-" {
            if args.verbose {
                echo::print_step(1, total, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        } else {
            if args.verbose {
                echo::print_step(1, total, &format!("Reading from file {}", input.bright_white()));
            }
            fetch_file(&input).with_context(|| format!("Failed to read file: {}", input))?
        };

        if args.verbose {
            echo::print_detail("Size", &echo::format_size(html.len()));
        }
        extract_text_with_config(&html, &preprocess).context("Failed to extract page text")?
    };
    timings.push(("Extract", step.elapsed()));

    if args.verbose {
        if let Some(title) = &page.title {
            echo::print_detail("Title", title);
        }
        echo::print_detail("Characters", &page.content.chars().count().to_string());
        eprintln!();
    }

    let dictionary_config = DictionaryConfig {
        api_url: args.dictionary_url.clone().unwrap_or_else(|| DictionaryConfig::default().api_url),
        timeout: args.timeout,
        user_agent: fetch_config.user_agent.clone(),
    };
    let config = AnalyzeConfig::builder()
        .target_count(args.target)
        .pool_size(args.pool)
        .lookup_concurrency(args.concurrency)
        .build();
    tracing::debug!(?config, tokenizer = ?args.tokenizer, "analysis configured");

    if args.verbose {
        echo::print_step(2, total, "Tokenizing and ranking kanji words");
    }

    let step = Instant::now();
    let dictionary = JishoDictionary::new(dictionary_config).context("Failed to build dictionary client")?;
    let analyzer =
        Analyzer::new(Arc::new(source), Arc::new(dictionary), config).with_tokenizer(build_tokenizer(args.tokenizer)?);
    let candidates = analyzer.candidates(&page.content).context("Failed to tokenize page text")?;
    timings.push(("Rank", step.elapsed()));

    if candidates.is_empty() {
        echo::print_warning("No kanji words found in page text");
    }

    if args.verbose {
        echo::print_detail("Candidates", &candidates.len().to_string());
        eprintln!();
    }

    let output = if args.candidates {
        echo::render_candidates(&candidates)
    } else {
        if args.verbose {
            echo::print_step(3, total, &format!("Looking up {} candidates", candidates.len()));
        }

        let step = Instant::now();
        let words = analyzer.annotate(candidates).await;
        timings.push(("Lookup", step.elapsed()));

        if words.is_empty() {
            anyhow::bail!(RunError::NoResults);
        }

        if args.verbose {
            echo::print_detail("Words", &words.len().to_string());
            eprintln!();
        }

        if args.copy {
            let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
            clipboard.set_text(words_to_text(&words)).context("Failed to copy to clipboard")?;
            echo::print_success(&format!("Copied {} words to clipboard", words.len()));
        }

        render(&words, args.format)?
    };

    if args.verbose {
        echo::print_step(total, total, "Writing output");
        echo::print_detail("Format", &format!("{:?}", args.format));
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    if args.verbose {
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}
