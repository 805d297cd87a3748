use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use kotoba_core::{
    AnalyzeConfig, DictionaryConfig, FetchConfig, HttpPageSource, JishoDictionary, LinderaTokenizer, PreprocessConfig,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod routes;

use routes::AppState;

/// Web front end for kanji word-frequency study lists
#[derive(Parser, Debug)]
#[command(name = "kotoba-server", version)]
struct Config {
    /// Address to listen on
    #[arg(long, env = "KOTOBA_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Dictionary search endpoint
    #[arg(long, env = "KOTOBA_DICTIONARY_URL", default_value = "https://jisho.org/api/v1/search/words")]
    dictionary_url: String,

    /// Timeout in seconds for page fetches and dictionary lookups
    #[arg(long, env = "KOTOBA_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Number of defined words a run collects
    #[arg(long, env = "KOTOBA_TARGET", default_value = "20")]
    target: usize,

    /// Maximum ranked candidates looked up per run
    #[arg(long, env = "KOTOBA_POOL", default_value = "50")]
    pool: usize,

    /// Dictionary lookups in flight at once
    #[arg(long, env = "KOTOBA_CONCURRENCY", default_value = "1")]
    concurrency: usize,

    /// Drop elements styled display:none or visibility:hidden from fetched pages
    #[arg(long, env = "KOTOBA_REMOVE_HIDDEN")]
    remove_hidden: bool,

    /// Upper bound in seconds for a single API request
    #[arg(long, env = "KOTOBA_REQUEST_TIMEOUT", default_value = "300")]
    request_timeout: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kotoba_server=info,kotoba_core=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads the IPADIC tokenizer off the async runtime and marks the analyzer ready.
fn load_tokenizer(state: Arc<AppState>) {
    tokio::task::spawn_blocking(move || match LinderaTokenizer::new() {
        Ok(tokenizer) => {
            state.set_tokenizer(Arc::new(tokenizer));
            info!("tokenizer ready");
        }
        Err(err) => error!(%err, "failed to load tokenizer; analysis stays unavailable"),
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing();

    let fetch = FetchConfig { timeout: config.timeout, ..Default::default() };
    let dictionary = JishoDictionary::new(DictionaryConfig {
        api_url: config.dictionary_url.clone(),
        timeout: config.timeout,
        user_agent: fetch.user_agent.clone(),
    })
    .context("Failed to build dictionary client")?;

    let analyze = AnalyzeConfig::builder()
        .target_count(config.target)
        .pool_size(config.pool)
        .lookup_concurrency(config.concurrency)
        .build();

    let preprocess = PreprocessConfig { remove_hidden: config.remove_hidden, ..Default::default() };
    let source = HttpPageSource::new(fetch).with_preprocess(preprocess);

    let state = Arc::new(AppState::new(
        Arc::new(source),
        Arc::new(dictionary),
        analyze,
    ));
    load_tokenizer(state.clone());

    info!(
        addr = %config.addr,
        dictionary = %config.dictionary_url,
        target = config.target,
        pool = config.pool,
        concurrency = config.concurrency,
        remove_hidden = config.remove_hidden,
        "starting kotoba server"
    );

    routes::serve(config.addr, state, Duration::from_secs(config.request_timeout))
        .await
        .context("Server error")
}
