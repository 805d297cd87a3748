//! HTTP surface: the single-page app plus a small JSON API over one
//! shared [`Session`].

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use kotoba_core::{
    AnalysisRun, AnalyzeConfig, Analyzer, CSV_FILENAME, Dictionary, FETCH_FAILED, Lookup, PageSource, RunError,
    Session, Tokenizer, to_csv, words_to_text,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Mutex;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");

type SharedState = Arc<AppState>;

/// Everything a request needs: the pipeline collaborators and the current run.
pub struct AppState {
    source: Arc<dyn PageSource>,
    dictionary: Arc<dyn Dictionary>,
    config: AnalyzeConfig,
    tokenizer: OnceLock<Arc<dyn Tokenizer>>,
    session: Mutex<Session>,
}

impl AppState {
    pub fn new(source: Arc<dyn PageSource>, dictionary: Arc<dyn Dictionary>, config: AnalyzeConfig) -> Self {
        Self { source, dictionary, config, tokenizer: OnceLock::new(), session: Mutex::new(Session::new()) }
    }

    /// Installs the tokenizer once it has loaded. Later calls are ignored.
    pub fn set_tokenizer(&self, tokenizer: Arc<dyn Tokenizer>) -> bool {
        self.tokenizer.set(tokenizer).is_ok()
    }

    fn analyzer(&self) -> Analyzer {
        let analyzer = Analyzer::new(self.source.clone(), self.dictionary.clone(), self.config.clone());
        match self.tokenizer.get() {
            Some(tokenizer) => analyzer.with_tokenizer(tokenizer.clone()),
            None => analyzer,
        }
    }
}

pub async fn serve(addr: SocketAddr, state: SharedState, request_timeout: Duration) -> anyhow::Result<()> {
    let router = build_router(state, request_timeout);
    info!(%addr, "binding HTTP listener");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server exited");
    Ok(())
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    fn conflict(message: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, message: message.into() }
    }

    fn bad_gateway(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_GATEWAY, message: message.into() }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }
}

impl From<RunError> for ApiError {
    fn from(error: RunError) -> Self {
        match error {
            RunError::Validation(message) => Self::bad_request(message),
            RunError::NoResults => Self::internal(RunError::NoResults.to_string()),
            RunError::Transport(message) => Self::bad_gateway(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

fn build_router(state: SharedState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health))
        .route("/api/status", get(status))
        .route("/api/extract", post(extract))
        .route("/api/dictionary", post(dictionary))
        .route("/api/analyze", post(analyze))
        .route("/api/run", get(current_run))
        .route("/api/export.csv", get(export_csv))
        .route("/api/export.txt", get(export_text))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[derive(Debug, Deserialize)]
struct UrlRequest {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct WordRequest {
    #[serde(default)]
    word: String,
}

#[derive(Debug, Serialize)]
struct ExtractPayload {
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPayload {
    ready: bool,
    tokenizer: Option<&'static str>,
    dictionary: &'static str,
    target_count: usize,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn status(State(state): State<SharedState>) -> Json<StatusPayload> {
    Json(StatusPayload {
        ready: state.tokenizer.get().is_some(),
        tokenizer: state.tokenizer.get().map(|tokenizer| tokenizer.name()),
        dictionary: state.dictionary.name(),
        target_count: state.config.target_count,
    })
}

async fn extract(State(state): State<SharedState>, Json(request): Json<UrlRequest>) -> Result<Json<ExtractPayload>, ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::bad_request("Please enter a URL"));
    }

    match state.source.page_text(url).await {
        Ok(page) => Ok(Json(ExtractPayload { content: page.content, title: page.title })),
        Err(err) => {
            warn!(url, %err, "extraction failed");
            Err(ApiError::bad_gateway(FETCH_FAILED))
        }
    }
}

async fn dictionary(State(state): State<SharedState>, Json(request): Json<WordRequest>) -> Result<Json<Lookup>, ApiError> {
    let word = request.word.trim();
    if word.is_empty() {
        return Err(ApiError::bad_request("Please enter a word"));
    }

    Ok(Json(state.dictionary.lookup(word).await))
}

/// Runs one analysis to completion and returns the finished run.
///
/// The pipeline runs on its own task so that a dropped request still
/// finishes the run instead of leaving the session stuck in `Loading`.
async fn analyze(State(state): State<SharedState>, Json(request): Json<UrlRequest>) -> Result<Json<AnalysisRun>, ApiError> {
    let analyzer = state.analyzer();

    let ticket = {
        let mut session = state.session.lock().await;
        if session.current().is_loading() {
            return Err(ApiError::conflict("An analysis is already in progress"));
        }
        session.submit(&request.url, analyzer.is_ready())?
    };
    info!(run = %ticket.id(), url = ticket.url(), "analysis started");

    let task_state = state.clone();
    let task_ticket = ticket.clone();
    let joined = tokio::spawn(async move {
        let outcome = analyzer.analyze(task_ticket.url()).await;
        let mut session = task_state.session.lock().await;
        session.finish(&task_ticket, outcome);
        session.current().clone()
    })
    .await;

    let run = match joined {
        Ok(run) => run,
        Err(err) => {
            // The task died before finishing its ticket, so close the run here.
            error!(run = %ticket.id(), %err, "analysis task failed");
            let mut session = state.session.lock().await;
            session.finish(&ticket, Err(RunError::Transport(FETCH_FAILED.to_string())));
            session.current().clone()
        }
    };

    info!(run = %run.id, status = ?run.status, words = run.words.len(), "analysis finished");
    Ok(Json(run))
}

async fn current_run(State(state): State<SharedState>) -> Json<AnalysisRun> {
    Json(state.session.lock().await.current().clone())
}

async fn export_csv(State(state): State<SharedState>) -> impl IntoResponse {
    let csv = to_csv(&state.session.lock().await.current().words);
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", CSV_FILENAME)),
    ];
    (headers, csv)
}

async fn export_text(State(state): State<SharedState>) -> impl IntoResponse {
    let text = words_to_text(&state.session.lock().await.current().words);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text)
}
