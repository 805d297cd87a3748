//! Run state held across the presentation boundary.
//!
//! A [`Session`] owns the current [`AnalysisRun`] and enforces the run
//! lifecycle `Idle → Loading → {Success, NoResults, Failed}`. A new run
//! replaces the previous one wholesale, and a finished analysis is only
//! applied if its run is still current.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::analyze::RunError;
use crate::word::AnnotatedWord;

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Idle,
    Loading,
    Success,
    NoResults,
    Failed,
}

/// One analysis run as presented to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub id: Uuid,
    pub url: String,
    pub status: RunStatus,
    pub error: Option<RunError>,
    pub words: Vec<AnnotatedWord>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub finished_at: Option<OffsetDateTime>,
}

impl AnalysisRun {
    fn idle() -> Self {
        Self {
            id: Uuid::new_v4(),
            url: String::new(),
            status: RunStatus::Idle,
            error: None,
            words: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    fn loading(url: &str) -> Self {
        Self {
            url: url.trim().to_string(),
            status: RunStatus::Loading,
            started_at: Some(OffsetDateTime::now_utc()),
            ..Self::idle()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == RunStatus::Loading
    }
}

/// Proof that a run was started; hand it back to [`Session::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    id: Uuid,
    url: String,
}

impl RunTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Holder of the current run.
#[derive(Debug, Clone)]
pub struct Session {
    current: AnalysisRun,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self { current: AnalysisRun::idle() }
    }

    /// The current run.
    pub fn current(&self) -> &AnalysisRun {
        &self.current
    }

    /// Starts a new run for `url`.
    ///
    /// Rejected while another run is loading, when `url` is blank, or when
    /// the analyzer is not `ready`; a rejected submit leaves the session
    /// untouched. On success the previous run and its words are discarded.
    pub fn submit(&mut self, url: &str, ready: bool) -> Result<RunTicket, RunError> {
        if self.current.is_loading() {
            return Err(RunError::Validation("An analysis is already in progress".to_string()));
        }
        if url.trim().is_empty() {
            return Err(RunError::Validation("Please enter a URL".to_string()));
        }
        if !ready {
            return Err(RunError::Validation("Tokenizer is not ready yet".to_string()));
        }

        self.current = AnalysisRun::loading(url);
        Ok(RunTicket { id: self.current.id, url: self.current.url.clone() })
    }

    /// Records the outcome of the run identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when the ticket belongs to a run
    /// that is no longer current or has already finished.
    pub fn finish(&mut self, ticket: &RunTicket, outcome: Result<Vec<AnnotatedWord>, RunError>) -> bool {
        if ticket.id != self.current.id || !self.current.is_loading() {
            tracing::debug!(run = %ticket.id, "discarding outcome of a superseded run");
            return false;
        }

        let run = &mut self.current;
        run.finished_at = Some(OffsetDateTime::now_utc());
        match outcome {
            Ok(words) if !words.is_empty() => {
                run.status = RunStatus::Success;
                run.words = words;
            }
            Ok(_) | Err(RunError::NoResults) => {
                run.status = RunStatus::NoResults;
                run.error = Some(RunError::NoResults);
            }
            Err(error) => {
                run.status = RunStatus::Failed;
                run.error = Some(error);
            }
        }
        true
    }
}
