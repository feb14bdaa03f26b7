//! # Session
//! Submission state for one interactive user: the narrative request, the
//! resulting predictions, the disclaimer and the user-visible error.
//!
//! Every submission gets a monotonically increasing ticket. A completion that
//! carries an older ticket than the latest submission is stale and dropped,
//! so a slow earlier response can never overwrite a newer one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::DiagnosisService;
use crate::config::{clamp_top_k, AppConfig};
use crate::error::DiagnoseResult;
use crate::types::{DiagnosisRequest, DiagnosisResponse, Prediction};

pub const UNAVAILABLE_MESSAGE: &str = "Unable to analyze symptoms right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Loading,
    Done,
    Error,
}

/// Proof of a submission; hand it back to [`Session::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    pub request: DiagnosisRequest,
    pub issued_at: DateTime<Utc>,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    status: Status,
    top_k: u8,
    predictions: Vec<Prediction>,
    disclaimer: String,
    default_disclaimer: String,
    error: String,
    latest_seq: u64,
    completed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            status: Status::Idle,
            top_k: cfg.default_top_k,
            predictions: Vec::new(),
            disclaimer: cfg.default_disclaimer_text.clone(),
            default_disclaimer: cfg.default_disclaimer_text.clone(),
            error: String::new(),
            latest_seq: 0,
            completed_at: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn top_k(&self) -> u8 {
        self.top_k
    }

    /// Free-form top-k input (e.g. from a text field).
    pub fn set_top_k_input(&mut self, raw: &str) {
        self.top_k = clamp_top_k(raw);
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }

    /// Empty unless the last applied completion failed.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Submit control state: needs non-blank text and no request in flight.
    pub fn can_submit(&self, query: &str) -> bool {
        !query.trim().is_empty() && self.status != Status::Loading
    }

    pub fn show_results(&self) -> bool {
        self.status == Status::Done && !self.predictions.is_empty()
    }

    /// Start a submission. Blank text is rejected silently (`None`). Clears
    /// previous results and error.
    pub fn begin(&mut self, query: &str) -> Option<Ticket> {
        if query.trim().is_empty() {
            return None;
        }
        self.latest_seq += 1;
        self.status = Status::Loading;
        self.error.clear();
        self.predictions.clear();

        tracing::debug!(
            target: "session",
            seq = self.latest_seq,
            chars = query.chars().count(),
            top_k = self.top_k,
            "submission started"
        );

        Some(Ticket {
            seq: self.latest_seq,
            request: DiagnosisRequest::new(query, Some(self.top_k)),
            issued_at: Utc::now(),
        })
    }

    /// Apply the outcome of a submission. Returns `false` for stale tickets,
    /// which leave the session untouched.
    pub fn complete(&mut self, ticket: &Ticket, outcome: DiagnoseResult<DiagnosisResponse>) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::info!(
                target: "session",
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale diagnosis response"
            );
            return false;
        }

        match outcome {
            Ok(resp) => {
                self.disclaimer = resp.disclaimer_or(&self.default_disclaimer).to_string();
                self.predictions = resp.predictions;
                self.status = Status::Done;
            }
            Err(e) => {
                let msg = e.to_string();
                self.error = if msg.trim().is_empty() {
                    UNAVAILABLE_MESSAGE.to_string()
                } else {
                    msg
                };
                self.predictions.clear();
                self.status = Status::Error;
            }
        }
        self.completed_at = Some(Utc::now());
        true
    }

    /// `begin` + call + `complete`. `None` when the text was blank.
    pub async fn submit(&mut self, service: &dyn DiagnosisService, query: &str) -> Option<bool> {
        let ticket = self.begin(query)?;
        let outcome = service.diagnose(&ticket.request).await;
        Some(self.complete(&ticket, outcome))
    }

    pub fn status_label(&self) -> String {
        match self.status {
            Status::Loading => "Analyzing symptom narrative…".to_string(),
            Status::Done => {
                let n = self.predictions.len();
                let noun = if n == 1 { "hypothesis" } else { "hypotheses" };
                format!("Showing {n} ranked {noun}")
            }
            Status::Error => "We ran into a problem".to_string(),
            Status::Idle => "Describe what you are feeling to begin the analysis.".to_string(),
        }
    }
}
