// src/lib.rs
// Public library surface for the CLI, the stub backend and integration tests.

pub mod client;
pub mod config;
pub mod error;
pub mod narrative;
pub mod presenter;
pub mod session;
pub mod stub;
pub mod telemetry;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::client::{DiagnosisService, HttpDiagnosisClient};
pub use crate::config::AppConfig;
pub use crate::error::DiagnoseError;
pub use crate::narrative::{extract, normalize_symptom, ExtractedNarrative};
pub use crate::presenter::{classify_tone, DiagnosisCard, ResultBoard, Tone};
pub use crate::session::{Session, Status};
pub use crate::types::{DiagnosisRequest, DiagnosisResponse, Prediction};

use tracing::info;

/// One full round: submit the narrative, then mount the returned predictions
/// on `board` (cleared on failure or stale response). Returns `None` when the
/// narrative was blank and nothing was sent.
///
/// ```ignore
/// let cfg = symptom_insight::AppConfig::load()?;
/// let client = symptom_insight::HttpDiagnosisClient::new(&cfg)?;
/// let mut session = symptom_insight::Session::new(&cfg);
/// let mut board = symptom_insight::ResultBoard::new();
/// symptom_insight::analyze(&client, &mut session, &mut board, "dry cough, fever").await;
/// board.settle().await;
/// ```
pub async fn analyze(
    service: &dyn DiagnosisService,
    session: &mut Session,
    board: &mut ResultBoard,
    narrative: &str,
) -> Option<Status> {
    let ticket = session.begin(narrative)?;
    board.clear();

    let outcome = service.diagnose(&ticket.request).await;
    if session.complete(&ticket, outcome) {
        if session.show_results() {
            board.show(session.predictions());
        }
        info!(
            target: "session",
            status = ?session.status(),
            cards = board.len(),
            provider = service.name(),
            "analysis finished"
        );
    }
    Some(session.status())
}
