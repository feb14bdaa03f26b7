//! Stand-in diagnosis backend for local runs and integration tests.
//!
//! Serves the same wire contract as the real service (`POST /diagnose`,
//! `GET /`) from a fixed prediction list. No ranking happens here: the first
//! `top_k` fixture entries are returned as-is.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::types::{DiagnosisRequest, DiagnosisResponse, Prediction};

/// Server-side default when the request has no `top_k`.
pub const STUB_DEFAULT_TOP_K: usize = 2;
pub const STUB_DISCLAIMER: &str = "This diagnostic assistant is for educational purposes only and cannot replace consultation with a licensed healthcare professional.";

static FIXTURE: Lazy<Vec<Prediction>> = Lazy::new(|| {
    let raw = include_str!("../fixtures/stub_predictions.json");
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::error!(error = %e, "stub fixture is not valid JSON");
        Vec::new()
    })
});

/// Built-in demo predictions.
pub fn fixture_predictions() -> Vec<Prediction> {
    FIXTURE.clone()
}

#[derive(Clone)]
pub struct StubState {
    predictions: Arc<Vec<Prediction>>,
    disclaimer: Option<String>,
}

impl StubState {
    pub fn new(predictions: Vec<Prediction>, disclaimer: Option<String>) -> Self {
        Self {
            predictions: Arc::new(predictions),
            disclaimer,
        }
    }

    pub fn from_fixture() -> Self {
        Self::new(fixture_predictions(), Some(STUB_DISCLAIMER.to_string()))
    }
}

pub fn router(state: StubState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/diagnose", post(diagnose))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn root(State(state): State<StubState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Diagnosis stub is running",
        "disclaimer": state.disclaimer.as_deref().unwrap_or(STUB_DISCLAIMER),
    }))
}

async fn diagnose(State(state): State<StubState>, Json(body): Json<DiagnosisRequest>) -> Response {
    if body.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "text must not be empty" })),
        )
            .into_response();
    }

    let k = body.top_k.map(usize::from).unwrap_or(STUB_DEFAULT_TOP_K);
    let predictions: Vec<Prediction> = state.predictions.iter().take(k).cloned().collect();
    tracing::debug!(target: "stub", top_k = k, returned = predictions.len(), "diagnose");

    Json(DiagnosisResponse {
        predictions,
        disclaimer: state.disclaimer.clone(),
    })
    .into_response()
}
