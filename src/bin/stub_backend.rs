//! Local stand-in for the diagnosis service.
//! Serves the embedded fixture on `STUB_ADDR` (default 127.0.0.1:8000) so the
//! CLI can run end to end without the real model.

use anyhow::Context;
use symptom_insight::stub::{router, StubState};
use symptom_insight::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let addr = std::env::var("STUB_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "diagnosis stub listening");

    axum::serve(listener, router(StubState::from_fixture()))
        .await
        .context("serving stub backend")?;
    Ok(())
}
