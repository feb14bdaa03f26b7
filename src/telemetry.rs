// src/telemetry.rs
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_JSON: &str = "INSIGHT_LOG_JSON";
const DEFAULT_FILTER: &str = "symptom_insight=info,warn";

/// Install the global subscriber for the binaries.
///
/// Filter comes from `RUST_LOG` (default `symptom_insight=info,warn`).
/// `INSIGHT_LOG_JSON=1` switches to JSON lines. Logs go to stderr so card
/// output on stdout stays clean. Safe to call twice; the second call is a no-op.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(ENV_LOG_JSON)
        .ok()
        .is_some_and(|v| v == "1");

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
