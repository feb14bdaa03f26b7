// src/error.rs

/// Generic message when the service gives nothing better.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to get diagnosis";

/// Transport failures of the diagnosis call. `Display` is the flat,
/// user-visible message; no structured code is exposed beyond the variant.
#[derive(Debug, thiserror::Error)]
pub enum DiagnoseError {
    #[error("{0}")]
    Network(#[source] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("malformed diagnosis response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl DiagnoseError {
    /// HTTP status for `Status` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type DiagnoseResult<T> = Result<T, DiagnoseError>;

/// Choose the message for a non-2xx response.
///
/// `body` is `Some` when the error body parsed as JSON: its non-empty string
/// `detail` is used, anything else gets the fallback. An unparsable body
/// (`None`) falls back to the status reason phrase, then the fallback.
pub fn failure_message(body: Option<&serde_json::Value>, reason: Option<&str>) -> String {
    let picked = match body {
        Some(v) => v.get("detail").and_then(|d| d.as_str()),
        None => reason,
    };
    match picked {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => FALLBACK_FAILURE_MESSAGE.to_string(),
    }
}
