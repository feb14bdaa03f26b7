// src/config/app.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "API_URL";
pub const ENV_TOP_K: &str = "INSIGHT_TOP_K";
pub const ENV_CONFIG_PATH: &str = "INSIGHT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/insight.toml";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOP_K: u8 = 3;
pub const DEFAULT_DISCLAIMER: &str = "This assistant is for educational purposes only and cannot replace consultation with a licensed healthcare professional.";

pub const MIN_TOP_K: u8 = 1;
pub const MAX_TOP_K: u8 = 5;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_disclaimer() -> String {
    DEFAULT_DISCLAIMER.to_string()
}
fn default_top_k() -> u8 {
    DEFAULT_TOP_K
}
fn default_connect_timeout_secs() -> u64 {
    4
}

/// Startup configuration. Resolved once and passed into the client/session;
/// nothing reads the environment after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the diagnosis service (no trailing slash).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Shown when a response carries no disclaimer of its own.
    #[serde(default = "default_disclaimer")]
    pub default_disclaimer_text: String,
    /// Requested number of hypotheses, kept within 1..=5.
    #[serde(default = "default_top_k")]
    pub default_top_k: u8,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_disclaimer_text: default_disclaimer(),
            default_top_k: default_top_k(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML file; missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Defaults, then file, then env overrides:
    /// 1) $INSIGHT_CONFIG_PATH (must exist if set)
    /// 2) config/insight.toml if present
    /// 3) $API_URL / $INSIGHT_TOP_K on top
    pub fn load() -> Result<Self> {
        let base = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    return Err(anyhow!("{} points to non-existent path", ENV_CONFIG_PATH));
                }
                Self::load_from_file(&pb)?
            }
            Err(_) => {
                let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
                if pb.exists() {
                    Self::load_from_file(&pb)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(base.with_env_overrides())
    }

    /// Apply `API_URL` and `INSIGHT_TOP_K` if set. An unparsable top-k is
    /// ignored with a warning.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Ok(raw) = std::env::var(ENV_TOP_K) {
            match raw.trim().parse::<i64>() {
                Ok(k) => self.default_top_k = clamp_top_k_value(k),
                Err(_) => tracing::warn!(var = ENV_TOP_K, value = %raw, "ignoring invalid top-k override"),
            }
        }
        self.sanitized()
    }

    /// Replace the base URL (e.g. from a CLI flag) with the same trimming and
    /// blank-to-default handling as the file and env values.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        let trimmed = self.api_url.trim().trim_end_matches('/').to_string();
        self.api_url = if trimmed.is_empty() {
            default_api_url()
        } else {
            trimmed
        };
        self.default_top_k = clamp_top_k_value(i64::from(self.default_top_k));
        if self.default_disclaimer_text.trim().is_empty() {
            self.default_disclaimer_text = default_disclaimer();
        }
        self
    }

    pub fn diagnose_url(&self) -> String {
        format!("{}/diagnose", self.api_url)
    }
}

/// Clamp a numeric top-k into 1..=5.
pub fn clamp_top_k_value(k: i64) -> u8 {
    k.clamp(i64::from(MIN_TOP_K), i64::from(MAX_TOP_K)) as u8
}

/// Parse free-form top-k input: non-numeric falls back to the default (3),
/// numbers are clamped into 1..=5 (fractions truncated). A cleared field
/// reads as 0 and so clamps to 1.
pub fn clamp_top_k(raw: &str) -> u8 {
    let raw = raw.trim();
    if raw.is_empty() {
        return MIN_TOP_K;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => clamp_top_k_value(v.trunc() as i64),
        Ok(v) if v == f64::INFINITY => MAX_TOP_K,
        Ok(v) if v == f64::NEG_INFINITY => MIN_TOP_K,
        _ => DEFAULT_TOP_K,
    }
}
