// src/types.rs
use serde::{Deserialize, Serialize};

/// One ranked hypothesis as returned by the diagnosis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    /// Intended range [0,1]; not enforced by the producer.
    pub confidence: f64,
    #[serde(default)]
    pub description: String,
    /// Verbatim; may contain duplicates or empty entries.
    #[serde(default)]
    pub precautions: Vec<String>,
}

/// Body of `POST /diagnose`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u8>,
}

impl DiagnosisRequest {
    /// `top_k` of 0 is treated as "not requested".
    pub fn new(text: impl Into<String>, top_k: Option<u8>) -> Self {
        Self {
            text: text.into(),
            top_k: top_k.filter(|k| *k > 0),
        }
    }
}

/// Success body of `POST /diagnose`. Missing fields default on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

impl DiagnosisResponse {
    pub fn disclaimer_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.disclaimer.as_deref().unwrap_or(fallback)
    }
}
