//! Diagnosis service client: provider abstraction + reqwest implementation.
//!
//! The client only moves bytes and picks the error message. It never retries
//! and applies no request timeout beyond the connect timeout from config.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::error::{failure_message, DiagnoseError, DiagnoseResult};
use crate::types::{DiagnosisRequest, DiagnosisResponse};

/// Anything that can answer a diagnosis request (HTTP, fixtures, tests).
#[async_trait]
pub trait DiagnosisService: Send + Sync {
    async fn diagnose(&self, request: &DiagnosisRequest) -> DiagnoseResult<DiagnosisResponse>;
    /// Short name for logs.
    fn name(&self) -> &'static str;
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("diagnose_requests_total", "Diagnosis requests sent.");
        describe_counter!(
            "diagnose_failures_total",
            "Diagnosis requests that ended in a transport or status error."
        );
        describe_histogram!("diagnose_latency_ms", "Diagnosis round trip in milliseconds.");
    });
}

/// `POST {api_url}/diagnose` over reqwest.
#[derive(Clone)]
pub struct HttpDiagnosisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpDiagnosisClient {
    pub fn new(cfg: &AppConfig) -> DiagnoseResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("symptom-insight/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()
            .map_err(DiagnoseError::Network)?;
        Ok(Self::with_client(http, cfg))
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(http: reqwest::Client, cfg: &AppConfig) -> Self {
        ensure_metrics_described();
        Self {
            http,
            endpoint: cfg.diagnose_url(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &DiagnosisRequest) -> DiagnoseResult<DiagnosisResponse> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(DiagnoseError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason();
            // Body may be empty or not JSON at all.
            let body = resp.json::<serde_json::Value>().await.ok();
            return Err(DiagnoseError::Status {
                status: status.as_u16(),
                message: failure_message(body.as_ref(), reason),
            });
        }

        resp.json::<DiagnosisResponse>()
            .await
            .map_err(DiagnoseError::Decode)
    }
}

#[async_trait]
impl DiagnosisService for HttpDiagnosisClient {
    async fn diagnose(&self, request: &DiagnosisRequest) -> DiagnoseResult<DiagnosisResponse> {
        counter!("diagnose_requests_total").increment(1);
        let started = Instant::now();

        let out = self.send(request).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        histogram!("diagnose_latency_ms").record(elapsed_ms);

        match &out {
            Ok(body) => tracing::info!(
                target: "client",
                predictions = body.predictions.len(),
                elapsed_ms,
                "diagnosis received"
            ),
            Err(e) => {
                counter!("diagnose_failures_total").increment(1);
                tracing::warn!(
                    target: "client",
                    status = e.status(),
                    error = %e,
                    elapsed_ms,
                    "diagnosis request failed"
                );
            }
        }
        out
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
