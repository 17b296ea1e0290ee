//! Health probe for the answering service.
//!
//! Probe: `GET {base}/healthz`, expecting `{"status": "ok"}`.
//!
//! [`HealthService::check`] is resilient and never fails (errors are mapped
//! to `ok = false`); [`HealthService::try_probe`] returns a strict `Result`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::default_config::DEFAULT_HEALTH_TIMEOUT_SECS;
use crate::config::service_config::AnswerServiceConfig;
use crate::error_handler::{AnswerError, Result, ServiceError, make_snippet};
use crate::services::answer_service::auth_headers;

/// A serializable health snapshot of the answering service.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Probed URL.
    pub endpoint: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    #[inline]
    fn ok(endpoint: &str, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ok: true,
            latency_ms,
            message: message.into(),
        }
    }

    #[inline]
    fn fail(endpoint: &str, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ok: false,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker with its own short-timeout HTTP client.
///
/// Kept separate from the answer client so that a probe never waits as long
/// as a question might.
pub struct HealthService {
    client: reqwest::Client,
    url: String,
}

impl HealthService {
    /// Creates a health service for the configured base URL.
    ///
    /// Sends `X-API-Key` like the answer client when a key is configured.
    ///
    /// # Errors
    /// - [`crate::error_handler::ConfigError::InvalidFormat`] if the API key is not a valid header value
    /// - [`AnswerError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: &AnswerServiceConfig) -> Result<Self> {
        let timeout = Duration::from_secs(
            cfg.health_timeout_secs
                .unwrap_or(DEFAULT_HEALTH_TIMEOUT_SECS),
        );
        let client = reqwest::Client::builder()
            .default_headers(auth_headers(cfg)?)
            .timeout(timeout)
            .build()?;

        info!(timeout_secs = timeout.as_secs(), "HealthService initialized");

        Ok(Self {
            client,
            url: cfg.url("/healthz"),
        })
    }

    /// Probes the service; any failure becomes `HealthStatus { ok: false, .. }`.
    pub async fn check(&self) -> HealthStatus {
        let start = Instant::now();
        match self.try_probe().await {
            Ok(status) => {
                info!(
                    endpoint = %status.endpoint,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status =
                    HealthStatus::fail(&self.url, start.elapsed().as_millis(), err.user_message());
                warn!(
                    endpoint = %status.endpoint,
                    latency_ms = status.latency_ms,
                    error = %err,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Strict probe. Returns an error on transport failures and non-2xx statuses.
    ///
    /// A 2xx response whose body does not report `"ok"` is returned as an
    /// unhealthy status rather than an error.
    pub async fn try_probe(&self) -> Result<HealthStatus> {
        #[derive(Deserialize)]
        struct Health {
            status: Option<String>,
        }

        let start = Instant::now();
        debug!("GET {}", self.url);
        let resp = self.client.get(&self.url).send().await?;
        let latency = start.elapsed().as_millis();

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AnswerError::from(ServiceError::from_body(
                status.as_u16(),
                self.url.as_str(),
                &text,
            )));
        }

        match serde_json::from_str::<Health>(&text) {
            Ok(Health { status: Some(s) }) if s.eq_ignore_ascii_case("ok") => {
                Ok(HealthStatus::ok(&self.url, latency, "service is healthy"))
            }
            Ok(Health { status }) => Ok(HealthStatus::fail(
                &self.url,
                latency,
                format!(
                    "service reported status {}",
                    status.as_deref().unwrap_or("<missing>")
                ),
            )),
            Err(e) => Ok(HealthStatus::fail(
                &self.url,
                latency,
                format!("unexpected health body ({e}): {}", make_snippet(&text)),
            )),
        }
    }
}
