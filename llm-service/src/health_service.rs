//! Health checks for the local Ollama backend.
//!
//! Probes `GET {endpoint}/api/tags` and reports a JSON-serializable
//! [`HealthStatus`] suitable for a `/health` endpoint. [`HealthService::check`]
//! is resilient and never fails (errors are mapped to `ok=false`);
//! [`HealthService::wait_until_ready`] polls at startup so the UI can show a
//! clear message instead of failing the first real request.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::CompletionError;

/// A serializable health snapshot for the configured backend.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model the assistant is configured to use.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Whether the configured model is present on the server (best-effort).
    pub model_present: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// Minimal shape of the `/api/tags` response.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

/// A health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional probe timeout (seconds).
    ///
    /// # Errors
    /// [`CompletionError::Unavailable`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, CompletionError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );
        Ok(Self { client })
    }

    /// Probes the configured endpoint.
    ///
    /// This method is **resilient**: it never returns an error. Any failure
    /// is converted to `HealthStatus { ok: false, message: ... }`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            warn!(endpoint = %cfg.endpoint, "invalid endpoint (empty or missing http/https)");
            return HealthStatus {
                endpoint: cfg.endpoint.clone(),
                model: cfg.model.clone(),
                ok: false,
                model_present: false,
                latency_ms: 0,
                message: "invalid endpoint (empty or missing http/https)".into(),
            };
        }

        let url = format!("{endpoint}/api/tags");
        let started = Instant::now();
        let resp = self.client.get(&url).send().await;
        let latency_ms = started.elapsed().as_millis();

        match resp {
            Ok(r) if r.status().is_success() => {
                let model_present = match r.json::<TagsResponse>().await {
                    Ok(tags) => tags.models.iter().any(|m| m.name == cfg.model),
                    Err(e) => {
                        debug!(error = %e, "tags payload not decodable, skipping model check");
                        false
                    }
                };
                let message = if model_present {
                    format!("reachable; model `{}` is available", cfg.model)
                } else {
                    format!(
                        "reachable; model `{}` not listed (pull it with `ollama pull`)",
                        cfg.model
                    )
                };
                HealthStatus {
                    endpoint: endpoint.to_string(),
                    model: cfg.model.clone(),
                    ok: true,
                    model_present,
                    latency_ms,
                    message,
                }
            }
            Ok(r) => HealthStatus {
                endpoint: endpoint.to_string(),
                model: cfg.model.clone(),
                ok: false,
                model_present: false,
                latency_ms,
                message: format!("HTTP {} from {url}", r.status()),
            },
            Err(e) => HealthStatus {
                endpoint: endpoint.to_string(),
                model: cfg.model.clone(),
                ok: false,
                model_present: false,
                latency_ms,
                message: format!("unreachable: {e}"),
            },
        }
    }

    /// Polls [`HealthService::check`] until the backend answers or the
    /// attempts run out. Returns the last observed status either way.
    pub async fn wait_until_ready(
        &self,
        cfg: &LlmModelConfig,
        attempts: u32,
        delay: Duration,
    ) -> HealthStatus {
        let attempts = attempts.max(1);
        let mut status = self.check(cfg).await;
        for attempt in 2..=attempts {
            if status.ok {
                return status;
            }
            warn!(
                attempt,
                attempts,
                message = %status.message,
                "Ollama not ready, waiting"
            );
            tokio::time::sleep(delay).await;
            status = self.check(cfg).await;
        }
        status
    }
}
