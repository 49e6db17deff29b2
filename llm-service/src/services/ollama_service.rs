//! Lightweight Ollama client for text completion.
//!
//! A thin wrapper over `POST {endpoint}/api/generate` with `stream=false`.
//! The system instruction travels in the request's `system` field, the
//! user-turn message in `prompt`; both are opaque strings to this layer.
//!
//! # Examples
//!
//! ```no_run
//! use llm_service::config::LlmModelConfig;
//! use llm_service::services::ollama_service::OllamaService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig {
//!     model: "codellama:7b-instruct".into(),
//!     endpoint: "http://localhost:11434".into(),
//!     max_tokens: Some(1024),
//!     temperature: Some(0.2),
//!     top_p: None,
//!     timeout_secs: Some(120),
//! };
//!
//! let svc = OllamaService::new(cfg)?;
//! let text = svc
//!     .complete("You are a code assistant.", "Explain: print('hi')")
//!     .await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{CompletionError, ConfigError, LlmServiceError};

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses one HTTP client with
/// a configurable timeout.
#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is invalid
    /// - [`ConfigError::EmptyModel`] if the model name is empty
    /// - [`CompletionError::Unavailable`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmServiceError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidFormat {
                var: "endpoint",
                reason: "must start with http:// or https://",
            }
            .into());
        }
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CompletionError::Unavailable)?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/api/generate", base);

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// The configured endpoint base URL.
    pub fn endpoint(&self) -> &str {
        self.cfg.endpoint.trim_end_matches('/')
    }

    /// Performs one **non-streaming** completion via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`        ← `self.cfg.model`
    /// - `system`       ← `system_instruction`
    /// - `prompt`       ← `user_message`
    /// - `num_predict`  ← `self.cfg.max_tokens`
    /// - `temperature`  ← `self.cfg.temperature`
    /// - `top_p`        ← `self.cfg.top_p`
    ///
    /// # Errors
    /// - [`CompletionError::HttpStatus`] for non-2xx responses
    /// - [`CompletionError::Unavailable`] for transport errors/timeouts
    /// - [`CompletionError::Decode`] if the response cannot be parsed
    /// - [`CompletionError::Empty`] when the payload has no usable text
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        let body = GenerateRequest::from_cfg(&self.cfg, system_instruction, user_message);

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(CompletionError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            CompletionError::Decode(format!("serde error: {e}; ensure `stream=false` is used"))
        })?;

        if out.response.trim().is_empty() {
            return Err(CompletionError::Empty);
        }
        Ok(out.response)
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    #[serde(default)]
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

impl<'a> GenerateRequest<'a> {
    /// Builds a request from config, system instruction, and user message.
    fn from_cfg(cfg: &'a LlmModelConfig, system: &'a str, prompt: &'a str) -> Self {
        let options = GenerateOptions {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            num_predict: cfg.max_tokens,
        };

        Self {
            model: &cfg.model,
            prompt,
            system,
            stream: false,
            options: Some(options),
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response body for `/api/generate`.
///
/// Minimal shape: the generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(endpoint: &str, model: &str) -> LlmModelConfig {
        LlmModelConfig {
            model: model.into(),
            endpoint: endpoint.into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn rejects_schemeless_endpoint() {
        let err = OllamaService::new(cfg("localhost:11434", "m")).unwrap_err();
        assert!(matches!(
            err,
            LlmServiceError::Config(ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_empty_model() {
        let err = OllamaService::new(cfg("http://localhost:11434", "  ")).unwrap_err();
        assert!(matches!(
            err,
            LlmServiceError::Config(ConfigError::EmptyModel)
        ));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let svc = OllamaService::new(cfg("http://localhost:11434/", "m")).unwrap();
        assert_eq!(svc.url_generate, "http://localhost:11434/api/generate");
    }

    #[test]
    fn request_body_shape() {
        let c = cfg("http://localhost:11434", "codellama:7b-instruct");
        let req = GenerateRequest::from_cfg(&c, "sys", "user");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "codellama:7b-instruct");
        assert_eq!(json["system"], "sys");
        assert_eq!(json["prompt"], "user");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn empty_system_is_omitted_from_body() {
        let c = cfg("http://localhost:11434", "m");
        let req = GenerateRequest::from_cfg(&c, "", "user");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());
    }
}
