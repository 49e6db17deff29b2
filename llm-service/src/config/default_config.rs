//! Default model config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `OLLAMA_URL` or `OLLAMA_PORT` — endpoint (defaults to
//!   `http://localhost:11434` when both are unset)
//! - `OLLAMA_MODEL`       — model name (default `codellama:7b-instruct`)
//! - `LLM_MAX_TOKENS`     — optional generation cap (u32)
//! - `LLM_TIMEOUT_SECS`   — optional per-request timeout

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{env_opt_u32, ConfigError, Result, validate_http_endpoint};

/// Model the assistant targets when `OLLAMA_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "codellama:7b-instruct";

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. `http://localhost:11434`
///
/// # Errors
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is not a valid port
/// - [`ConfigError::InvalidFormat`] if `OLLAMA_URL` has no http scheme
fn ollama_endpoint() -> Result<String> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            validate_http_endpoint("OLLAMA_URL", url.trim())?;
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Ok("http://localhost:11434".to_string())
}

/// Constructs the assistant's completion config from environment.
///
/// # Defaults
/// - `model = "codellama:7b-instruct"`
/// - `temperature = Some(0.2)`
/// - `timeout_secs = Some(120)`
pub fn config_ollama_assistant() -> Result<LlmModelConfig> {
    let endpoint = ollama_endpoint()?;
    let model = std::env::var("OLLAMA_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let timeout_secs = env_opt_u32("LLM_TIMEOUT_SECS")?
        .map(u64::from)
        .or(Some(120));

    Ok(LlmModelConfig {
        model,
        endpoint,
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs,
    })
}
