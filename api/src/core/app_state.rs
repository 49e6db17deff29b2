//! Shared state for all HTTP handlers.

use std::path::PathBuf;

use assist_core::{InputValidator, Limits, ValidationProfile, DEFAULT_SYSTEM_PROMPT};
use llm_service::{
    config_ollama_assistant, HealthService, LlmModelConfig, OllamaService, RetryPolicy,
};
use tokio::sync::RwLock;

use crate::error_handler::AppError;

/// Process-wide state: the validator, the completion client, and the one
/// mutable value in the system — the operator-editable system instruction.
pub struct AppState {
    /// Validator configured from env (profile and limits).
    pub validator: InputValidator,
    /// Ollama completion client.
    pub llm: OllamaService,
    /// Model config kept around for health probes.
    pub llm_cfg: LlmModelConfig,
    /// Retry policy applied at the completion boundary.
    pub retry: RetryPolicy,
    /// Health prober for `/health` and startup readiness.
    pub health: HealthService,
    /// Operator-editable system instruction, read by every request.
    pub system_prompt: RwLock<String>,
    /// Directory for persisted interaction records.
    pub output_dir: PathBuf,
}

impl AppState {
    /// Loads shared state from environment variables.
    ///
    /// - `ASSIST_VALIDATION_PROFILE` — `minimal` or `strict` (default)
    /// - `ASSIST_OUTPUT_DIR` — record directory (default `files`)
    /// - Ollama settings per `llm_service::config`
    ///
    /// # Errors
    /// [`AppError::Llm`] when the model config or client cannot be built.
    pub fn from_env() -> Result<Self, AppError> {
        let profile = std::env::var("ASSIST_VALIDATION_PROFILE")
            .map(|v| ValidationProfile::from_name(&v))
            .unwrap_or_default();
        let validator = InputValidator::new(Limits::default(), profile);

        let llm_cfg = config_ollama_assistant()?;
        let llm = OllamaService::new(llm_cfg.clone())?;
        let health = HealthService::new(Some(5)).map_err(llm_service::LlmServiceError::from)?;

        let output_dir = std::env::var("ASSIST_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("files"));

        Ok(Self {
            validator,
            llm,
            llm_cfg,
            retry: RetryPolicy::default(),
            health,
            system_prompt: RwLock::new(DEFAULT_SYSTEM_PROMPT.to_string()),
            output_dir,
        })
    }
}
