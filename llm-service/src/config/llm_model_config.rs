//! Universal configuration for one model invocation profile.

/// Configuration for the local completion model.
///
/// # Fields
///
/// - `model`: the model identifier (e.g., `"codellama:7b-instruct"`).
/// - `endpoint`: the Ollama base URL (e.g., `http://localhost:11434`).
/// - `max_tokens`: maximum number of tokens to generate (if set).
/// - `temperature`: controls randomness (0.0 = deterministic).
/// - `top_p`: nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: per-request timeout in seconds.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Inference endpoint base URL.
    pub endpoint: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
