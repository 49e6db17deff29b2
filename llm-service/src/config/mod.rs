//! Model configuration: the universal config struct plus env-driven defaults.

pub mod default_config;
pub mod llm_model_config;

pub use default_config::{config_ollama_assistant, DEFAULT_MODEL};
pub use llm_model_config::LlmModelConfig;
