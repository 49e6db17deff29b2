//! Ollama completion boundary for the local code assistant.
//!
//! The rest of the system treats text completion as a capability:
//! `complete(system_instruction, user_message) -> Result<String, _>`.
//! This crate provides that capability — a thin non-streaming Ollama
//! client, env-driven configuration, a bounded retry wrapper, health
//! probes, and a library-scoped telemetry layer.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod retry;
pub mod services;
pub mod telemetry;

pub use config::{config_ollama_assistant, LlmModelConfig};
pub use error_handler::{CompletionError, ConfigError, LlmServiceError};
pub use health_service::{HealthService, HealthStatus};
pub use retry::{complete_with_retry, RetryPolicy};
pub use services::OllamaService;
