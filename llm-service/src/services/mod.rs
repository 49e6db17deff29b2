//! Provider clients. Ollama is the only backend this assistant targets.

pub mod ollama_service;

pub use ollama_service::OllamaService;
