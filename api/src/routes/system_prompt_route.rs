//! GET/PUT /system_prompt — the operator-editable system instruction.
//!
//! The system instruction is the one process-wide mutable value: read by
//! every assist cycle, replaced only here. An empty or omitted body on PUT
//! restores the built-in default.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use assist_core::DEFAULT_SYSTEM_PROMPT;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct SystemPromptView {
    pub system_prompt: String,
    /// Whether the current text equals the built-in default.
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
pub struct SystemPromptUpdate {
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Handler: GET /system_prompt
pub async fn get_system_prompt(State(state): State<Arc<AppState>>) -> Response {
    let current = state.system_prompt.read().await.clone();
    let view = SystemPromptView {
        is_default: current == DEFAULT_SYSTEM_PROMPT,
        system_prompt: current,
    };
    ApiResponse::success(view).into_response_with_status(StatusCode::OK)
}

/// Blank or omitted text means "go back to the default".
fn resolve_update(requested: Option<String>) -> String {
    match requested {
        Some(text) if !text.trim().is_empty() => text,
        _ => DEFAULT_SYSTEM_PROMPT.to_string(),
    }
}

/// Handler: PUT /system_prompt
pub async fn put_system_prompt(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SystemPromptUpdate>,
) -> Response {
    let next = resolve_update(body.system_prompt);

    let mut guard = state.system_prompt.write().await;
    *guard = next.clone();
    drop(guard);

    info!(chars = next.len(), "system prompt updated");
    let view = SystemPromptView {
        is_default: next == DEFAULT_SYSTEM_PROMPT,
        system_prompt: next,
    };
    ApiResponse::success(view).into_response_with_status(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_text_is_kept_verbatim() {
        let next = resolve_update(Some("Answer in haiku.".into()));
        assert_eq!(next, "Answer in haiku.");
    }

    #[test]
    fn blank_text_restores_default() {
        assert_eq!(resolve_update(Some("   ".into())), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(resolve_update(None), DEFAULT_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn written_prompt_reads_back() {
        let lock = tokio::sync::RwLock::new(DEFAULT_SYSTEM_PROMPT.to_string());
        *lock.write().await = resolve_update(Some("Be terse.".into()));
        assert_eq!(*lock.read().await, "Be terse.");
    }
}
