//! Bounded retry with backoff around the completion call.
//!
//! Retry policy lives at this one call site so the caller above it sees a
//! single `Result`: either an answer or a terminal [`CompletionError`]
//! after exhaustion. Only transport-level failures are retried; an empty
//! or undecodable response is returned immediately.

use std::time::Duration;

use tracing::warn;

use crate::error_handler::CompletionError;
use crate::services::ollama_service::OllamaService;

/// Retry knobs for [`complete_with_retry`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first (must be >= 1).
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles on each further attempt.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

/// Invokes [`OllamaService::complete`] under the given policy.
///
/// # Errors
/// The last [`CompletionError`] once attempts are exhausted, or the first
/// non-retryable error.
pub async fn complete_with_retry(
    svc: &OllamaService,
    policy: RetryPolicy,
    system_instruction: &str,
    user_message: &str,
) -> Result<String, CompletionError> {
    let attempts = policy.max_attempts.max(1);
    let mut backoff = policy.initial_backoff;

    for attempt in 1..=attempts {
        match svc.complete(system_instruction, user_message).await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!(
                    attempt,
                    max_attempts = attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %e,
                    "completion attempt failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    // Loop always returns; attempts >= 1.
    unreachable!("retry loop exited without a result")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_bounded() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.initial_backoff, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn exhaustion_surfaces_last_error() {
        // Unroutable endpoint: every attempt fails at the transport layer.
        let cfg = crate::config::LlmModelConfig {
            model: "m".into(),
            endpoint: "http://127.0.0.1:1".into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(1),
        };
        let svc = OllamaService::new(cfg).unwrap();
        let policy = RetryPolicy {
            max_attempts: 2,
            initial_backoff: Duration::from_millis(1),
        };

        let err = complete_with_retry(&svc, policy, "", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Unavailable(_)));
    }
}
