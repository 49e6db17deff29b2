use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use llm_service::{CompletionError, LlmServiceError};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Llm(#[from] LlmServiceError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // startup-only and 5xx
            AppError::Llm(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Llm(_) => "LLM_CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Convert `CompletionError` to `AppError::Http` with precise status & code.
///
/// The taxonomy mirrors the user-facing failure kinds: the model server
/// could not be reached (retries already exhausted at the boundary), or it
/// answered without usable content. Both map to 502 so the UI can say "the
/// model did not respond" rather than crashing the page.
impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Unavailable(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "COMPLETION_UNAVAILABLE",
                message: format!("The model server could not be reached: {e}"),
            },
            CompletionError::HttpStatus { status, url, .. } => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "COMPLETION_UNAVAILABLE",
                message: format!("The model server answered HTTP {status} at {url}."),
            },
            CompletionError::Empty => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "COMPLETION_EMPTY",
                message: "The model returned no usable content. Try again or rephrase.".into(),
            },
            CompletionError::Decode(detail) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "COMPLETION_DECODE_ERROR",
                message: format!("The model response could not be decoded: {detail}"),
            },
            // The enum is non_exhaustive; any future kind is still an
            // upstream failure from the caller's point of view.
            other => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "COMPLETION_UNAVAILABLE",
                message: other.to_string(),
            },
        }
    }
}

/// Record persistence failures surface as 500 with a stable code; the
/// answer itself was already produced, so the handler reports rather than
/// retries.
impl From<assist_core::record::RecordError> for AppError {
    fn from(err: assist_core::record::RecordError) -> Self {
        AppError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "RECORD_WRITE_ERROR",
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_failures_map_to_bad_gateway() {
        let cases = [
            (AppError::from(CompletionError::Empty), "COMPLETION_EMPTY"),
            (
                AppError::from(CompletionError::Decode("missing field".into())),
                "COMPLETION_DECODE_ERROR",
            ),
            (
                AppError::from(CompletionError::HttpStatus {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    url: "http://localhost:11434/api/generate".into(),
                    snippet: String::new(),
                }),
                "COMPLETION_UNAVAILABLE",
            ),
        ];
        for (err, code) in cases {
            assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn record_failure_maps_to_internal_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = AppError::from(assist_core::record::RecordError::from(io));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "RECORD_WRITE_ERROR");
    }

    #[test]
    fn bad_request_stays_client_side() {
        let err = AppError::BadRequest("select a task".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
