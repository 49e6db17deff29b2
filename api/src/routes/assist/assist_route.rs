//! POST /assist — validate, build the prompt, invoke the model, triage.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, Json};
use base64::Engine;
use tracing::{debug, info, instrument};

use assist_core::prompt::build_user_prompt;
use assist_core::record::{InteractionRecord, RecordedInput};
use assist_core::triage::suspect_phrase;
use assist_core::{CodeSubmission, PromptSpec};
use llm_service::complete_with_retry;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::assist::assist_request::{AssistRequest, AssistResponse},
};

/// Handler: POST /assist
///
/// Flow: submission → validate → (rejected: verdict only) → build prompt →
/// complete with bounded retry → triage → optional record → answer.
/// Validation failures are resolved entirely before any model call.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/assist \
///   -H 'content-type: application/json' \
///   -d '{"code":"print(1)","task":"explain"}'
/// ```
#[instrument(name = "assist_route", skip(state, body))]
pub async fn assist_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssistRequest>,
) -> AppResult<Response> {
    let submission = build_submission(&body)?;
    let instruction = body
        .instruction
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    // --- Validate before anything touches the network ---------------------
    let verdict = state.validator.validate(&submission, &instruction);
    if !verdict.accepted {
        info!(reason = ?verdict.blocking_reason, "submission rejected");
        let payload = AssistResponse {
            accepted: false,
            warnings: verdict.warnings,
            blocking_reason: verdict.blocking_reason,
            answer: None,
            suspect_phrase: None,
            saved_to: None,
        };
        return Ok(ApiResponse::success(payload).into_response_with_status(StatusCode::OK));
    }

    // Accepted implies the bytes decoded during validation; lossy is lossless here.
    let code = String::from_utf8_lossy(submission.raw_bytes()).into_owned();

    let user_message = build_user_prompt(body.task, &code, &instruction, body.focus_areas.as_deref());
    if user_message.is_empty() {
        return Err(AppError::BadRequest(
            "select a task or provide an instruction".into(),
        ));
    }
    debug!(prompt_chars = user_message.len(), "prompt built");

    let spec = PromptSpec {
        system_instruction: state.system_prompt.read().await.clone(),
        user_message,
    };
    let answer = complete_with_retry(
        &state.llm,
        state.retry,
        &spec.system_instruction,
        &spec.user_message,
    )
    .await?;

    let suspect = suspect_phrase(&answer).map(str::to_string);

    let saved_to = if body.save {
        let record = InteractionRecord {
            input: RecordedInput {
                mode: if instruction.is_empty() {
                    "structured".into()
                } else {
                    "direct".into()
                },
                task: body
                    .task
                    .and_then(|t| serde_json::to_value(t).ok())
                    .and_then(|v| v.as_str().map(str::to_string)),
                prompt: (!instruction.is_empty()).then(|| instruction.clone()),
                code,
            },
            response: answer.clone(),
        };
        let path = record.save(&state.output_dir)?;
        Some(path.display().to_string())
    } else {
        None
    };

    let payload = AssistResponse {
        accepted: true,
        warnings: verdict.warnings,
        blocking_reason: None,
        answer: Some(answer),
        suspect_phrase: suspect,
        saved_to,
    };
    Ok(ApiResponse::success(payload).into_response_with_status(StatusCode::OK))
}

/// Builds the submission from whichever input shape the client sent.
///
/// Upload wins when both are present; the base64 wrapper exists so invalid
/// UTF-8 reaches the validator as bytes instead of being rejected by serde.
fn build_submission(body: &AssistRequest) -> AppResult<CodeSubmission> {
    if let Some(encoded) = body.file_content_base64.as_deref() {
        let raw = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::BadRequest(format!("file_content_base64: {e}")))?;
        let name = body.file_name.as_deref().unwrap_or("upload");
        return Ok(CodeSubmission::from_upload(name, raw));
    }
    Ok(CodeSubmission::from_paste(
        body.code.clone().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_shape_builds_paste_submission() {
        let body: AssistRequest =
            serde_json::from_str(r#"{"code":"x=1","task":"explain"}"#).unwrap();
        let sub = build_submission(&body).unwrap();
        assert_eq!(sub.origin(), &assist_core::SubmissionOrigin::Paste);
        assert_eq!(sub.raw_bytes(), b"x=1");
    }

    #[test]
    fn upload_shape_decodes_base64() {
        let body: AssistRequest = serde_json::from_str(
            r#"{"file_name":"a.py","file_content_base64":"cHJpbnQoMSk="}"#,
        )
        .unwrap();
        let sub = build_submission(&body).unwrap();
        assert_eq!(sub.origin(), &assist_core::SubmissionOrigin::Upload);
        assert_eq!(sub.raw_bytes(), b"print(1)");
        assert_eq!(sub.source_file_name(), Some("a.py"));
    }

    #[test]
    fn invalid_base64_is_bad_request() {
        let body: AssistRequest =
            serde_json::from_str(r#"{"file_content_base64":"%%%"}"#).unwrap();
        let err = build_submission(&body).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn unknown_task_is_rejected_by_serde() {
        let res: Result<AssistRequest, _> =
            serde_json::from_str(r#"{"code":"x","task":"summon"}"#);
        assert!(res.is_err());
    }
}
