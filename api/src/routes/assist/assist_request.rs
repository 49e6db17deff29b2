use assist_core::TaskSelector;
use serde::{Deserialize, Serialize};

/// Request payload for /assist.
///
/// Exactly one of the two input shapes is expected: `code` for pasted text,
/// or `file_name` + `file_content_base64` for an uploaded file (sent as
/// base64 so undecodable bytes reach the validator intact).
#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    /// Pasted code text.
    #[serde(default)]
    pub code: Option<String>,
    /// Name of the uploaded file, used for size/extension rules.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Raw uploaded bytes, base64-encoded.
    #[serde(default)]
    pub file_content_base64: Option<String>,
    /// Structured task; ignored when `instruction` is non-empty.
    #[serde(default)]
    pub task: Option<TaskSelector>,
    /// Free-form instruction (direct-prompt mode).
    #[serde(default)]
    pub instruction: Option<String>,
    /// Refactor focus areas; defaults applied by the prompt builder.
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
    /// Persist the exchange as a timestamped JSON record.
    #[serde(default)]
    pub save: bool,
}

/// Response payload for /assist.
///
/// A rejected submission still answers 200: rejection is a validation
/// outcome the user fixes by editing input, not a server fault.
#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub accepted: bool,
    /// Advisory diagnostics, in the order the checks ran.
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_reason: Option<String>,
    /// Model answer (absent when the submission was rejected).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Refusal/error phrase spotted in the answer's leading portion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspect_phrase: Option<String>,
    /// Path of the persisted interaction record, when saving was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}
