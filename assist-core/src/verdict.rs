//! Outcome of validating one submission.

use serde::Serialize;

/// Accept/reject decision plus ordered human-readable diagnostics.
///
/// Warnings accumulate in check order and are advisory; a blocking reason
/// is fatal and means no model invocation should be attempted. Warnings
/// gathered before a blocking check still appear in the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationVerdict {
    pub accepted: bool,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_reason: Option<String>,
}

impl ValidationVerdict {
    pub(crate) fn accepted(warnings: Vec<String>) -> Self {
        Self {
            accepted: true,
            warnings,
            blocking_reason: None,
        }
    }

    pub(crate) fn blocked(warnings: Vec<String>, reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            warnings,
            blocking_reason: Some(reason.into()),
        }
    }
}
