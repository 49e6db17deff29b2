//! Immutable description of one user-provided piece of code.

use serde::{Deserialize, Serialize};

/// How the code reached the backend. The origin changes which limits apply:
/// uploads are size-capped and get per-line-number long-line reporting,
/// pastes only get a long-line count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionOrigin {
    Upload,
    Paste,
}

/// A single code submission, created per request and never mutated.
///
/// The raw bytes are kept undecoded so the validator owns the UTF-8 check
/// and can report a decode failure as a structured verdict instead of an
/// upstream panic.
#[derive(Debug, Clone)]
pub struct CodeSubmission {
    raw: Vec<u8>,
    origin: SubmissionOrigin,
    source_file_name: Option<String>,
}

impl CodeSubmission {
    /// Wraps the raw bytes of an uploaded file.
    pub fn from_upload(file_name: impl Into<String>, raw: Vec<u8>) -> Self {
        Self {
            raw,
            origin: SubmissionOrigin::Upload,
            source_file_name: Some(file_name.into()),
        }
    }

    /// Wraps pasted text. Always valid UTF-8 by construction.
    pub fn from_paste(text: impl Into<String>) -> Self {
        Self {
            raw: text.into().into_bytes(),
            origin: SubmissionOrigin::Paste,
            source_file_name: None,
        }
    }

    /// Raw, possibly non-UTF-8 bytes as received.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Size of the submission in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.raw.len() as u64
    }

    pub fn origin(&self) -> &SubmissionOrigin {
        &self.origin
    }

    pub fn source_file_name(&self) -> Option<&str> {
        self.source_file_name.as_deref()
    }

    /// Whether the submission should be treated as Python source.
    ///
    /// Pasted text is assumed to be Python (the assistant's target
    /// language); uploads are judged by extension.
    pub fn is_python(&self) -> bool {
        match &self.origin {
            SubmissionOrigin::Paste => true,
            SubmissionOrigin::Upload => self
                .source_file_name
                .as_deref()
                .is_some_and(|n| n.to_ascii_lowercase().ends_with(".py")),
        }
    }
}
