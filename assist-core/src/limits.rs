//! Resource limits and validation rigor for incoming submissions.
//!
//! All thresholds are plain data with named defaults; construct [`Limits`]
//! directly or start from [`Limits::default`] and override individual fields.

use serde::{Deserialize, Serialize};

/// Maximum accepted upload size in bytes (1 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 1_048_576;

/// Hard ceiling on the estimated token count; estimates above this block.
pub const DEFAULT_TOKEN_HARD_MAX: usize = 3000;

/// Soft threshold on the estimated token count; estimates above this warn.
pub const DEFAULT_TOKEN_WARN: usize = 2000;

/// Long-line threshold for uploaded files, in characters.
pub const DEFAULT_LONG_LINE_UPLOAD: usize = 500;

/// Long-line threshold for pasted text, in characters.
pub const DEFAULT_LONG_LINE_PASTE: usize = 200;

/// Minimum line count before the repetition heuristic applies.
pub const DEFAULT_REPETITION_MIN_LINES: usize = 50;

/// How rigorously [`crate::InputValidator`] inspects a submission.
///
/// `Minimal` covers only the fatal checks (emptiness, size, encoding, token
/// budget). `Strict` adds the advisory scans: danger patterns, long lines,
/// repetition, and Python syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationProfile {
    Minimal,
    #[default]
    Strict,
}

impl ValidationProfile {
    /// Parses a profile name, falling back to `Strict` for unknown values.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "minimal" => ValidationProfile::Minimal,
            _ => ValidationProfile::Strict,
        }
    }
}

/// Tunable thresholds consulted by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Byte ceiling for uploaded files; pasted text is not size-capped here.
    pub max_upload_bytes: u64,
    /// Estimated-token count above which the submission is rejected.
    pub token_hard_max: usize,
    /// Estimated-token count above which a warning is attached.
    pub token_warn: usize,
    /// Per-line character threshold for uploaded files.
    pub long_line_upload: usize,
    /// Per-line character threshold for pasted text.
    pub long_line_paste: usize,
    /// Line count above which the repetition heuristic engages.
    pub repetition_min_lines: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            token_hard_max: DEFAULT_TOKEN_HARD_MAX,
            token_warn: DEFAULT_TOKEN_WARN,
            long_line_upload: DEFAULT_LONG_LINE_UPLOAD,
            long_line_paste: DEFAULT_LONG_LINE_PASTE,
            repetition_min_lines: DEFAULT_REPETITION_MIN_LINES,
        }
    }
}
