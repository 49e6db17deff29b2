//! Core of the local code assistant: input validation and prompt
//! construction.
//!
//! The pipeline is `CodeSubmission` → [`InputValidator`] → accept/reject
//! with diagnostics → [`prompt::build_user_prompt`] → `PromptSpec` for the
//! completion boundary. Everything here is pure string/regex processing;
//! the only I/O is [`record`] persistence.

pub mod limits;
pub mod patterns;
pub mod prompt;
pub mod record;
pub mod submission;
pub mod syntax;
pub mod triage;
pub mod validator;
pub mod verdict;

pub use limits::{Limits, ValidationProfile};
pub use prompt::{PromptSpec, TaskSelector, DEFAULT_SYSTEM_PROMPT};
pub use submission::{CodeSubmission, SubmissionOrigin};
pub use validator::InputValidator;
pub use verdict::ValidationVerdict;
