//! Interaction record persistence: one timestamped JSON file per exchange.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Failure while persisting an interaction record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to write interaction record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize interaction record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Echo of the request fields captured alongside the response.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedInput {
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub code: String,
}

/// One persisted exchange: `{"input": {...}, "response": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRecord {
    pub input: RecordedInput,
    pub response: String,
}

impl InteractionRecord {
    /// Writes the record to `dir/output_<YYYYMMDD_HHMMSS>.json`.
    ///
    /// The directory is created if missing. Returns the path written.
    ///
    /// # Errors
    /// [`RecordError::Io`] on filesystem failures, [`RecordError::Json`]
    /// if serialization fails (practically unreachable for this shape).
    pub fn save(&self, dir: &Path) -> Result<PathBuf, RecordError> {
        std::fs::create_dir_all(dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("output_{timestamp}.json"));
        let body = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, body)?;

        info!(path = %path.display(), "interaction record saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InteractionRecord {
        InteractionRecord {
            input: RecordedInput {
                mode: "structured".into(),
                task: Some("explain".into()),
                prompt: None,
                code: "print('hi')".into(),
            },
            response: "It prints hi.".into(),
        }
    }

    #[test]
    fn saves_timestamped_file_with_expected_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample().save(dir.path()).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("output_"), "file name was: {name}");
        assert!(name.ends_with(".json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["input"]["task"], "explain");
        assert_eq!(value["response"], "It prints hi.");
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = sample().save(&nested).unwrap();
        assert!(path.exists());
    }
}
