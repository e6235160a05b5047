//! Parser error types.

use thiserror::Error;

/// Errors that stop a document from being read at all.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The widget response is not a JSON object with a string `contents` field.
    #[error("widget envelope is malformed: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Reasons the availability overlay could not be read.
///
/// Never fatal: callers fall back to an empty [`cfcr_core::ScheduleSnapshot`].
#[derive(Debug, Error)]
pub enum ExtractionDegraded {
    #[error("no script mentions schedule availability")]
    ScriptNotFound,

    #[error("schedule script has no `scheduleData = ` assignment")]
    MarkerNotFound,

    #[error("schedule data is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
