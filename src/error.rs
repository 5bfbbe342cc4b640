use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads a timetable, consolidates it, or writes the schedule document.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a delimited text grid cannot be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook does not contain what the reader expects.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a time range is not two `HHMM` tokens joined by a hyphen.
    #[error("invalid time range '{value}': {reason}")]
    InvalidTimeRange { value: String, reason: String },

    /// Raised when a day label is not one of the five teaching days.
    #[error("invalid weekday '{0}'")]
    InvalidWeekday(String),

    /// Raised when the module catalog file cannot be interpreted.
    #[error("invalid module catalog: {0}")]
    InvalidCatalog(String),

    /// Raised when the CLI receives an unsupported conversion request.
    #[error("unsupported conversion from {from:?} to {to:?}")]
    UnsupportedConversion { from: String, to: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    pub(crate) fn time_range(value: &str, reason: impl Into<String>) -> Self {
        ToolError::InvalidTimeRange {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
