use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for the returns-dashboard core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Numerical degeneracies (too few points, zero variance) are never errors:
/// they resolve to neutral values inside the statistics code.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation ────────────────────────────────────────────
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Weight for {instrument_id} out of range: {percent}% (must be within 0-100%)")]
    OutOfRange { instrument_id: String, percent: f64 },

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Dataset ─────────────────────────────────────────────────────
    #[error("Invalid record for {instrument_id}: {message}")]
    InvalidRecord {
        instrument_id: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
