use thiserror::Error;

/// A forecast payload that breaks the wire contract. These are upstream
/// bugs, not runtime conditions, so they are surfaced rather than repaired.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to parse forecast payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{series}.{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        series: &'static str,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{series} is not strictly increasing at index {index}")]
    NotIncreasing { series: &'static str, index: usize },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}
