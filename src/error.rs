use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type shared across the whole pipeline (readers, cleaning, persistence).
///
/// Malformed *values* are deliberately not represented here: an unparsable value
/// cell becomes [`crate::types::Value::Null`] and the row is dropped, because bad
/// values are common in the source data while bad structure is not.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV/TSV read or write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse error (the document itself, not a field value).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The country/region code is not in the closed [`crate::region::Region`] set.
    #[error("invalid region code '{code}'")]
    InvalidRegion { code: String },

    /// The input file extension maps to no known reader.
    #[error("unsupported input format '{extension}' (expected .tsv or .json)")]
    UnsupportedFormat { extension: String },

    /// The input does not conform to the expected shape (missing column/field,
    /// compound key that does not split into four parts, ...).
    #[error("schema mismatch: {message}")]
    Schema { message: String },

    /// A structurally required field could not be coerced to its type.
    ///
    /// Only `year` triggers this today; a bad year is a hard failure rather than
    /// a per-row drop.
    #[error("cannot convert column '{column}' value '{raw}' to an integer")]
    TypeConversion { column: String, raw: String },
}
