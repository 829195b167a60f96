use thiserror::Error;

/// Validation and contract errors exposed by `quantlab-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or digit: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid date '{value}', expected ISO YYYY-MM-DD or exchange DD-Mon-YYYY")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,
    #[error("duplicate bar date '{date}'")]
    DuplicateBarDate { date: String },
    #[error("bar dates must be strictly ascending: '{date}' arrives out of order")]
    OutOfOrderBarDate { date: String },

    #[error("input series cannot be empty")]
    EmptySeries,
    #[error("indicator parameter '{name}' must be positive")]
    InvalidWindow { name: &'static str },
    #[error("series '{series}' has length {actual}, expected {expected}")]
    SeriesLengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid task '{value}', expected one of classification, regression")]
    InvalidTask { value: String },
    #[error("horizon_days must be positive")]
    InvalidHorizon,
    #[error("threshold_pct must be non-negative, got {value}")]
    NegativeThreshold { value: f64 },

    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },
    #[error("column '{column}' holds non-numeric value '{value}'")]
    InvalidNumeric { column: &'static str, value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
