use thiserror::Error;

/// Errors raised by the backtest engine and its reports.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("fee_bps must be a non-negative finite number, got {value}")]
    InvalidFee { value: f64 },
    #[error("signal at row {index} must be -1, 0 or 1, got {value}")]
    InvalidSignal { index: usize, value: i32 },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
