use thiserror::Error;

use quantlab_backtest::BacktestError;
use quantlab_core::CoreError;
use quantlab_ml::MlError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] quantlab_core::ValidationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("model error: {0}")]
    Model(MlError),

    #[error("backtest error: {0}")]
    Backtest(BacktestError),

    #[error("strict mode failed: warnings={warning_count}")]
    StrictModeViolation { warning_count: usize },

    #[error("config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Config(_) | Self::Yaml(_) => 2,
            Self::Model(error) => match error {
                MlError::InvalidModelKind { .. } | MlError::UnsupportedModel { .. } => 2,
                _ => 10,
            },
            Self::Backtest(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Command(_) | Self::Serialization(_) | Self::Csv(_) | Self::Io(_) => 10,
        }
    }
}

// Library errors that wrap a validation failure surface it directly so the
// exit code reflects the bad input, not the layer that noticed it.

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(inner) => Self::Validation(inner),
            CoreError::Serialization(inner) => Self::Serialization(inner),
            CoreError::Csv(inner) => Self::Csv(inner),
            CoreError::Io(inner) => Self::Io(inner),
        }
    }
}

impl From<MlError> for CliError {
    fn from(error: MlError) -> Self {
        match error {
            MlError::Validation(inner) => Self::Validation(inner),
            MlError::Serialization(inner) => Self::Serialization(inner),
            MlError::Io(inner) => Self::Io(inner),
            other => Self::Model(other),
        }
    }
}

impl From<BacktestError> for CliError {
    fn from(error: BacktestError) -> Self {
        match error {
            BacktestError::Csv(inner) => Self::Csv(inner),
            BacktestError::Io(inner) => Self::Io(inner),
            other => Self::Backtest(other),
        }
    }
}
