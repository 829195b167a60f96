use thiserror::Error;

use quantlab_core::{Task, ValidationError};

use crate::models::ModelKind;

/// Errors raised while assembling datasets, training or persisting models.
#[derive(Debug, Error)]
pub enum MlError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("row {index} has no classification label")]
    MissingLabel { index: usize },
    #[error("row {index} has a non-finite target")]
    NonFiniteTarget { index: usize },
    #[error("walk-forward split count must be positive")]
    InvalidSplitCount,
    #[error("{rows} rows cannot support {splits} walk-forward splits")]
    InsufficientRows { rows: usize, splits: usize },

    #[error("unknown model type '{value}', expected one of logistic, linear, random_forest")]
    InvalidModelKind { value: String },
    #[error("model '{kind}' does not support {task} tasks")]
    UnsupportedModel { kind: ModelKind, task: Task },
    #[error("no fold produced a usable score")]
    NoModelSelected,
    #[error("model backend error: {0}")]
    Backend(String),

    #[error("expected {expected} features per row, got {actual}")]
    FeatureWidthMismatch { expected: usize, actual: usize },
    #[error("artifact declares task {expected} but its model predicts {actual}")]
    ArtifactTaskMismatch { expected: Task, actual: Task },

    #[error("artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<smartcore::error::Failed> for MlError {
    fn from(err: smartcore::error::Failed) -> Self {
        MlError::Backend(err.to_string())
    }
}
