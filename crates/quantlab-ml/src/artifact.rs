//! Persisted model bundles.
//!
//! An artifact carries the fitted predictor, the ordered feature columns
//! it was trained on, the task and the model family, as one pretty-printed
//! JSON document. Prediction re-checks row width against the stored
//! columns so a stale feature table fails loudly instead of silently
//! shifting columns.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use quantlab_core::{classify_return, Task};

use crate::error::MlError;
use crate::models::{ModelKind, Prediction, Predictor};
use crate::train::TrainedModel;

/// A trained model and everything needed to apply it later.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model_kind: ModelKind,
    pub task: Task,
    pub features: Vec<String>,
    pub model: Predictor,
}

impl ModelArtifact {
    /// Bundle a training outcome with its ordered feature columns.
    pub fn new(trained: TrainedModel, features: Vec<String>) -> Self {
        Self {
            model_kind: trained.kind,
            task: trained.predictor.task(),
            features,
            model: trained.predictor,
        }
    }

    /// Write the artifact as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), MlError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, MlError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Raw model output for row-major feature rows.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Prediction, MlError> {
        let expected = self.features.len();
        for row in rows {
            if row.len() != expected {
                return Err(MlError::FeatureWidthMismatch {
                    expected,
                    actual: row.len(),
                });
            }
        }
        let prediction = self.model.predict(rows)?;
        if prediction.task() != self.task {
            return Err(MlError::ArtifactTaskMismatch {
                expected: self.task,
                actual: prediction.task(),
            });
        }
        Ok(prediction)
    }

    /// Trade signals in {-1, 0, +1}: classifier classes pass straight
    /// through, regression output is thresholded at `±threshold_pct`.
    pub fn predict_signals(
        &self,
        rows: &[Vec<f64>],
        threshold_pct: f64,
    ) -> Result<Vec<i32>, MlError> {
        match self.predict(rows)? {
            Prediction::Classes(classes) => Ok(classes),
            Prediction::Values(values) => Ok(values
                .iter()
                .map(|&value| classify_return(value, threshold_pct))
                .collect()),
        }
    }
}
