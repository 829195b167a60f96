//! Model variants behind a uniform fit/predict seam.
//!
//! The ML backend (smartcore) stays contained in this module: callers
//! hand in row-major `&[Vec<f64>]` slices and get typed predictions
//! back, so the backend can be swapped without touching the training
//! loop, the artifact format or the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{
    LinearRegression, LinearRegressionParameters, LinearRegressionSolverName,
};
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};

use quantlab_core::Task;

use crate::dataset::Targets;
use crate::error::MlError;

/// Model families the trainer can fit.
///
/// Logistic regression is the classification baseline, linear regression
/// the regression baseline, and the random forest serves both tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Logistic,
    Linear,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Logistic, ModelKind::Linear, ModelKind::RandomForest];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Logistic => "logistic",
            ModelKind::Linear => "linear",
            ModelKind::RandomForest => "random_forest",
        }
    }

    /// Whether this family can be fitted for the given task.
    pub fn supports(&self, task: Task) -> bool {
        matches!(
            (self, task),
            (ModelKind::Logistic, Task::Classification)
                | (ModelKind::Linear, Task::Regression)
                | (ModelKind::RandomForest, _)
        )
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = MlError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "logistic" => Ok(ModelKind::Logistic),
            "linear" => Ok(ModelKind::Linear),
            "random_forest" => Ok(ModelKind::RandomForest),
            _ => Err(MlError::InvalidModelKind {
                value: value.to_string(),
            }),
        }
    }
}

/// Forest hyper-parameters, passed through from configuration.
///
/// The linear baselines take no tuning knobs; the forest reads all three
/// fields. Defaults mirror the research configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperParams {
    pub n_estimators: u16,
    pub max_depth: u16,
    pub random_state: u64,
}

impl Default for HyperParams {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            max_depth: 6,
            random_state: 42,
        }
    }
}

/// A fitted model ready to predict.
#[derive(Debug, Serialize, Deserialize)]
pub enum Predictor {
    Logistic(LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>),
    ForestClassifier(RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>),
    Linear(LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>),
    ForestRegressor(RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>),
}

/// Output of [`Predictor::predict`], shaped by the fitted task.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Classes(Vec<i32>),
    Values(Vec<f64>),
}

impl Prediction {
    pub fn len(&self) -> usize {
        match self {
            Prediction::Classes(v) => v.len(),
            Prediction::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn task(&self) -> Task {
        match self {
            Prediction::Classes(_) => Task::Classification,
            Prediction::Values(_) => Task::Regression,
        }
    }

    pub fn classes(&self) -> Option<&[i32]> {
        match self {
            Prediction::Classes(v) => Some(v),
            Prediction::Values(_) => None,
        }
    }

    pub fn values(&self) -> Option<&[f64]> {
        match self {
            Prediction::Values(v) => Some(v),
            Prediction::Classes(_) => None,
        }
    }
}

impl Predictor {
    /// Fit a fresh model of the given family on row-major features.
    ///
    /// The target variant decides the task; a family that cannot serve
    /// that task is rejected rather than silently substituted.
    pub fn fit(
        kind: ModelKind,
        rows: &[Vec<f64>],
        targets: &Targets,
        hyper: &HyperParams,
    ) -> Result<Self, MlError> {
        if rows.is_empty() {
            return Err(MlError::EmptyDataset);
        }
        let x = to_matrix(rows);
        match (kind, targets) {
            (ModelKind::Logistic, Targets::Classes(y)) => {
                let model = LogisticRegression::fit(&x, y, LogisticRegressionParameters::default())?;
                Ok(Predictor::Logistic(model))
            }
            (ModelKind::RandomForest, Targets::Classes(y)) => {
                let params = RandomForestClassifierParameters::default()
                    .with_n_trees(hyper.n_estimators)
                    .with_max_depth(hyper.max_depth)
                    .with_seed(hyper.random_state);
                let model = RandomForestClassifier::fit(&x, y, params)?;
                Ok(Predictor::ForestClassifier(model))
            }
            (ModelKind::Linear, Targets::Values(y)) => {
                // SVD handles the exactly collinear columns the feature
                // table carries (vwap_proxy, macd_hist)
                let params = LinearRegressionParameters::default()
                    .with_solver(LinearRegressionSolverName::SVD);
                let model = LinearRegression::fit(&x, y, params)?;
                Ok(Predictor::Linear(model))
            }
            (ModelKind::RandomForest, Targets::Values(y)) => {
                let params = RandomForestRegressorParameters::default()
                    .with_n_trees(usize::from(hyper.n_estimators))
                    .with_max_depth(hyper.max_depth)
                    .with_seed(hyper.random_state);
                let model = RandomForestRegressor::fit(&x, y, params)?;
                Ok(Predictor::ForestRegressor(model))
            }
            (kind, targets) => Err(MlError::UnsupportedModel {
                kind,
                task: targets.task(),
            }),
        }
    }

    /// Predict over row-major feature rows. Empty input yields an empty
    /// prediction of the fitted task.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Prediction, MlError> {
        if rows.is_empty() {
            return Ok(match self.task() {
                Task::Classification => Prediction::Classes(Vec::new()),
                Task::Regression => Prediction::Values(Vec::new()),
            });
        }
        let x = to_matrix(rows);
        match self {
            Predictor::Logistic(model) => Ok(Prediction::Classes(model.predict(&x)?)),
            Predictor::ForestClassifier(model) => Ok(Prediction::Classes(model.predict(&x)?)),
            Predictor::Linear(model) => Ok(Prediction::Values(model.predict(&x)?)),
            Predictor::ForestRegressor(model) => Ok(Prediction::Values(model.predict(&x)?)),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Predictor::Logistic(_) => ModelKind::Logistic,
            Predictor::Linear(_) => ModelKind::Linear,
            Predictor::ForestClassifier(_) | Predictor::ForestRegressor(_) => {
                ModelKind::RandomForest
            }
        }
    }

    pub fn task(&self) -> Task {
        match self {
            Predictor::Logistic(_) | Predictor::ForestClassifier(_) => Task::Classification,
            Predictor::Linear(_) | Predictor::ForestRegressor(_) => Task::Regression,
        }
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> DenseMatrix<f64> {
    let refs: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
    DenseMatrix::from_2d_array(&refs)
}
