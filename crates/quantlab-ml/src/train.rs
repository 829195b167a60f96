//! Walk-forward training and fold-model selection.
//!
//! One model family is fitted fresh on every expanding fold and scored
//! on the fold's held-out block: macro-F1 for classification, negated
//! mean absolute error for regression, so higher is uniformly better.
//! The instance from the best-scoring fold is the one that ships; there
//! is no refit on the full table afterwards.

use crate::dataset::{Dataset, Targets};
use crate::error::MlError;
use crate::metrics;
use crate::models::{HyperParams, ModelKind, Prediction, Predictor};
use crate::split::walk_forward_splits;

/// Default walk-forward fold count.
pub const DEFAULT_SPLITS: usize = 5;

/// Result of a training run: the fitted model from the best-scoring
/// fold plus every fold score for reporting.
#[derive(Debug)]
pub struct TrainedModel {
    pub kind: ModelKind,
    pub predictor: Predictor,
    pub best_score: f64,
    pub fold_scores: Vec<f64>,
}

/// Fit `kind` across expanding walk-forward folds and keep the instance
/// from the best fold. Selection requires strict improvement, so the
/// earliest of tied folds wins; a fold whose score is NaN never wins.
pub fn train_and_select(
    dataset: &Dataset,
    kind: ModelKind,
    n_splits: usize,
    hyper: &HyperParams,
) -> Result<TrainedModel, MlError> {
    let task = dataset.task();
    if !kind.supports(task) {
        return Err(MlError::UnsupportedModel { kind, task });
    }
    let folds = walk_forward_splits(dataset.len(), n_splits)?;

    let mut fold_scores = Vec::with_capacity(folds.len());
    let mut best: Option<(f64, Predictor)> = None;
    for fold in &folds {
        let (train_rows, train_targets) = dataset.slice(fold.train.clone());
        let (test_rows, test_targets) = dataset.slice(fold.test.clone());

        let model = Predictor::fit(kind, &train_rows, &train_targets, hyper)?;
        let prediction = model.predict(&test_rows)?;
        let score = score_prediction(&test_targets, &prediction);
        fold_scores.push(score);

        let current_best = best.as_ref().map_or(f64::NEG_INFINITY, |(s, _)| *s);
        if score > current_best {
            best = Some((score, model));
        }
    }

    let (best_score, predictor) = best.ok_or(MlError::NoModelSelected)?;
    Ok(TrainedModel {
        kind,
        predictor,
        best_score,
        fold_scores,
    })
}

fn score_prediction(targets: &Targets, prediction: &Prediction) -> f64 {
    match (targets, prediction) {
        (Targets::Classes(t), Prediction::Classes(p)) => metrics::macro_f1(t, p),
        (Targets::Values(t), Prediction::Values(p)) => -metrics::mean_absolute_error(t, p),
        _ => f64::NAN,
    }
}
