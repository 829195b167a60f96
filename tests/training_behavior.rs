//! Behavior-driven tests for model training
//!
//! These tests verify the walk-forward selection contract: folds respect
//! time order, fold scores are comparable across tasks, and the model the
//! user gets back is the one fitted in its best fold.

use quantlab_core::{Task, TradeDate};
use quantlab_ml::{
    train_and_select, walk_forward_splits, Dataset, HyperParams, MlError, ModelKind, Targets,
};

use quantlab_tests::{small_forest, zigzag_dataset};

// =============================================================================
// Walk-forward folds
// =============================================================================

#[test]
fn walk_forward_folds_always_train_strictly_before_they_test() {
    // Given: 100 chronological rows split five ways
    let folds = walk_forward_splits(100, 5).expect("splits");

    // Then: each fold trains on everything before its test window and the
    // equal-width windows tile the tail of the series back to back
    assert_eq!(folds.len(), 5);
    let mut expected_start = 100 - 5 * 16;
    for fold in &folds {
        assert_eq!(fold.train.start, 0);
        assert_eq!(fold.train.end, fold.test.start);
        assert_eq!(fold.test.start, expected_start);
        assert_eq!(fold.test.len(), 16);
        expected_start += 16;
    }
    assert_eq!(folds.last().expect("fold").test.end, 100);
}

// =============================================================================
// Fold scoring and selection
// =============================================================================

#[test]
fn the_reported_best_score_is_the_maximum_across_folds() {
    // Given: a labeled classification dataset
    let dataset = zigzag_dataset(Task::Classification);

    // When: the forest is trained across three folds
    let trained =
        train_and_select(&dataset, ModelKind::RandomForest, 3, &small_forest()).expect("training");

    // Then: one score per fold, and the kept model carries the best one
    assert_eq!(trained.fold_scores.len(), 3);
    let max = trained
        .fold_scores
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(trained.best_score, max);
    assert!(trained.best_score >= 0.0, "macro-F1 is never negative");
}

#[test]
fn regression_folds_score_negated_error_so_higher_is_still_better() {
    // Given: the same rows labeled with raw forward returns
    let dataset = zigzag_dataset(Task::Regression);

    let trained =
        train_and_select(&dataset, ModelKind::RandomForest, 3, &small_forest()).expect("training");

    // Then: every fold score is a negated absolute error
    assert!(trained.fold_scores.iter().all(|score| *score <= 0.0));
    let max = trained
        .fold_scores
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(trained.best_score, max);
}

#[test]
fn the_user_receives_the_model_from_its_best_fold_not_a_full_refit() {
    // Given: a single-feature relation that holds early and breaks in the
    // final test window
    let mut rows = Vec::new();
    let mut targets = Vec::new();
    let mut dates = Vec::new();
    let mut date = TradeDate::parse("2024-01-01").expect("date");
    for i in 0..12 {
        let x = f64::from(i);
        rows.push(vec![x]);
        targets.push(if i < 8 { 2.0 * x } else { 100.0 });
        dates.push(date);
        date = date.next_day().expect("date range");
    }
    let dataset = Dataset::new(
        vec![String::from("x")],
        rows,
        Targets::Values(targets),
        dates,
    )
    .expect("dataset");

    // When: a linear model is selected across two folds
    let trained = train_and_select(&dataset, ModelKind::Linear, 2, &HyperParams::default())
        .expect("training");

    // Then: the clean early fold wins, so the kept model extrapolates the
    // clean relation; a refit over the broken tail would not predict 40
    let prediction = trained
        .predictor
        .predict(&[vec![20.0]])
        .expect("prediction");
    let values = prediction.values().expect("values");
    assert!((values[0] - 40.0).abs() < 1e-6);
}

// =============================================================================
// Refusals
// =============================================================================

#[test]
fn a_model_family_that_cannot_serve_the_task_is_refused_up_front() {
    // Given: a regression dataset and the classification-only baseline
    let dataset = zigzag_dataset(Task::Regression);

    let err = train_and_select(&dataset, ModelKind::Logistic, 3, &HyperParams::default())
        .expect_err("must refuse");

    assert!(matches!(
        err,
        MlError::UnsupportedModel {
            kind: ModelKind::Logistic,
            task: Task::Regression,
        }
    ));
}
