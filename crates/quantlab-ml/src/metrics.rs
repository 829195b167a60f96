//! Scoring functions for walk-forward evaluation.
//!
//! Classification is scored with macro-averaged F1 over the fixed signal
//! class set {-1, 0, 1}: a class absent from a fold still contributes a
//! zero to the average, so scores stay comparable across folds. Division
//! by an empty class counts as zero rather than raising.

/// The fixed signal classes every classification fold is scored over.
pub const SIGNAL_CLASSES: [i32; 3] = [-1, 0, 1];

/// Macro-averaged F1 over [`SIGNAL_CLASSES`]. Degenerate input (length
/// mismatch or no rows) scores 0.0.
pub fn macro_f1(y_true: &[i32], y_pred: &[i32]) -> f64 {
    if y_true.len() != y_pred.len() || y_true.is_empty() {
        return 0.0;
    }
    let sum: f64 = SIGNAL_CLASSES
        .iter()
        .map(|&class| f1_for_class(y_true, y_pred, class))
        .sum();
    sum / SIGNAL_CLASSES.len() as f64
}

fn f1_for_class(y_true: &[i32], y_pred: &[i32], class: i32) -> f64 {
    let true_positives = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(&t, &p)| t == class && p == class)
        .count();
    let predicted_positives = y_pred.iter().filter(|&&p| p == class).count();
    let actual_positives = y_true.iter().filter(|&&t| t == class).count();

    let precision = if predicted_positives == 0 {
        0.0
    } else {
        true_positives as f64 / predicted_positives as f64
    };
    let recall = if actual_positives == 0 {
        0.0
    } else {
        true_positives as f64 / actual_positives as f64
    };

    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Mean absolute error. Degenerate input yields NaN, which never wins
/// model selection.
pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.len() != y_pred.len() || y_true.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum();
    sum / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_over_all_classes_score_one() {
        let y = vec![-1, 0, 1, -1, 0, 1];
        assert!((macro_f1(&y, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn absent_classes_still_divide_the_average() {
        // only class +1 present and predicted perfectly: 1.0 / 3 classes
        let y = vec![1, 1, 1];
        assert!((macro_f1(&y, &y) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn totally_wrong_predictions_score_zero() {
        let y_true = vec![1, 1];
        let y_pred = vec![-1, -1];
        assert_eq!(macro_f1(&y_true, &y_pred), 0.0);
    }

    #[test]
    fn mixed_case_matches_hand_computation() {
        let y_true = vec![-1, 0, 1, 1];
        let y_pred = vec![-1, 1, 1, 0];
        // class -1: f1 = 1.0; class 0: f1 = 0.0; class +1: p = r = 0.5
        assert!((macro_f1(&y_true, &y_pred) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(macro_f1(&[], &[]), 0.0);
    }

    #[test]
    fn mae_averages_absolute_errors() {
        let y_true = vec![1.0, 2.0, 3.0];
        let y_pred = vec![2.0, 2.0, 2.0];
        assert!((mean_absolute_error(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mae_of_perfect_fit_is_zero() {
        let y = vec![0.5, -0.25, 4.0];
        assert_eq!(mean_absolute_error(&y, &y), 0.0);
    }

    #[test]
    fn mae_of_empty_input_is_nan() {
        assert!(mean_absolute_error(&[], &[]).is_nan());
    }
}
