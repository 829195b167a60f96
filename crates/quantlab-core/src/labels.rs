//! Forward-return labeling for supervised training.
//!
//! Labels look ahead by construction: the target at row `t` is computed
//! from the close `horizon_days` rows later, so the final `horizon_days`
//! rows of every symbol's table are dropped rather than carrying
//! undefined targets into training.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{FeatureRow, ValidationError};

/// Supervised-learning task for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Classification,
    Regression,
}

impl Task {
    pub const ALL: [Task; 2] = [Task::Classification, Task::Regression];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Classification => "classification",
            Task::Regression => "regression",
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "classification" => Ok(Task::Classification),
            "regression" => Ok(Task::Regression),
            _ => Err(ValidationError::InvalidTask {
                value: value.to_owned(),
            }),
        }
    }
}

/// Validated labeling parameters.
///
/// Construction rejects a zero horizon and a negative threshold; the
/// negative case would make the buy and sell bands overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelParams {
    horizon_days: usize,
    task: Task,
    threshold_pct: f64,
}

impl LabelParams {
    pub fn new(horizon_days: usize, task: Task, threshold_pct: f64) -> Result<Self, ValidationError> {
        if horizon_days == 0 {
            return Err(ValidationError::InvalidHorizon);
        }
        if !threshold_pct.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "threshold_pct",
            });
        }
        if threshold_pct < 0.0 {
            return Err(ValidationError::NegativeThreshold {
                value: threshold_pct,
            });
        }
        Ok(Self {
            horizon_days,
            task,
            threshold_pct,
        })
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn threshold_pct(&self) -> f64 {
        self.threshold_pct
    }
}

/// A feature row with its supervised target attached.
///
/// `y_ret` is always the forward percentage return; `y_cls` is populated
/// for the classification task only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub features: FeatureRow,
    pub y_ret: f64,
    pub y_cls: Option<i32>,
}

/// Ternary signal class for a forward return against a band of
/// `threshold_pct` percent either side of zero.
///
/// Buy and sell conditions are evaluated independently and summed, so the
/// degenerate point `threshold_pct = 0` with a zero return resolves to
/// hold rather than favoring either side.
pub fn classify_return(y_ret: f64, threshold_pct: f64) -> i32 {
    let buy = (y_ret >= threshold_pct) as i32;
    let sell = (y_ret <= -threshold_pct) as i32;
    buy - sell
}

/// Attach forward-return labels to a single-symbol feature table.
///
/// Returns `input length - horizon_days` rows; inputs no longer than the
/// horizon yield an empty table, never an error.
pub fn label_rows(rows: &[FeatureRow], params: &LabelParams) -> Vec<LabeledRow> {
    let n = rows.len();
    let horizon = params.horizon_days();
    if n <= horizon {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n - horizon);
    for t in 0..(n - horizon) {
        let y_ret = (rows[t + horizon].close / rows[t].close - 1.0) * 100.0;
        let y_cls = match params.task() {
            Task::Classification => Some(classify_return(y_ret, params.threshold_pct())),
            Task::Regression => None,
        };
        out.push(LabeledRow {
            features: rows[t].clone(),
            y_ret,
            y_cls,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_features, BarSeries, DailyBar, FeatureParams, Symbol, TradeDate};

    fn feature_rows_with_closes(closes: &[f64]) -> Vec<FeatureRow> {
        let symbol = Symbol::parse("INFY").expect("symbol");
        let mut date = TradeDate::parse("2024-01-01").expect("date");
        let mut bars = Vec::new();
        // prepend enough history that every requested close survives warm-up
        let mut all = vec![100.0; 25];
        all.extend_from_slice(closes);
        for close in &all {
            bars.push(
                DailyBar::from_ohlcv(date, *close, close + 1.0, close - 1.0, *close, 1_000.0)
                    .expect("bar"),
            );
            date = date.next_day().expect("next date");
        }
        let series = BarSeries::from_bars(symbol, bars).expect("series");
        let rows = build_features(&series, &FeatureParams::default()).expect("features");
        rows[rows.len() - closes.len()..].to_vec()
    }

    #[test]
    fn forward_return_is_percentage_over_horizon() {
        let rows = feature_rows_with_closes(&[100.0, 100.6, 100.6]);
        let params =
            LabelParams::new(1, Task::Classification, 0.5).expect("params");
        let labeled = label_rows(&rows, &params);
        assert_eq!(labeled.len(), 2);
        assert!((labeled[0].y_ret - 0.6).abs() < 1e-9);
        assert_eq!(labeled[0].y_cls, Some(1));
        assert!((labeled[1].y_ret - 0.0).abs() < 1e-9);
        assert_eq!(labeled[1].y_cls, Some(0));
    }

    #[test]
    fn drops_exactly_horizon_rows() {
        let rows = feature_rows_with_closes(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        let params = LabelParams::new(2, Task::Regression, 0.0).expect("params");
        let labeled = label_rows(&rows, &params);
        assert_eq!(labeled.len(), 3);
        assert!(labeled.iter().all(|row| row.y_cls.is_none()));
    }

    #[test]
    fn horizon_at_or_past_length_yields_empty() {
        let rows = feature_rows_with_closes(&[100.0, 101.0]);
        let params = LabelParams::new(2, Task::Classification, 0.5).expect("params");
        assert!(label_rows(&rows, &params).is_empty());
        let params = LabelParams::new(5, Task::Classification, 0.5).expect("params");
        assert!(label_rows(&rows, &params).is_empty());
    }

    #[test]
    fn classification_thresholds_are_inclusive() {
        assert_eq!(classify_return(0.5, 0.5), 1);
        assert_eq!(classify_return(-0.5, 0.5), -1);
        assert_eq!(classify_return(0.49, 0.5), 0);
        assert_eq!(classify_return(-0.49, 0.5), 0);
    }

    #[test]
    fn zero_threshold_zero_return_holds() {
        assert_eq!(classify_return(0.0, 0.0), 0);
        assert_eq!(classify_return(0.1, 0.0), 1);
        assert_eq!(classify_return(-0.1, 0.0), -1);
    }

    #[test]
    fn every_label_is_exactly_one_class() {
        let rows = feature_rows_with_closes(&[100.0, 102.0, 99.0, 99.5, 103.0, 101.0]);
        let params = LabelParams::new(1, Task::Classification, 1.0).expect("params");
        for labeled in label_rows(&rows, &params) {
            let y_cls = labeled.y_cls.expect("classification label");
            assert!(matches!(y_cls, -1 | 0 | 1));
            let expected = classify_return(labeled.y_ret, 1.0);
            assert_eq!(y_cls, expected);
        }
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = LabelParams::new(1, Task::Classification, -0.5).expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeThreshold { .. }));
    }

    #[test]
    fn rejects_zero_horizon() {
        let err = LabelParams::new(0, Task::Classification, 0.5).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidHorizon));
    }

    #[test]
    fn rejects_non_finite_threshold() {
        let err = LabelParams::new(1, Task::Regression, f64::NAN).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue {
                field: "threshold_pct"
            }
        ));
    }

    #[test]
    fn task_parses_from_config_strings() {
        assert_eq!(
            "classification".parse::<Task>().expect("must parse"),
            Task::Classification
        );
        assert_eq!(
            " Regression ".parse::<Task>().expect("must parse"),
            Task::Regression
        );
        let err = "clustering".parse::<Task>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTask { .. }));
    }
}
