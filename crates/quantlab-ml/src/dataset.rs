//! Tabular training data assembled from labeled feature rows.
//!
//! A [`Dataset`] is a row-major feature matrix with an aligned target
//! vector and trade dates, plus the ordered feature-column names the
//! matrix was built from. Construction validates alignment once so the
//! training loop can slice folds without re-checking.

use std::ops::Range;

use quantlab_core::{LabeledRow, Task, TradeDate, ValidationError, FEATURE_COLUMNS};

use crate::error::MlError;

/// Target vector of a dataset, one entry per row.
#[derive(Debug, Clone, PartialEq)]
pub enum Targets {
    /// Ternary signal classes for classification tasks.
    Classes(Vec<i32>),
    /// Forward returns for regression tasks.
    Values(Vec<f64>),
}

impl Targets {
    pub fn len(&self) -> usize {
        match self {
            Targets::Classes(v) => v.len(),
            Targets::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn task(&self) -> Task {
        match self {
            Targets::Classes(_) => Task::Classification,
            Targets::Values(_) => Task::Regression,
        }
    }

    fn slice(&self, range: Range<usize>) -> Targets {
        match self {
            Targets::Classes(v) => Targets::Classes(v[range].to_vec()),
            Targets::Values(v) => Targets::Values(v[range].to_vec()),
        }
    }
}

/// Feature matrix, targets and dates for one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    feature_names: Vec<String>,
    rows: Vec<Vec<f64>>,
    targets: Targets,
    dates: Vec<TradeDate>,
}

impl Dataset {
    /// Build a dataset from pre-assembled parts, validating alignment.
    pub fn new(
        feature_names: Vec<String>,
        rows: Vec<Vec<f64>>,
        targets: Targets,
        dates: Vec<TradeDate>,
    ) -> Result<Self, MlError> {
        if rows.is_empty() {
            return Err(MlError::EmptyDataset);
        }
        if feature_names.is_empty() {
            return Err(ValidationError::EmptySeries.into());
        }
        let width = feature_names.len();
        for row in &rows {
            if row.len() != width {
                return Err(MlError::FeatureWidthMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        if targets.len() != rows.len() {
            return Err(ValidationError::SeriesLengthMismatch {
                series: "targets",
                expected: rows.len(),
                actual: targets.len(),
            }
            .into());
        }
        if dates.len() != rows.len() {
            return Err(ValidationError::SeriesLengthMismatch {
                series: "dates",
                expected: rows.len(),
                actual: dates.len(),
            }
            .into());
        }
        Ok(Self {
            feature_names,
            rows,
            targets,
            dates,
        })
    }

    /// Assemble a dataset from labeled rows for the given task.
    ///
    /// Classification requires every row to carry a class label;
    /// regression targets the forward return directly.
    pub fn from_labeled_rows(rows: &[LabeledRow], task: Task) -> Result<Self, MlError> {
        if rows.is_empty() {
            return Err(MlError::EmptyDataset);
        }
        let feature_names: Vec<String> =
            FEATURE_COLUMNS.iter().map(|name| name.to_string()).collect();
        let matrix: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| row.features.feature_vector())
            .collect();
        let dates: Vec<TradeDate> = rows.iter().map(|row| row.features.date).collect();

        let targets = match task {
            Task::Classification => {
                let mut classes = Vec::with_capacity(rows.len());
                for (index, row) in rows.iter().enumerate() {
                    let class = row.y_cls.ok_or(MlError::MissingLabel { index })?;
                    classes.push(class);
                }
                Targets::Classes(classes)
            }
            Task::Regression => {
                let mut values = Vec::with_capacity(rows.len());
                for (index, row) in rows.iter().enumerate() {
                    if !row.y_ret.is_finite() {
                        return Err(MlError::NonFiniteTarget { index });
                    }
                    values.push(row.y_ret);
                }
                Targets::Values(values)
            }
        };

        Self::new(feature_names, matrix, targets, dates)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of feature columns per row.
    pub fn width(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn dates(&self) -> &[TradeDate] {
        &self.dates
    }

    pub fn task(&self) -> Task {
        self.targets.task()
    }

    /// Copy out the rows and targets of one fold window. The range must
    /// come from the walk-forward splitter and lie within the dataset.
    pub fn slice(&self, range: Range<usize>) -> (Vec<Vec<f64>>, Targets) {
        let rows = self.rows[range.clone()].to_vec();
        let targets = self.targets.slice(range);
        (rows, targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantlab_core::{
        build_features, label_rows, BarSeries, DailyBar, FeatureParams, LabelParams, Symbol,
    };

    fn fixture_labeled(n: usize, task: Task) -> Vec<LabeledRow> {
        let symbol = Symbol::parse("TCS").expect("symbol");
        let mut date = TradeDate::parse("2024-01-01").expect("date");
        let mut bars = Vec::with_capacity(n);
        for i in 0..n {
            // zig-zag around a rising trend so both signal classes occur
            let close = 100.0 + (i as f64) + if i % 2 == 0 { 0.0 } else { 3.0 };
            let bar = DailyBar::from_ohlcv(date, close - 0.5, close + 1.5, close - 1.5, close, 10_000.0)
                .expect("bar");
            bars.push(bar);
            date = date.next_day().expect("next date");
        }
        let series = BarSeries::from_bars(symbol, bars).expect("series");
        let features = build_features(&series, &FeatureParams::default()).expect("features");
        let params = LabelParams::new(1, task, 0.5).expect("params");
        label_rows(&features, &params)
    }

    #[test]
    fn classification_targets_come_from_labels() {
        let labeled = fixture_labeled(40, Task::Classification);
        let dataset =
            Dataset::from_labeled_rows(&labeled, Task::Classification).expect("must build");
        assert_eq!(dataset.len(), labeled.len());
        assert_eq!(dataset.width(), FEATURE_COLUMNS.len());
        assert_eq!(dataset.feature_names(), &FEATURE_COLUMNS.map(String::from));
        let expected: Vec<i32> = labeled.iter().map(|r| r.y_cls.expect("label")).collect();
        assert_eq!(dataset.targets(), &Targets::Classes(expected));
        assert_eq!(dataset.task(), Task::Classification);
    }

    #[test]
    fn regression_targets_are_forward_returns() {
        let labeled = fixture_labeled(40, Task::Regression);
        let dataset = Dataset::from_labeled_rows(&labeled, Task::Regression).expect("must build");
        let expected: Vec<f64> = labeled.iter().map(|r| r.y_ret).collect();
        assert_eq!(dataset.targets(), &Targets::Values(expected));
        assert_eq!(dataset.task(), Task::Regression);
    }

    #[test]
    fn missing_class_label_is_rejected() {
        // labeled for regression, so y_cls is absent on every row
        let labeled = fixture_labeled(40, Task::Regression);
        let err = Dataset::from_labeled_rows(&labeled, Task::Classification)
            .expect_err("must fail without class labels");
        assert!(matches!(err, MlError::MissingLabel { index: 0 }));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err =
            Dataset::from_labeled_rows(&[], Task::Classification).expect_err("must fail empty");
        assert!(matches!(err, MlError::EmptyDataset));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let names = vec!["a".to_string(), "b".to_string()];
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let dates = fixture_dates(2);
        let err = Dataset::new(names, rows, Targets::Values(vec![0.0, 0.0]), dates)
            .expect_err("must fail ragged");
        assert!(matches!(
            err,
            MlError::FeatureWidthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn target_length_mismatch_is_rejected() {
        let names = vec!["a".to_string()];
        let rows = vec![vec![1.0], vec![2.0]];
        let dates = fixture_dates(2);
        let err = Dataset::new(names, rows, Targets::Values(vec![0.0]), dates)
            .expect_err("must fail misaligned");
        assert!(matches!(
            err,
            MlError::Validation(ValidationError::SeriesLengthMismatch {
                series: "targets",
                ..
            })
        ));
    }

    #[test]
    fn slice_returns_aligned_window() {
        let labeled = fixture_labeled(40, Task::Classification);
        let dataset =
            Dataset::from_labeled_rows(&labeled, Task::Classification).expect("must build");
        let (rows, targets) = dataset.slice(2..5);
        assert_eq!(rows.len(), 3);
        assert_eq!(targets.len(), 3);
        assert_eq!(rows[0], dataset.rows()[2]);
    }

    fn fixture_dates(n: usize) -> Vec<TradeDate> {
        let mut date = TradeDate::parse("2024-01-01").expect("date");
        let mut dates = Vec::with_capacity(n);
        for _ in 0..n {
            dates.push(date);
            date = date.next_day().expect("next date");
        }
        dates
    }
}
