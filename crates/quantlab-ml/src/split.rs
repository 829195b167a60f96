//! Walk-forward cross-validation indices.
//!
//! Produces expanding-window folds over a chronologically ordered dataset:
//! every fold trains on all rows before its test block, test blocks are
//! contiguous, non-overlapping and cover the tail of the data. Fold
//! arithmetic matches the scikit-learn `TimeSeriesSplit` layout.

use std::ops::Range;

use crate::error::MlError;

/// Row ranges of one walk-forward fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldIndices {
    /// Training rows, always starting at row zero.
    pub train: Range<usize>,
    /// Held-out rows immediately after the training window.
    pub test: Range<usize>,
}

/// Compute expanding walk-forward folds over `n_rows` ordered rows.
///
/// The test block size is `n_rows / (n_splits + 1)` (integer division);
/// fold `i` tests on the block ending `n_splits - i` blocks before the end
/// of the data and trains on everything before it. Fails when `n_splits`
/// is zero or the data cannot fill every test block with at least one row.
pub fn walk_forward_splits(n_rows: usize, n_splits: usize) -> Result<Vec<FoldIndices>, MlError> {
    if n_splits == 0 {
        return Err(MlError::InvalidSplitCount);
    }
    let test_size = n_rows / (n_splits + 1);
    if test_size == 0 {
        return Err(MlError::InsufficientRows {
            rows: n_rows,
            splits: n_splits,
        });
    }

    let mut folds = Vec::with_capacity(n_splits);
    for i in 0..n_splits {
        let test_start = n_rows - (n_splits - i) * test_size;
        folds.push(FoldIndices {
            train: 0..test_start,
            test: test_start..test_start + test_size,
        });
    }
    Ok(folds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_fold_layout() {
        let folds = walk_forward_splits(100, 5).expect("must split");
        assert_eq!(folds.len(), 5);
        let starts: Vec<usize> = folds.iter().map(|f| f.test.start).collect();
        assert_eq!(starts, vec![20, 36, 52, 68, 84]);
        for fold in &folds {
            assert_eq!(fold.train, 0..fold.test.start);
            assert_eq!(fold.test.len(), 16);
        }
        assert_eq!(folds.last().expect("fold").test.end, 100);
    }

    #[test]
    fn small_input_folds_are_exact() {
        let folds = walk_forward_splits(10, 3).expect("must split");
        assert_eq!(
            folds,
            vec![
                FoldIndices { train: 0..4, test: 4..6 },
                FoldIndices { train: 0..6, test: 6..8 },
                FoldIndices { train: 0..8, test: 8..10 },
            ]
        );
    }

    #[test]
    fn minimum_viable_input_trains_on_one_row() {
        let folds = walk_forward_splits(6, 5).expect("must split");
        assert_eq!(folds.len(), 5);
        assert_eq!(folds[0].train, 0..1);
        assert_eq!(folds[0].test, 1..2);
        assert_eq!(folds[4].test, 5..6);
    }

    #[test]
    fn test_blocks_tile_the_tail() {
        let folds = walk_forward_splits(37, 5).expect("must split");
        for pair in folds.windows(2) {
            assert_eq!(pair[0].test.end, pair[1].test.start);
        }
        assert_eq!(folds.last().expect("fold").test.end, 37);
        assert!(folds[0].train.len() >= 1);
    }

    #[test]
    fn rejects_zero_splits() {
        let err = walk_forward_splits(50, 0).expect_err("must fail");
        assert!(matches!(err, MlError::InvalidSplitCount));
    }

    #[test]
    fn rejects_insufficient_rows() {
        let err = walk_forward_splits(5, 5).expect_err("must fail");
        assert!(matches!(
            err,
            MlError::InsufficientRows { rows: 5, splits: 5 }
        ));
    }
}
