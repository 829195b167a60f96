//! Equity-curve CSV reporting.

use std::fs;
use std::path::Path;

use crate::engine::BacktestFrame;
use crate::error::BacktestError;

/// Write the equity curve as CSV with one row per input row, creating
/// parent directories as needed. Columns follow the backtest frame:
/// date, symbol, close, signal, strat_ret, equity.
pub fn write_equity_csv(frame: &BacktestFrame, path: &Path) -> Result<(), BacktestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for point in &frame.points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}
