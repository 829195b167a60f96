//! Signal backtest over daily closes.
//!
//! Signals are shifted forward one row before they earn returns, so the
//! position held on day `t` is the signal produced on day `t-1` and the
//! first row never holds a position. A flat transaction fee is charged
//! on every position change.

use serde::Serialize;

use quantlab_core::{Symbol, TradeDate};

use crate::error::BacktestError;

/// Default transaction fee in basis points.
pub const DEFAULT_FEE_BPS: f64 = 5.0;

/// Validated backtest parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestParams {
    fee_bps: f64,
}

impl BacktestParams {
    /// Fee in basis points per position change; must be finite and
    /// non-negative.
    pub fn new(fee_bps: f64) -> Result<Self, BacktestError> {
        if !fee_bps.is_finite() || fee_bps < 0.0 {
            return Err(BacktestError::InvalidFee { value: fee_bps });
        }
        Ok(Self { fee_bps })
    }

    pub fn fee_bps(&self) -> f64 {
        self.fee_bps
    }

    fn fee_rate(&self) -> f64 {
        self.fee_bps / 10_000.0
    }
}

impl Default for BacktestParams {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,
        }
    }
}

/// One input row: a close and the raw (unshifted) signal for that date.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRow {
    pub date: TradeDate,
    pub symbol: Symbol,
    pub close: f64,
    pub signal: i32,
}

/// One output row of the backtest: the input row plus the fee-adjusted
/// strategy return and the running equity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub date: TradeDate,
    pub symbol: Symbol,
    pub close: f64,
    pub signal: i32,
    pub strat_ret: f64,
    pub equity: f64,
}

/// Full backtest output: the equity curve and the number of position
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestFrame {
    pub points: Vec<EquityPoint>,
    pub trades: usize,
}

impl BacktestFrame {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Equity after the last row; 1.0 for an empty backtest.
    pub fn final_equity(&self) -> f64 {
        self.points.last().map_or(1.0, |point| point.equity)
    }
}

/// Run the backtest over date-sorted rows.
///
/// The rows are treated as one continuous stream: a concatenated
/// multi-symbol table is backtested as-is, and the position change at a
/// symbol boundary is charged like any other flip. Callers who want
/// per-symbol equity must segment before calling. Non-finite return
/// arithmetic (a zero or missing close) flattens that row to 0.0
/// instead of poisoning the curve.
pub fn run_backtest(
    rows: &[SignalRow],
    params: &BacktestParams,
) -> Result<BacktestFrame, BacktestError> {
    for (index, row) in rows.iter().enumerate() {
        if row.signal < -1 || row.signal > 1 {
            return Err(BacktestError::InvalidSignal {
                index,
                value: row.signal,
            });
        }
    }

    let fee_rate = params.fee_rate();
    let mut points = Vec::with_capacity(rows.len());
    let mut equity = 1.0_f64;
    let mut prev_shifted = 0_i32;
    let mut trades = 0_usize;

    for (t, row) in rows.iter().enumerate() {
        let shifted = if t == 0 { 0 } else { rows[t - 1].signal };
        let raw_ret = if t == 0 {
            0.0
        } else {
            row.close / rows[t - 1].close - 1.0
        };

        let mut net = f64::from(shifted) * raw_ret;
        if t >= 1 && shifted != prev_shifted {
            net -= fee_rate;
            trades += 1;
        }
        if !net.is_finite() {
            net = 0.0;
        }

        equity *= 1.0 + net;
        points.push(EquityPoint {
            date: row.date,
            symbol: row.symbol.clone(),
            close: row.close,
            signal: row.signal,
            strat_ret: net,
            equity,
        });
        prev_shifted = shifted;
    }

    Ok(BacktestFrame { points, trades })
}
