//! Feature engineering over a single-symbol bar series.
//!
//! The builder turns raw bars into model-ready rows: percentage returns, a
//! VWAP proxy, the indicator suite, and lagged close/return columns. Rows
//! whose derived columns are not all defined are dropped, so the output
//! begins after the longest warm-up and may be empty for short inputs.

use serde::{Deserialize, Serialize};

use crate::indicators;
use crate::{BarSeries, Symbol, TradeDate, ValidationError};

/// Lags applied to the close price and the 1-day return.
pub const FEATURE_LAGS: [usize; 5] = [1, 2, 3, 5, 10];

/// Model feature columns in training order: raw bar fields first, derived
/// columns after, exactly as the builder emits them. Identifier columns
/// (date, symbol) and exchange extras (last, prev_close, turnover) are
/// never features.
pub const FEATURE_COLUMNS: [&str; 30] = [
    "open",
    "high",
    "low",
    "close",
    "volume",
    "ret_1d",
    "ret_5d",
    "vwap_proxy",
    "sma_5",
    "sma_20",
    "ema_12",
    "ema_26",
    "rsi_14",
    "macd",
    "macd_signal",
    "macd_hist",
    "bb_mid",
    "bb_upper",
    "bb_lower",
    "atr_14",
    "close_lag_1",
    "close_lag_2",
    "close_lag_3",
    "close_lag_5",
    "close_lag_10",
    "ret_lag_1",
    "ret_lag_2",
    "ret_lag_3",
    "ret_lag_5",
    "ret_lag_10",
];

/// Indicator parameterization for the feature builder.
///
/// Fixed once at startup and passed explicitly into [`build_features`];
/// the defaults mirror the research configuration the column names carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_window: usize,
    pub bb_k: f64,
    pub atr_period: usize,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            sma_fast: 5,
            sma_slow: 20,
            ema_fast: 12,
            ema_slow: 26,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_window: 20,
            bb_k: 2.0,
            atr_period: 14,
        }
    }
}

impl FeatureParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let windows = [
            ("sma_fast", self.sma_fast),
            ("sma_slow", self.sma_slow),
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bb_window", self.bb_window),
            ("atr_period", self.atr_period),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(ValidationError::InvalidWindow { name });
            }
        }
        if !self.bb_k.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "bb_k" });
        }
        Ok(())
    }
}

/// A daily bar extended with derived model inputs; every derived field of
/// an emitted row is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: TradeDate,
    pub symbol: Symbol,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub last: Option<f64>,
    pub prev_close: Option<f64>,
    pub turnover: Option<f64>,
    pub ret_1d: f64,
    pub ret_5d: f64,
    pub vwap_proxy: f64,
    pub sma_5: f64,
    pub sma_20: f64,
    pub ema_12: f64,
    pub ema_26: f64,
    pub rsi_14: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub bb_mid: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub atr_14: f64,
    pub close_lag_1: f64,
    pub close_lag_2: f64,
    pub close_lag_3: f64,
    pub close_lag_5: f64,
    pub close_lag_10: f64,
    pub ret_lag_1: f64,
    pub ret_lag_2: f64,
    pub ret_lag_3: f64,
    pub ret_lag_5: f64,
    pub ret_lag_10: f64,
}

impl FeatureRow {
    /// Feature values in [`FEATURE_COLUMNS`] order.
    pub fn feature_vector(&self) -> Vec<f64> {
        vec![
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.ret_1d,
            self.ret_5d,
            self.vwap_proxy,
            self.sma_5,
            self.sma_20,
            self.ema_12,
            self.ema_26,
            self.rsi_14,
            self.macd,
            self.macd_signal,
            self.macd_hist,
            self.bb_mid,
            self.bb_upper,
            self.bb_lower,
            self.atr_14,
            self.close_lag_1,
            self.close_lag_2,
            self.close_lag_3,
            self.close_lag_5,
            self.close_lag_10,
            self.ret_lag_1,
            self.ret_lag_2,
            self.ret_lag_3,
            self.ret_lag_5,
            self.ret_lag_10,
        ]
    }
}

/// Derive the feature table for one symbol's bar series.
///
/// The input must be date-sorted without duplicates ([`BarSeries`] enforces
/// this at construction). Short inputs yield an empty table, never an
/// error.
pub fn build_features(
    series: &BarSeries,
    params: &FeatureParams,
) -> Result<Vec<FeatureRow>, ValidationError> {
    params.validate()?;

    let bars = &series.bars;
    let n = bars.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let close = series.closes();
    let high = series.highs();
    let low = series.lows();

    let mut ret_1d = vec![f64::NAN; n];
    for i in 1..n {
        ret_1d[i] = (close[i] / close[i - 1] - 1.0) * 100.0;
    }
    let mut ret_5d = vec![f64::NAN; n];
    for i in 5..n {
        ret_5d[i] = (close[i] / close[i - 5] - 1.0) * 100.0;
    }

    let sma_fast = indicators::sma(&close, params.sma_fast)?;
    let sma_slow = indicators::sma(&close, params.sma_slow)?;
    let ema_fast = indicators::ema(&close, params.ema_fast)?;
    let ema_slow = indicators::ema(&close, params.ema_slow)?;
    let rsi = indicators::rsi(&close, params.rsi_period)?;
    let macd = indicators::macd(&close, params.macd_fast, params.macd_slow, params.macd_signal)?;
    let bands = indicators::bollinger_bands(&close, params.bb_window, params.bb_k)?;
    let atr = indicators::atr(&high, &low, &close, params.atr_period)?;

    let lag = |source: &[f64], k: usize, i: usize| -> f64 {
        if i >= k {
            source[i - k]
        } else {
            f64::NAN
        }
    };

    let mut rows = Vec::new();
    for i in 0..n {
        let bar = &bars[i];
        let candidate = FeatureRow {
            date: bar.date,
            symbol: series.symbol.clone(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            last: bar.last,
            prev_close: bar.prev_close,
            turnover: bar.turnover,
            ret_1d: ret_1d[i],
            ret_5d: ret_5d[i],
            vwap_proxy: (bar.high + bar.low + bar.close) / 3.0,
            sma_5: sma_fast[i],
            sma_20: sma_slow[i],
            ema_12: ema_fast[i],
            ema_26: ema_slow[i],
            rsi_14: rsi[i],
            macd: macd.macd[i],
            macd_signal: macd.signal[i],
            macd_hist: macd.histogram[i],
            bb_mid: bands.middle[i],
            bb_upper: bands.upper[i],
            bb_lower: bands.lower[i],
            atr_14: atr[i],
            close_lag_1: lag(&close, 1, i),
            close_lag_2: lag(&close, 2, i),
            close_lag_3: lag(&close, 3, i),
            close_lag_5: lag(&close, 5, i),
            close_lag_10: lag(&close, 10, i),
            ret_lag_1: lag(&ret_1d, 1, i),
            ret_lag_2: lag(&ret_1d, 2, i),
            ret_lag_3: lag(&ret_1d, 3, i),
            ret_lag_5: lag(&ret_1d, 5, i),
            ret_lag_10: lag(&ret_1d, 10, i),
        };
        if row_is_complete(&candidate) {
            rows.push(candidate);
        }
    }
    Ok(rows)
}

/// Per-row completeness check over the derived columns. A row survives only
/// when every derived value is finite; raw bar fields are already validated
/// at construction.
fn row_is_complete(row: &FeatureRow) -> bool {
    let derived = [
        row.ret_1d,
        row.ret_5d,
        row.vwap_proxy,
        row.sma_5,
        row.sma_20,
        row.ema_12,
        row.ema_26,
        row.rsi_14,
        row.macd,
        row.macd_signal,
        row.macd_hist,
        row.bb_mid,
        row.bb_upper,
        row.bb_lower,
        row.atr_14,
        row.close_lag_1,
        row.close_lag_2,
        row.close_lag_3,
        row.close_lag_5,
        row.close_lag_10,
        row.ret_lag_1,
        row.ret_lag_2,
        row.ret_lag_3,
        row.ret_lag_5,
        row.ret_lag_10,
    ];
    derived.iter().all(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DailyBar;

    fn fixture_series(n: usize) -> BarSeries {
        let symbol = Symbol::parse("TCS").expect("symbol");
        let mut date = TradeDate::parse("2024-01-01").expect("date");
        let mut bars = Vec::with_capacity(n);
        for i in 0..n {
            let close = 100.0 + (i as f64) + ((i as f64) * 0.7).sin() * 2.0;
            let bar = DailyBar::from_ohlcv(
                date,
                close - 0.5,
                close + 1.5,
                close - 1.5,
                close,
                10_000.0 + (i as f64) * 10.0,
            )
            .expect("bar");
            bars.push(bar);
            date = date.next_day().expect("next date");
        }
        BarSeries::from_bars(symbol, bars).expect("series")
    }

    #[test]
    fn trims_warm_up_rows() {
        let series = fixture_series(30);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        // longest warm-up: the 20-bar windows defined from index 19
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].date, series.bars[19].date);
    }

    #[test]
    fn emitted_rows_are_fully_defined() {
        let series = fixture_series(40);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        assert!(!rows.is_empty());
        for row in &rows {
            assert!(row.feature_vector().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn output_never_exceeds_input_length() {
        for n in [0, 1, 5, 19, 20, 45] {
            let series = fixture_series(n);
            let rows = build_features(&series, &FeatureParams::default()).expect("must build");
            assert!(rows.len() <= n);
        }
    }

    #[test]
    fn short_input_yields_empty_output() {
        let series = fixture_series(12);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let series = fixture_series(0);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        assert!(rows.is_empty());
    }

    #[test]
    fn lags_reference_prior_values() {
        let series = fixture_series(30);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        let close = series.closes();
        // first emitted row sits at input index 19
        let row = &rows[0];
        assert_eq!(row.close_lag_1, close[18]);
        assert_eq!(row.close_lag_10, close[9]);
        let expected_ret = (close[18] / close[17] - 1.0) * 100.0;
        assert!((row.ret_lag_1 - expected_ret).abs() < 1e-9);
    }

    #[test]
    fn returns_are_percentage_scaled() {
        let series = fixture_series(30);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        let close = series.closes();
        let row = &rows[0];
        assert!((row.ret_1d - (close[19] / close[18] - 1.0) * 100.0).abs() < 1e-9);
        assert!((row.ret_5d - (close[19] / close[14] - 1.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn vwap_proxy_averages_high_low_close() {
        let series = fixture_series(25);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        let row = &rows[0];
        let bar = &series.bars[19];
        assert!((row.vwap_proxy - (bar.high + bar.low + bar.close) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_window_params() {
        let series = fixture_series(30);
        let params = FeatureParams {
            sma_fast: 0,
            ..FeatureParams::default()
        };
        let err = build_features(&series, &params).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::InvalidWindow { name: "sma_fast" }
        ));
    }

    #[test]
    fn feature_vector_matches_column_order() {
        let series = fixture_series(25);
        let rows = build_features(&series, &FeatureParams::default()).expect("must build");
        assert_eq!(rows[0].feature_vector().len(), FEATURE_COLUMNS.len());
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: FeatureParams = serde_json::from_str("{\"rsi_period\": 7}")
            .expect("must deserialize");
        assert_eq!(params.rsi_period, 7);
        assert_eq!(params.sma_slow, 20);
    }
}
