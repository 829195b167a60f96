//! Technical indicator primitives over ordered price series.
//!
//! Every function returns output aligned one-to-one with its input by
//! position. Warm-up positions without enough history hold `f64::NAN`;
//! downstream consumers drop incomplete rows, so NaN never escapes the
//! feature builder.
//!
//! Exponential averages use the recursive form `y[t] = a*x[t] + (1-a)*y[t-1]`
//! seeded by the first defined input, with no bias correction.

use crate::ValidationError;

/// Guard divisor for ratio indicators.
const EPSILON: f64 = 1e-9;

/// Trailing simple moving average; the first `window - 1` positions are NaN.
pub fn sma(series: &[f64], window: usize) -> Result<Vec<f64>, ValidationError> {
    validate_series(series)?;
    validate_window("sma window", window)?;

    let mut out = vec![f64::NAN; series.len()];
    for i in (window - 1)..series.len() {
        let sum: f64 = series[(i + 1 - window)..=i].iter().sum();
        out[i] = sum / window as f64;
    }
    Ok(out)
}

/// Exponential moving average with `alpha = 2 / (span + 1)`.
///
/// Seeded by the first value, so the output is defined from position 0.
pub fn ema(series: &[f64], span: usize) -> Result<Vec<f64>, ValidationError> {
    validate_series(series)?;
    validate_window("ema span", span)?;

    let alpha = 2.0 / (span as f64 + 1.0);
    Ok(exponential_smooth(series, alpha))
}

/// Relative Strength Index over per-step price deltas.
///
/// Up and down moves are smoothed with center of mass `period - 1`
/// (`alpha = 1 / period`); the ratio is guarded by a small epsilon so a
/// series with no down moves saturates near 100 instead of dividing by
/// zero. Undefined at position 0 where no delta exists.
pub fn rsi(series: &[f64], period: usize) -> Result<Vec<f64>, ValidationError> {
    validate_series(series)?;
    validate_window("rsi period", period)?;

    let n = series.len();
    let mut up = vec![f64::NAN; n];
    let mut down = vec![f64::NAN; n];
    for i in 1..n {
        let delta = series[i] - series[i - 1];
        up[i] = delta.max(0.0);
        down[i] = (-delta).max(0.0);
    }

    let alpha = 1.0 / period as f64;
    let avg_up = exponential_smooth(&up, alpha);
    let avg_down = exponential_smooth(&down, alpha);

    let mut out = vec![f64::NAN; n];
    for i in 0..n {
        if avg_up[i].is_finite() && avg_down[i].is_finite() {
            let rs = avg_up[i] / (avg_down[i] + EPSILON);
            out[i] = 100.0 - 100.0 / (1.0 + rs);
        }
    }
    Ok(out)
}

/// The MACD line, its signal line, and their difference, aligned to input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Moving Average Convergence Divergence.
pub fn macd(
    series: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdSeries, ValidationError> {
    let ema_fast = ema(series, fast)?;
    let ema_slow = ema(series, slow)?;

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd_line, signal)?;
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    })
}

/// Bollinger middle, upper and lower bands, aligned to input.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger bands: SMA middle band with `k` sample standard deviations.
///
/// The rolling deviation uses the sample form (`n - 1` divisor), so a
/// window of 1 yields undefined bands.
pub fn bollinger_bands(
    series: &[f64],
    window: usize,
    k: f64,
) -> Result<BollingerSeries, ValidationError> {
    if !k.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "bollinger k" });
    }
    let middle = sma(series, window)?;

    let n = series.len();
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    if window >= 2 {
        for i in (window - 1)..n {
            let mean = middle[i];
            let variance: f64 = series[(i + 1 - window)..=i]
                .iter()
                .map(|x| (x - mean) * (x - mean))
                .sum::<f64>()
                / (window - 1) as f64;
            let deviation = variance.sqrt();
            upper[i] = mean + k * deviation;
            lower[i] = mean - k * deviation;
        }
    }

    Ok(BollingerSeries {
        middle,
        upper,
        lower,
    })
}

/// Per-step true range; the first value falls back to `high - low`.
pub fn true_range(
    high: &[f64],
    low: &[f64],
    close: &[f64],
) -> Result<Vec<f64>, ValidationError> {
    validate_series(high)?;
    validate_same_length("low", high.len(), low.len())?;
    validate_same_length("close", high.len(), close.len())?;

    let n = high.len();
    let mut out = vec![f64::NAN; n];
    out[0] = high[0] - low[0];
    for i in 1..n {
        let range = high[i] - low[i];
        let gap_high = (high[i] - close[i - 1]).abs();
        let gap_low = (low[i] - close[i - 1]).abs();
        out[i] = range.max(gap_high).max(gap_low);
    }
    Ok(out)
}

/// Average True Range: exponential smoothing of true range with
/// `alpha = 1 / period`, defined from position 0.
pub fn atr(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<Vec<f64>, ValidationError> {
    validate_window("atr period", period)?;
    let tr = true_range(high, low, close)?;
    Ok(exponential_smooth(&tr, 1.0 / period as f64))
}

/// Recursive exponential smoothing. Positions before the first finite
/// input stay NaN; the first finite value seeds the recurrence.
fn exponential_smooth(series: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = vec![f64::NAN; series.len()];
    let mut state: Option<f64> = None;
    for (i, &x) in series.iter().enumerate() {
        if x.is_finite() {
            let next = match state {
                Some(prev) => alpha * x + (1.0 - alpha) * prev,
                None => x,
            };
            state = Some(next);
            out[i] = next;
        } else if let Some(prev) = state {
            out[i] = prev;
        }
    }
    out
}

fn validate_series(series: &[f64]) -> Result<(), ValidationError> {
    if series.is_empty() {
        return Err(ValidationError::EmptySeries);
    }
    Ok(())
}

fn validate_window(name: &'static str, value: usize) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::InvalidWindow { name });
    }
    Ok(())
}

fn validate_same_length(
    series: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::SeriesLengthMismatch {
            series,
            expected,
            actual,
        });
    }
    Ok(())
}
