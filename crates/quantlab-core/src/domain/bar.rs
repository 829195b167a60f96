use serde::{Deserialize, Serialize};

use crate::{Symbol, TradeDate, ValidationError};

/// Canonical daily OHLCV bar for one symbol.
///
/// The optional fields carry exchange extras from the bhavcopy feed; they
/// ride along for reporting but are never model features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: TradeDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub last: Option<f64>,
    pub prev_close: Option<f64>,
    pub turnover: Option<f64>,
}

impl DailyBar {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: TradeDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        last: Option<f64>,
        prev_close: Option<f64>,
        turnover: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        validate_non_negative("volume", volume)?;
        validate_optional_non_negative("last", last)?;
        validate_optional_non_negative("prev_close", prev_close)?;
        validate_optional_non_negative("turnover", turnover)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            last,
            prev_close,
            turnover,
        })
    }

    /// Bar with only the OHLCV fields populated.
    pub fn from_ohlcv(
        date: TradeDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(date, open, high, low, close, volume, None, None, None)
    }
}

/// Date-ordered daily bars for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub bars: Vec<DailyBar>,
}

impl BarSeries {
    /// Build a series, enforcing strictly ascending dates with no duplicates.
    pub fn from_bars(symbol: Symbol, bars: Vec<DailyBar>) -> Result<Self, ValidationError> {
        for pair in bars.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.date == prev.date {
                return Err(ValidationError::DuplicateBarDate {
                    date: next.date.format_iso(),
                });
            }
            if next.date < prev.date {
                return Err(ValidationError::OutOfOrderBarDate {
                    date: next.date.format_iso(),
                });
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.low).collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> TradeDate {
        TradeDate::parse(input).expect("test date must parse")
    }

    #[test]
    fn builds_valid_bar() {
        let bar = DailyBar::from_ohlcv(date("2024-01-02"), 100.0, 104.0, 99.0, 102.5, 1_000.0)
            .expect("must build");
        assert_eq!(bar.close, 102.5);
        assert_eq!(bar.last, None);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DailyBar::from_ohlcv(date("2024-01-02"), 100.0, 99.0, 101.0, 100.0, 0.0)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));
    }

    #[test]
    fn rejects_close_outside_range() {
        let err = DailyBar::from_ohlcv(date("2024-01-02"), 100.0, 104.0, 99.0, 104.5, 0.0)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn rejects_non_finite_field() {
        let err = DailyBar::from_ohlcv(date("2024-01-02"), 100.0, 104.0, 99.0, f64::NAN, 0.0)
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue { field: "close" }
        ));
    }

    #[test]
    fn series_rejects_duplicate_dates() {
        let symbol = Symbol::parse("TCS").expect("symbol");
        let bar = DailyBar::from_ohlcv(date("2024-01-02"), 100.0, 104.0, 99.0, 102.0, 10.0)
            .expect("bar");
        let err = BarSeries::from_bars(symbol, vec![bar.clone(), bar]).expect_err("must fail");
        assert!(matches!(err, ValidationError::DuplicateBarDate { .. }));
    }

    #[test]
    fn series_rejects_out_of_order_dates() {
        let symbol = Symbol::parse("TCS").expect("symbol");
        let later = DailyBar::from_ohlcv(date("2024-01-03"), 100.0, 104.0, 99.0, 102.0, 10.0)
            .expect("bar");
        let earlier = DailyBar::from_ohlcv(date("2024-01-02"), 100.0, 104.0, 99.0, 102.0, 10.0)
            .expect("bar");
        let err = BarSeries::from_bars(symbol, vec![later, earlier]).expect_err("must fail");
        assert!(matches!(err, ValidationError::OutOfOrderBarDate { .. }));
    }
}
