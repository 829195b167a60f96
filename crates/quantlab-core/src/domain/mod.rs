//! # Domain Models
//!
//! Canonical domain types for quantlab market data.
//!
//! ## Overview
//!
//! Strongly-typed domain models with built-in validation:
//!
//! - **Type-safe**: Invalid states are unrepresentable
//! - **Validated**: Construction validates all invariants
//! - **Serializable**: Full serde support for JSON and CSV rows
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DailyBar`] | Daily OHLCV bar with optional exchange extras |
//! | [`BarSeries`] | Date-ordered bars for one symbol |
//! | [`Symbol`] | Validated exchange ticker |
//! | [`TradeDate`] | Calendar trading date |
//!
//! ## Validation
//!
//! Domain types enforce invariants at construction time:
//!
//! ```rust,ignore
//! use quantlab_core::{DailyBar, TradeDate, ValidationError};
//!
//! let date = TradeDate::parse("2024-01-02")?;
//! let bar = DailyBar::from_ohlcv(date, 100.0, 105.0, 95.0, 102.0, 1_000.0)?;
//!
//! // Invalid bar (high < low) - returns ValidationError
//! let invalid = DailyBar::from_ohlcv(date, 100.0, 95.0, 105.0, 102.0, 1_000.0);
//! assert!(matches!(invalid, Err(ValidationError::InvalidBarRange)));
//! ```

mod bar;
mod date;
mod symbol;

pub use bar::{BarSeries, DailyBar};
pub use date::TradeDate;
pub use symbol::Symbol;
