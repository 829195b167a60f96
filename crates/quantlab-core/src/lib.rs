//! # Quantlab Core
//!
//! Domain types and numerical transforms for the quantlab research
//! pipeline.
//!
//! ## Overview
//!
//! This crate provides the computation core of quantlab:
//!
//! - **Canonical domain models** for symbols, trade dates and daily bars
//! - **Indicator library** of pure transforms (SMA, EMA, RSI, MACD,
//!   Bollinger bands, ATR)
//! - **Feature builder** deriving model-ready rows from raw bars
//! - **Labeler** attaching forward-return targets for supervised training
//! - **Bhavcopy normalization** mapping exchange files onto the canonical
//!   bar shape
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Domain models (DailyBar, BarSeries, Symbol, TradeDate) |
//! | [`error`] | Core error types |
//! | [`features`] | Feature engineering over a bar series |
//! | [`indicators`] | Technical indicator primitives |
//! | [`ingest`] | Bhavcopy normalization and bar CSV I/O |
//! | [`labels`] | Forward-return labeling |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quantlab_core::{
//!     build_features, label_rows, BarSeries, FeatureParams, LabelParams,
//!     Symbol, Task,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let series: BarSeries = load_bars()?;
//!
//!     // Derive indicator, return and lag features
//!     let rows = build_features(&series, &FeatureParams::default())?;
//!
//!     // Attach forward-return labels
//!     let params = LabelParams::new(5, Task::Classification, 1.0)?;
//!     let labeled = label_rows(&rows, &params);
//!
//!     println!("{} training rows", labeled.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────────────┐
//! │ Bhavcopy files   │
//! └────────┬─────────┘
//!          │ ingest (normalize, dedupe, sort)
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ BarSeries        │────▶│ Indicator        │
//! │ (per symbol)     │     │ Library          │
//! └────────┬─────────┘     └──────────────────┘
//!          │ build_features
//!          ▼
//! ┌──────────────────┐
//! │ FeatureRow table │
//! └────────┬─────────┘
//!          │ label_rows
//!          ▼
//! ┌──────────────────┐
//! │ LabeledRow table │──▶ model training / backtesting
//! └──────────────────┘
//! ```
//!
//! The core is synchronous and stateless: every transform is a pure
//! function over in-memory tables, independently re-invocable on the same
//! inputs.

pub mod domain;
pub mod error;
pub mod features;
pub mod indicators;
pub mod ingest;
pub mod labels;

pub use domain::{BarSeries, DailyBar, Symbol, TradeDate};
pub use error::{CoreError, ValidationError};
pub use features::{build_features, FeatureParams, FeatureRow, FEATURE_COLUMNS, FEATURE_LAGS};
pub use ingest::{
    group_by_symbol, into_series, merge_records, parse_bhavcopy, read_bars_csv, read_features_csv,
    write_bars_csv, write_features_csv, BarRecord,
};
pub use labels::{classify_return, label_rows, LabelParams, LabeledRow, Task};
