//! # Quantlab Backtest
//!
//! Fee-aware signal backtesting for the quantlab research pipeline.
//!
//! ## Overview
//!
//! The engine replays a stream of `{date, close, signal}` rows: signals
//! are shifted forward one day before they earn returns, position
//! changes pay a flat basis-point fee, and equity compounds from 1.0.
//! The report module writes the resulting curve as CSV.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`engine`] | The shift/fee/compound replay loop |
//! | [`error`] | Backtest error types |
//! | [`report`] | Equity-curve CSV output |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quantlab_backtest::{run_backtest, BacktestParams};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rows = load_signal_rows()?;
//!     let frame = run_backtest(&rows, &BacktestParams::default())?;
//!     println!(
//!         "{} rows, {} trades, final equity {:.4}",
//!         frame.len(),
//!         frame.trades,
//!         frame.final_equity()
//!     );
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{
    run_backtest, BacktestFrame, BacktestParams, EquityPoint, SignalRow, DEFAULT_FEE_BPS,
};
pub use error::BacktestError;
pub use report::write_equity_csv;
