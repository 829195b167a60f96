//! Behavior-driven tests for signal backtesting
//!
//! Signals earn the next day's return, fees hit only the days the position
//! changes, and pooled multi-symbol rows are treated as one stream.

use quantlab_backtest::{run_backtest, BacktestParams};

use quantlab_tests::signal_rows;

// =============================================================================
// Equity arithmetic
// =============================================================================

#[test]
fn a_flat_price_keeps_equity_at_exactly_one_whatever_the_signals_do() {
    // Given: thirty days of an unmoving price and a restless signal
    let closes = vec![250.0; 30];
    let signals: Vec<i32> = (0..30).map(|i| [1, 0, -1][i % 3]).collect();
    let rows = signal_rows("TCS", &closes, &signals);

    // When: the stream replays with zero fees
    let frame =
        run_backtest(&rows, &BacktestParams::new(0.0).expect("params")).expect("backtest");

    // Then: every equity point is exactly 1.0
    assert!(frame.points.iter().all(|point| point.equity == 1.0));
    assert_eq!(frame.final_equity(), 1.0);
}

#[test]
fn holding_long_through_a_rally_with_no_fees_compounds_the_whole_move() {
    // Given: a steady 1% daily rally held long throughout
    let closes: Vec<f64> = (0..15).map(|i| 100.0 * 1.01f64.powi(i)).collect();
    let signals = vec![1; 15];
    let rows = signal_rows("RELIANCE", &closes, &signals);

    let frame =
        run_backtest(&rows, &BacktestParams::new(0.0).expect("params")).expect("backtest");

    // Then: final equity matches the full price ratio and never dips
    let expected = closes[14] / closes[0];
    assert!((frame.final_equity() - expected).abs() < 1e-9);
    assert!(frame
        .points
        .windows(2)
        .all(|pair| pair[1].equity >= pair[0].equity));
}

// =============================================================================
// Fees
// =============================================================================

#[test]
fn flipping_every_day_pays_the_fee_every_day_after_entry() {
    // Given: a flat price, a signal that reverses daily, and 100 bps fees
    let closes = vec![100.0; 10];
    let signals: Vec<i32> = (0..10).map(|i| if i % 2 == 0 { 1 } else { -1 }).collect();
    let rows = signal_rows("INFY", &closes, &signals);

    let frame =
        run_backtest(&rows, &BacktestParams::new(100.0).expect("params")).expect("backtest");

    // Then: the first day carries no position and no fee, every later day
    // pays exactly 1%
    assert_eq!(frame.points[0].strat_ret, 0.0);
    assert!(frame
        .points
        .iter()
        .skip(1)
        .all(|point| point.strat_ret == -0.01));
    assert_eq!(frame.trades, 9);
    assert!((frame.final_equity() - 0.99f64.powi(9)).abs() < 1e-12);
}

// =============================================================================
// Pooled symbols
// =============================================================================

#[test]
fn pooled_symbols_form_one_stream_so_the_seam_is_a_position_change() {
    // Given: two symbols back to back whose pooled signals flip at the seam
    let mut rows = signal_rows("RELIANCE", &[100.0, 101.0, 102.0], &[1, 1, 1]);
    rows.extend(signal_rows("TCS", &[50.0, 50.5, 51.0], &[-1, -1, -1]));

    let frame =
        run_backtest(&rows, &BacktestParams::new(100.0).expect("params")).expect("backtest");

    // Then: the entry and the seam flip are the only trades, and the seam
    // day books the spurious cross-symbol return; callers wanting isolated
    // curves run one backtest per symbol
    assert_eq!(frame.trades, 2);
    assert!(frame.points[3].strat_ret < -0.5);
}
