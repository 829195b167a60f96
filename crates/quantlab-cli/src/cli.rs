//! CLI argument definitions for Quantlab.
//!
//! This module contains the command-line interface structure using Clap.
//! The CLI drives the daily-equity research pipeline end to end: bhavcopy
//! ingestion, feature building, model training, and signal backtesting.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ingest` | Parse raw bhavcopy files into per-symbol bar CSVs |
//! | `features` | Build indicator feature tables per symbol |
//! | `train` | Train the configured model with walk-forward validation |
//! | `backtest` | Replay the saved model's signals through the simulator |
//! | `run` | Execute the full pipeline in sequence |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | `config/config.yaml` | Pipeline configuration file |
//! | `--format` | `table` | Output format (table, json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//!
//! # Examples
//!
//! ```bash
//! # Parse downloaded bhavcopy files into per-symbol bars
//! quantlab ingest
//!
//! # Train on an alternate configuration with more folds
//! quantlab --config research.yaml train --splits 8
//!
//! # Full pipeline with machine-readable output
//! quantlab run --format json --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Quantlab - daily-equity research pipeline CLI
///
/// Turns exchange bhavcopy files into per-symbol bar tables, derives an
/// indicator feature set, trains a signal model with walk-forward
/// validation, and backtests the resulting signals.
#[derive(Debug, Parser)]
#[command(
    name = "quantlab",
    author,
    version,
    about = "Daily-equity research pipeline",
    long_about = "Quantlab is a research pipeline for daily equity data. It parses exchange \
bhavcopy files into per-symbol bar tables, derives an indicator feature set, trains a \
signal model with walk-forward validation, and backtests the signals net of fees.\n\
\n\
Each stage reads and writes flat CSV files under the configured storage directories, \
so stages can be re-run independently.\n\
\n\
Use 'quantlab <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Path to the pipeline configuration file.
    #[arg(long, global = true, default_value = "config/config.yaml")]
    pub config: PathBuf,

    /// Output format for results.
    ///
    /// - table: aligned key/value lines for terminal display (default)
    /// - json: single JSON object
    /// - ndjson: one JSON object per line
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    ///
    /// Useful for scheduled runs that must not silently skip symbols.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value lines for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse downloaded bhavcopy CSVs into per-symbol bar files.
    ///
    /// Reads every CSV under `storage.raw_dir`, keeps the configured
    /// series and symbols, merges with any existing per-symbol table
    /// (existing rows win on duplicate dates), and writes one file per
    /// symbol under `storage.processed_dir`.
    ///
    /// # Examples
    ///
    ///   quantlab ingest
    ///   quantlab --config research.yaml ingest
    Ingest,

    /// Build indicator feature tables for each ingested symbol.
    ///
    /// Reads the per-symbol bar files and writes `<SYMBOL>_features.csv`
    /// tables containing returns, the indicator suite, and lag columns.
    /// Rows inside the indicator warm-up window are dropped.
    ///
    /// # Examples
    ///
    ///   quantlab features
    Features,

    /// Train the configured model with walk-forward validation.
    ///
    /// Labels the feature tables with forward returns, splits the pooled
    /// dataset into expanding walk-forward folds, fits one model per fold,
    /// and saves the best-scoring fold's model as a JSON artifact under
    /// `storage.models_dir`.
    ///
    /// # Examples
    ///
    ///   quantlab train
    ///   quantlab train --splits 8
    Train(TrainArgs),

    /// Replay the saved model's signals through the fee-aware simulator.
    ///
    /// Loads the model artifact, predicts a signal for every labeled row,
    /// applies each signal one day late, and writes the equity curve to
    /// `storage.reports_dir/equity_curve.csv`.
    ///
    /// # Examples
    ///
    ///   quantlab backtest
    Backtest,

    /// Run ingest, features, train, and backtest in sequence.
    ///
    /// # Examples
    ///
    ///   quantlab run
    ///   quantlab run --format json --pretty
    Run(RunArgs),
}

/// Arguments for the `train` command.
#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Number of walk-forward validation splits.
    #[arg(long, default_value_t = quantlab_ml::DEFAULT_SPLITS)]
    pub splits: usize,
}

/// Arguments for the `run` command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Number of walk-forward validation splits.
    #[arg(long, default_value_t = quantlab_ml::DEFAULT_SPLITS)]
    pub splits: usize,
}
