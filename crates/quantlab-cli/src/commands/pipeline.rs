use serde_json::json;

use crate::cli::{RunArgs, TrainArgs};
use crate::config::PipelineConfig;
use crate::error::CliError;

use super::CommandResult;
use super::{backtest, features, ingest, train};

/// The `run` command: every stage in sequence, stopping at the first
/// failure. Stage payloads and warnings are pooled into one result.
pub fn run(args: &RunArgs, config: &PipelineConfig) -> Result<CommandResult, CliError> {
    let CommandResult {
        data: ingest_data,
        warnings: ingest_warnings,
        ..
    } = ingest::run(config)?;

    let CommandResult {
        data: features_data,
        warnings: features_warnings,
        ..
    } = features::run(config)?;

    let train_args = TrainArgs {
        splits: args.splits,
    };
    let CommandResult {
        data: train_data,
        warnings: train_warnings,
        ..
    } = train::run(&train_args, config)?;

    let CommandResult {
        data: backtest_data,
        warnings: backtest_warnings,
        ..
    } = backtest::run(config)?;

    let data = json!({
        "ingest": ingest_data,
        "features": features_data,
        "train": train_data,
        "backtest": backtest_data,
    });

    Ok(CommandResult::ok("run", data)
        .with_warnings(ingest_warnings)
        .with_warnings(features_warnings)
        .with_warnings(train_warnings)
        .with_warnings(backtest_warnings))
}
