use serde_json::json;

use quantlab_backtest::{run_backtest, write_equity_csv, SignalRow};
use quantlab_ml::ModelArtifact;

use crate::config::PipelineConfig;
use crate::error::CliError;

use super::dataset;
use super::CommandResult;

pub fn run(config: &PipelineConfig) -> Result<CommandResult, CliError> {
    let params = config.label_params()?;
    let kind = config.model_kind()?;
    let backtest_params = config.backtest_params()?;

    let artifact_path = config.artifact_path(kind, params.task());
    if !artifact_path.exists() {
        return Err(CliError::Command(format!(
            "no model artifact at {}, run train first",
            artifact_path.display()
        )));
    }
    let artifact = ModelArtifact::load(&artifact_path)?;

    let (labeled, warnings) = dataset::load_labeled_rows(config)?;

    let matrix: Vec<Vec<f64>> = labeled
        .iter()
        .map(|row| row.features.feature_vector())
        .collect();
    let signals = artifact.predict_signals(&matrix, params.threshold_pct())?;

    let signal_rows: Vec<SignalRow> = labeled
        .iter()
        .zip(&signals)
        .map(|(row, &signal)| SignalRow {
            date: row.features.date,
            symbol: row.features.symbol.clone(),
            close: row.features.close,
            signal,
        })
        .collect();

    let frame = run_backtest(&signal_rows, &backtest_params)?;
    let report_path = config.equity_report_path();
    write_equity_csv(&frame, &report_path)?;

    let data = json!({
        "rows": frame.len(),
        "trades": frame.trades,
        "final_equity": frame.final_equity(),
        "report": report_path.display().to_string(),
        "note": "in-sample signals, no train/test separation",
    });
    Ok(CommandResult::ok("backtest", data).with_warnings(warnings))
}
