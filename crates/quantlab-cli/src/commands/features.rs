use std::fs::File;

use serde_json::json;

use quantlab_core::{build_features, ingest};

use crate::config::PipelineConfig;
use crate::error::CliError;

use super::CommandResult;

pub fn run(config: &PipelineConfig) -> Result<CommandResult, CliError> {
    let symbols = config.parsed_symbols()?;

    let mut built = Vec::new();
    let mut warnings = Vec::new();
    for symbol in &symbols {
        let bars_path = config.bars_path(symbol);
        if !bars_path.exists() {
            warnings.push(format!("no bar table for {symbol}, run ingest first"));
            continue;
        }
        let records = ingest::read_bars_csv(File::open(&bars_path)?)?;
        let series = ingest::into_series(symbol.clone(), records)?;
        let rows = build_features(&series, &config.features)?;
        if rows.is_empty() {
            warnings.push(format!(
                "{symbol}: {} bars do not cover the indicator warm-up, no feature rows",
                series.len()
            ));
            continue;
        }
        let path = config.features_path(symbol);
        ingest::write_features_csv(File::create(&path)?, &rows)?;
        built.push(json!({
            "symbol": symbol.as_str(),
            "rows": rows.len(),
            "file": path.display().to_string(),
        }));
    }

    if built.is_empty() {
        return Err(CliError::Command(String::from(
            "no feature tables built; ingest data first",
        )));
    }

    Ok(CommandResult::ok("features", json!({ "symbols": built })).with_warnings(warnings))
}
