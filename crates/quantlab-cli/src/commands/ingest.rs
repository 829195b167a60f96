use std::fs;
use std::fs::File;

use serde_json::json;

use quantlab_core::ingest;

use crate::config::PipelineConfig;
use crate::error::CliError;

use super::CommandResult;

pub fn run(config: &PipelineConfig) -> Result<CommandResult, CliError> {
    let symbols = config.parsed_symbols()?;

    let mut raw_files = Vec::new();
    for entry in fs::read_dir(&config.storage.raw_dir).map_err(|error| {
        CliError::Command(format!(
            "cannot read raw dir {}: {error}",
            config.storage.raw_dir.display()
        ))
    })? {
        let path = entry?.path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            raw_files.push(path);
        }
    }
    raw_files.sort();

    if raw_files.is_empty() {
        return Err(CliError::Command(format!(
            "no bhavcopy CSVs found under {}",
            config.storage.raw_dir.display()
        )));
    }

    let mut records = Vec::new();
    for path in &raw_files {
        let file = File::open(path)?;
        let parsed = ingest::parse_bhavcopy(file, &config.ingest.series)
            .map_err(|error| CliError::Command(format!("{}: {error}", path.display())))?;
        records.extend(parsed);
    }

    // Only configured symbols make it into the per-symbol tables.
    records.retain(|record| symbols.contains(&record.symbol));
    let mut grouped = ingest::group_by_symbol(records);

    fs::create_dir_all(&config.storage.processed_dir)?;

    let mut written = Vec::new();
    let mut warnings = Vec::new();
    for symbol in &symbols {
        let incoming = grouped.remove(symbol).unwrap_or_default();
        let path = config.bars_path(symbol);
        let existing = if path.exists() {
            ingest::read_bars_csv(File::open(&path)?)?
        } else {
            Vec::new()
        };
        let merged = ingest::merge_records(existing, incoming);
        if merged.is_empty() {
            warnings.push(format!("no rows for {symbol} in any raw file"));
            continue;
        }
        ingest::write_bars_csv(File::create(&path)?, &merged)?;
        written.push(json!({
            "symbol": symbol.as_str(),
            "rows": merged.len(),
            "file": path.display().to_string(),
        }));
    }

    let data = json!({
        "raw_files": raw_files.len(),
        "symbols": written,
    });
    Ok(CommandResult::ok("ingest", data).with_warnings(warnings))
}
