use std::fs::File;

use quantlab_core::{ingest, label_rows, LabeledRow};

use crate::config::PipelineConfig;
use crate::error::CliError;

/// Read every configured symbol's feature table and label it, pooling the
/// rows in configuration order. Labels never cross a symbol boundary.
pub fn load_labeled_rows(
    config: &PipelineConfig,
) -> Result<(Vec<LabeledRow>, Vec<String>), CliError> {
    let symbols = config.parsed_symbols()?;
    let params = config.label_params()?;

    let mut labeled = Vec::new();
    let mut warnings = Vec::new();
    for symbol in &symbols {
        let path = config.features_path(symbol);
        if !path.exists() {
            warnings.push(format!("no feature table for {symbol}, run features first"));
            continue;
        }
        let rows = ingest::read_features_csv(File::open(&path)?)?;
        let mut symbol_labeled = label_rows(&rows, &params);
        if symbol_labeled.is_empty() {
            warnings.push(format!("{symbol}: no rows survive the label horizon"));
            continue;
        }
        labeled.append(&mut symbol_labeled);
    }

    if labeled.is_empty() {
        return Err(CliError::Command(String::from(
            "no labeled rows; build feature tables first",
        )));
    }

    Ok((labeled, warnings))
}
