//! Pipeline configuration loaded from a YAML file.
//!
//! One file drives every stage: which symbols to model, where the flat
//! files live, how labels are cut, which model to fit, and the fee the
//! simulator charges. Sections other than `symbols` and `storage` may be
//! omitted and fall back to the research defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use quantlab_backtest::BacktestParams;
use quantlab_core::{FeatureParams, LabelParams, Symbol, Task};
use quantlab_ml::{HyperParams, ModelKind};

use crate::error::CliError;

/// Top-level configuration for the research pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Symbols to ingest and model, in training order.
    pub symbols: Vec<String>,
    pub storage: StorageConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub labeling: LabelingConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub backtest: BacktestConfig,
    #[serde(default)]
    pub features: FeatureParams,
}

/// Directories each pipeline stage reads from and writes to.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Downloaded bhavcopy CSVs, one file per trading day.
    pub raw_dir: PathBuf,
    /// Per-symbol bar and feature tables.
    pub processed_dir: PathBuf,
    /// Saved model artifacts.
    pub models_dir: PathBuf,
    /// Backtest reports.
    pub reports_dir: PathBuf,
}

/// Bhavcopy parsing options.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Exchange series codes to keep; rows in any other series are dropped.
    #[serde(default = "default_series")]
    pub series: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            series: default_series(),
        }
    }
}

fn default_series() -> Vec<String> {
    vec![String::from("EQ")]
}

/// Forward-return labeling options.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelingConfig {
    /// Days ahead the label looks.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
    /// Prediction task: "classification" or "regression".
    #[serde(default = "default_task")]
    pub task: String,
    /// Return threshold (in percent) separating buy/hold/sell.
    #[serde(default = "default_threshold_pct")]
    pub threshold_pct: f64,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            task: default_task(),
            threshold_pct: default_threshold_pct(),
        }
    }
}

fn default_horizon_days() -> usize {
    5
}

fn default_task() -> String {
    String::from("classification")
}

fn default_threshold_pct() -> f64 {
    1.0
}

/// Model selection and hyperparameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model family: "logistic", "linear", or "random_forest".
    #[serde(rename = "type", default = "default_model_type")]
    pub kind: String,
    #[serde(default)]
    pub params: HyperParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: default_model_type(),
            params: HyperParams::default(),
        }
    }
}

fn default_model_type() -> String {
    String::from("random_forest")
}

/// Simulator options.
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestConfig {
    /// Cost per position change, in basis points.
    #[serde(default = "default_fee_bps")]
    pub fee_bps: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            fee_bps: default_fee_bps(),
        }
    }
}

fn default_fee_bps() -> f64 {
    quantlab_backtest::DEFAULT_FEE_BPS
}

impl PipelineConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!("failed to read {}: {error}", path.display()))
        })?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.symbols.is_empty() {
            return Err(CliError::Config(String::from(
                "symbols must list at least one symbol",
            )));
        }
        Ok(())
    }

    /// Configured symbols parsed into the validated domain type.
    pub fn parsed_symbols(&self) -> Result<Vec<Symbol>, CliError> {
        self.symbols
            .iter()
            .map(|raw| Symbol::parse(raw).map_err(CliError::from))
            .collect()
    }

    /// Labeling section as validated label parameters.
    pub fn label_params(&self) -> Result<LabelParams, CliError> {
        let task = Task::from_str(&self.labeling.task)?;
        LabelParams::new(self.labeling.horizon_days, task, self.labeling.threshold_pct)
            .map_err(CliError::from)
    }

    /// Model section's family parsed into the typed kind.
    pub fn model_kind(&self) -> Result<ModelKind, CliError> {
        ModelKind::from_str(&self.model.kind).map_err(CliError::from)
    }

    /// Backtest section as validated simulator parameters.
    pub fn backtest_params(&self) -> Result<BacktestParams, CliError> {
        BacktestParams::new(self.backtest.fee_bps).map_err(CliError::from)
    }

    /// Where the trained model artifact lives for a kind/task pair.
    pub fn artifact_path(&self, kind: ModelKind, task: Task) -> PathBuf {
        self.storage
            .models_dir
            .join(format!("model_{}_{}.json", kind.as_str(), task.as_str()))
    }

    /// Per-symbol bar table path.
    pub fn bars_path(&self, symbol: &Symbol) -> PathBuf {
        self.storage
            .processed_dir
            .join(format!("{}.csv", symbol.as_str()))
    }

    /// Per-symbol feature table path.
    pub fn features_path(&self, symbol: &Symbol) -> PathBuf {
        self.storage
            .processed_dir
            .join(format!("{}_features.csv", symbol.as_str()))
    }

    /// Equity curve report path.
    pub fn equity_report_path(&self) -> PathBuf {
        self.storage.reports_dir.join("equity_curve.csv")
    }
}
