mod backtest;
mod dataset;
mod features;
mod ingest;
mod pipeline;
mod train;

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::config::PipelineConfig;
use crate::error::CliError;

/// Uniform result shape every command reports, rendered by [`crate::output`].
#[derive(Debug, Serialize)]
pub struct CommandResult {
    pub command: &'static str,
    pub data: Value,
    pub warnings: Vec<String>,
    pub elapsed_ms: u64,
}

impl CommandResult {
    pub fn ok(command: &'static str, data: Value) -> Self {
        Self {
            command,
            data,
            warnings: Vec::new(),
            elapsed_ms: 0,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = PipelineConfig::load(&cli.config)?;
    let started = Instant::now();

    let mut result = match &cli.command {
        Command::Ingest => ingest::run(&config)?,
        Command::Features => features::run(&config)?,
        Command::Train(args) => train::run(args, &config)?,
        Command::Backtest => backtest::run(&config)?,
        Command::Run(args) => pipeline::run(args, &config)?,
    };

    result.elapsed_ms = elapsed_ms(started);
    Ok(result)
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
