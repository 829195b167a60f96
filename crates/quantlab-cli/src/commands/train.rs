use serde_json::json;

use quantlab_ml::{train_and_select, Dataset, ModelArtifact};

use crate::cli::TrainArgs;
use crate::config::PipelineConfig;
use crate::error::CliError;

use super::dataset;
use super::CommandResult;

pub fn run(args: &TrainArgs, config: &PipelineConfig) -> Result<CommandResult, CliError> {
    if args.splits == 0 {
        return Err(CliError::Command(String::from(
            "--splits must be greater than zero",
        )));
    }

    let params = config.label_params()?;
    let kind = config.model_kind()?;
    let (labeled, warnings) = dataset::load_labeled_rows(config)?;

    let dataset = Dataset::from_labeled_rows(&labeled, params.task())?;
    let trained = train_and_select(&dataset, kind, args.splits, &config.model.params)?;

    let fold_scores = trained.fold_scores.clone();
    let best_score = trained.best_score;
    let artifact = ModelArtifact::new(trained, dataset.feature_names().to_vec());
    let path = config.artifact_path(kind, params.task());
    artifact.save(&path)?;

    let data = json!({
        "model": kind.as_str(),
        "task": params.task().as_str(),
        "rows": dataset.len(),
        "splits": args.splits,
        "fold_scores": fold_scores,
        "best_score": best_score,
        "artifact": path.display().to_string(),
    });
    Ok(CommandResult::ok("train", data).with_warnings(warnings))
}
