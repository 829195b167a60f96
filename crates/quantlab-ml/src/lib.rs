//! # Quantlab ML
//!
//! Walk-forward model training, selection and persistence for the
//! quantlab research pipeline.
//!
//! ## Overview
//!
//! This crate turns labeled feature rows into a persisted, applicable
//! model:
//!
//! - **Dataset assembly** from labeled rows into an aligned feature
//!   matrix, target vector and date index
//! - **Walk-forward splits** with expanding training windows and
//!   chronological, non-overlapping test blocks
//! - **Model variants** (logistic / linear baselines, random forest)
//!   behind one fit/predict seam so the ML backend stays swappable
//! - **Fold selection** keeping the model instance from the best-scoring
//!   fold (macro-F1 or negated MAE, strict improvement)
//! - **Artifacts** bundling the model with its ordered feature columns
//!   as pretty JSON
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`artifact`] | Persisted model bundle and signal derivation |
//! | [`dataset`] | Feature matrix plus aligned targets and dates |
//! | [`error`] | Training error types |
//! | [`metrics`] | Macro-F1 and mean absolute error |
//! | [`models`] | Model families behind the fit/predict seam |
//! | [`split`] | Walk-forward fold indices |
//! | [`train`] | The walk-forward training loop |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quantlab_core::Task;
//! use quantlab_ml::{train_and_select, Dataset, HyperParams, ModelArtifact, ModelKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let labeled = load_labeled_rows()?;
//!     let dataset = Dataset::from_labeled_rows(&labeled, Task::Classification)?;
//!
//!     let trained = train_and_select(
//!         &dataset,
//!         ModelKind::RandomForest,
//!         5,
//!         &HyperParams::default(),
//!     )?;
//!     println!("cv scores: {:?}", trained.fold_scores);
//!
//!     let features = dataset.feature_names().to_vec();
//!     ModelArtifact::new(trained, features).save("model.json".as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod split;
pub mod train;

pub use artifact::ModelArtifact;
pub use dataset::{Dataset, Targets};
pub use error::MlError;
pub use metrics::{macro_f1, mean_absolute_error, SIGNAL_CLASSES};
pub use models::{HyperParams, ModelKind, Prediction, Predictor};
pub use split::{walk_forward_splits, FoldIndices};
pub use train::{train_and_select, TrainedModel, DEFAULT_SPLITS};
