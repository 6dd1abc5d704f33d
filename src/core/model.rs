//! Random-forest price model and its on-disk artifact.

use crate::config::Config;
use crate::core::features::LagOrder;
use crate::errors::{AppError, AppResult};
use crate::models::feature_row::FeatureRow;
use chrono::Local;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Bumped whenever the artifact layout or the feature columns change.
pub const MODEL_FORMAT_VERSION: u32 = 1;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Hyperparameters of the forest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl ForestParams {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            n_trees: cfg.n_trees.max(1),
            max_depth: cfg.max_depth,
            min_samples_split: cfg.min_samples_split.max(2),
            seed: cfg.seed,
        }
    }

    fn to_smartcore(self) -> RandomForestRegressorParameters {
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees)
            .with_min_samples_split(self.min_samples_split)
            .with_seed(self.seed);

        match self.max_depth {
            Some(depth) => params.with_max_depth(depth),
            None => params,
        }
    }
}

impl Default for ForestParams {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything that shapes a fitted model besides the records themselves.
///
/// Stored in the artifact; an artifact built under another setup is not
/// reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSetup {
    pub lag_order: LagOrder,
    pub forest: ForestParams,
}

#[derive(Serialize, Deserialize)]
pub struct PriceModel {
    format_version: u32,
    setup: ModelSetup,
    trained_rows: usize,
    trained_at: String,
    forest: Forest,
}

impl PriceModel {
    pub fn fit(rows: &[FeatureRow], setup: ModelSetup) -> AppResult<Self> {
        if rows.is_empty() {
            return Err(AppError::InsufficientData(
                "no price records available; upload a CSV first".into(),
            ));
        }

        let x: Vec<Vec<f64>> = rows.iter().map(FeatureRow::features).collect();
        let y: Vec<f64> = rows.iter().map(|r| r.target_price).collect();

        let x_matrix = DenseMatrix::from_2d_vec(&x)
            .map_err(|e| AppError::Training(format!("matrix error: {}", e)))?;

        let forest = RandomForestRegressor::fit(&x_matrix, &y, setup.forest.to_smartcore())
            .map_err(|e| AppError::Training(e.to_string()))?;

        Ok(Self {
            format_version: MODEL_FORMAT_VERSION,
            setup,
            trained_rows: rows.len(),
            trained_at: Local::now().to_rfc3339(),
            forest,
        })
    }

    /// Point estimate for one `(month, lag_price)` pair.
    ///
    /// The month is handed to the forest as-is. The forest never saw values
    /// outside 1-12, so the output for such months is unspecified.
    pub fn predict_one(&self, month: u32, lag_price: f64) -> AppResult<f64> {
        let input = DenseMatrix::from_2d_vec(&vec![vec![month as f64, lag_price]])
            .map_err(|e| AppError::PredictionInput(format!("matrix error: {}", e)))?;

        let predictions = self
            .forest
            .predict(&input)
            .map_err(|e| AppError::PredictionInput(e.to_string()))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| AppError::PredictionInput("model returned no value".into()))
    }

    pub fn trained_rows(&self) -> usize {
        self.trained_rows
    }

    pub fn trained_at(&self) -> &str {
        &self.trained_at
    }

    pub fn setup(&self) -> &ModelSetup {
        &self.setup
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Read an artifact written by [`PriceModel::save`].
    ///
    /// Every failure (missing file, corrupt content, other format version,
    /// a setup other than `expected`) is reported as [`AppError::ModelArtifact`].
    pub fn load(path: &Path, expected: &ModelSetup) -> AppResult<Self> {
        let file = File::open(path)
            .map_err(|e| AppError::ModelArtifact(format!("{}: {}", path.display(), e)))?;

        let model: PriceModel = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| AppError::ModelArtifact(format!("{}: {}", path.display(), e)))?;

        if model.format_version != MODEL_FORMAT_VERSION {
            return Err(AppError::ModelArtifact(format!(
                "{}: format version {} (expected {})",
                path.display(),
                model.format_version,
                MODEL_FORMAT_VERSION
            )));
        }

        if model.setup != *expected {
            return Err(AppError::ModelArtifact(format!(
                "{}: trained with {:?}, configured {:?}",
                path.display(),
                model.setup,
                expected
            )));
        }

        Ok(model)
    }
}
