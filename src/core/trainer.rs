use crate::core::features::{LagOrder, derive_features};
use crate::core::model::{ForestParams, ModelSetup, PriceModel};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::load_all;
use crate::errors::AppResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the model handed out by [`ModelCache::load_or_train`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Already held by the cache.
    Memory,
    /// Read back from the persisted artifact.
    Artifact,
    /// Fitted on the current records because no usable artifact existed.
    Trained,
}

/// Fits a model on the whole store and persists it.
pub struct ModelTrainer<'a> {
    pool: &'a DbPool,
    lag_order: LagOrder,
    params: ForestParams,
    artifact: &'a Path,
}

impl<'a> ModelTrainer<'a> {
    pub fn new(
        pool: &'a DbPool,
        lag_order: LagOrder,
        params: ForestParams,
        artifact: &'a Path,
    ) -> Self {
        Self {
            pool,
            lag_order,
            params,
            artifact,
        }
    }

    pub fn train(&self) -> AppResult<PriceModel> {
        let records = load_all(self.pool)?;
        let rows = derive_features(&records, self.lag_order);

        info!(
            records = records.len(),
            rows = rows.len(),
            n_trees = self.params.n_trees,
            "training random forest"
        );

        let setup = ModelSetup {
            lag_order: self.lag_order,
            forest: self.params,
        };
        let model = PriceModel::fit(&rows, setup)?;
        model.save(self.artifact)?;

        info!(path = %self.artifact.display(), "model artifact written");
        ttlog_quiet(
            &self.pool.conn,
            "train",
            &self.artifact.display().to_string(),
            &format!("Model trained on {} rows", model.trained_rows()),
        );

        Ok(model)
    }
}

/// Cache-aside holder of the fitted model.
///
/// The first successful `load_or_train` is kept until `mark_dirty` or
/// `reset`; new records alone never refresh it.
pub struct ModelCache {
    path: PathBuf,
    setup: ModelSetup,
    model: Option<PriceModel>,
}

impl ModelCache {
    /// `setup` is what a persisted artifact must have been trained with to
    /// be reused.
    pub fn new(path: impl Into<PathBuf>, setup: ModelSetup) -> Self {
        Self {
            path: path.into(),
            setup,
            model: None,
        }
    }

    pub fn artifact_path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Cached model, else the persisted artifact, else `train()`.
    ///
    /// Artifact failures are logged and recovered by training; training
    /// failures are returned.
    pub fn load_or_train<F>(&mut self, train: F) -> AppResult<(&PriceModel, ModelSource)>
    where
        F: FnOnce() -> AppResult<PriceModel>,
    {
        if let Some(model) = self.model.take() {
            let model: &PriceModel = self.model.insert(model);
            return Ok((model, ModelSource::Memory));
        }

        let (model, source) = match PriceModel::load(&self.path, &self.setup) {
            Ok(model) => {
                info!(path = %self.path.display(), "loaded persisted model");
                (model, ModelSource::Artifact)
            }
            Err(e) => {
                warn!(error = %e, "no usable model artifact, retraining");
                (train()?, ModelSource::Trained)
            }
        };

        let model: &PriceModel = self.model.insert(model);
        Ok((model, source))
    }

    /// Replace the cached model, e.g. after an explicit retrain.
    pub fn store(&mut self, model: PriceModel) -> &PriceModel {
        self.model.insert(model)
    }

    /// Forget the cached model and delete the artifact so the next
    /// `load_or_train` fits on the current records.
    pub fn mark_dirty(&mut self) -> AppResult<()> {
        self.model = None;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!(path = %self.path.display(), "model artifact invalidated");
        }
        Ok(())
    }

    /// Drop the in-memory model only; the artifact stays on disk.
    pub fn reset(&mut self) {
        self.model = None;
    }
}
