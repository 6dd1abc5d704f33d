//! Explicit context object tying the store, the model cache and the settings
//! together. Commands build one per invocation and pass it down.

use crate::config::Config;
use crate::core::features::LagOrder;
use crate::core::model::{ForestParams, ModelSetup, PriceModel};
use crate::core::predictor::{self, Prediction};
use crate::core::trainer::{ModelCache, ModelSource, ModelTrainer};
use crate::db::initialize::ensure_schema;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{append, latest_record, load_all};
use crate::errors::AppResult;
use crate::ingest::IngestReport;
use crate::models::price_record::PriceRecord;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub model_path: PathBuf,
    pub lag_order: LagOrder,
    pub forest: ForestParams,
    pub retrain_on_upload: bool,
    pub default_lag_price: f64,
}

impl PipelineSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            model_path: PathBuf::from(&cfg.model_path),
            lag_order: cfg.lag_order,
            forest: ForestParams::from_config(cfg),
            retrain_on_upload: cfg.retrain_on_upload,
            default_lag_price: cfg.default_lag_price,
        }
    }

    pub fn model_setup(&self) -> ModelSetup {
        ModelSetup {
            lag_order: self.lag_order,
            forest: self.forest,
        }
    }
}

pub struct Pipeline {
    pool: DbPool,
    settings: PipelineSettings,
    cache: ModelCache,
}

impl Pipeline {
    /// Wrap an open store; the schema is created if missing.
    pub fn new(pool: DbPool, settings: PipelineSettings) -> AppResult<Self> {
        ensure_schema(&pool.conn)?;
        let cache = ModelCache::new(settings.model_path.clone(), settings.model_setup());
        Ok(Self {
            pool,
            settings,
            cache,
        })
    }

    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::new(&cfg.database)?;
        Self::new(pool, PipelineSettings::from_config(cfg))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    pub fn records(&self) -> AppResult<Vec<PriceRecord>> {
        load_all(&self.pool)
    }

    /// Store the parsed upload and apply the retrain policy.
    pub fn ingest(&mut self, report: &IngestReport, source: &str) -> AppResult<usize> {
        let written = append(&mut self.pool, &report.records)?;
        info!(written, skipped = report.skipped.len(), source, "records appended");

        ttlog_quiet(
            &self.pool.conn,
            "upload",
            source,
            &format!(
                "Appended {} rows ({} skipped)",
                written,
                report.skipped.len()
            ),
        );

        // rows are already committed, so a failed invalidation must not fail the upload
        if written > 0
            && self.settings.retrain_on_upload
            && let Err(e) = self.cache.mark_dirty()
        {
            warn!(error = %e, "could not invalidate the model after upload");
        }

        Ok(written)
    }

    /// Fit on every stored record, persist, and make it the cached model.
    pub fn train(&mut self) -> AppResult<&PriceModel> {
        let model = self.trainer().train()?;
        Ok(self.cache.store(model))
    }

    pub fn load_or_train(&mut self) -> AppResult<(&PriceModel, ModelSource)> {
        let trainer = ModelTrainer::new(
            &self.pool,
            self.settings.lag_order,
            self.settings.forest,
            &self.settings.model_path,
        );
        self.cache.load_or_train(|| trainer.train())
    }

    pub fn mark_dirty(&mut self) -> AppResult<()> {
        self.cache.mark_dirty()
    }

    pub fn reset(&mut self) {
        self.cache.reset();
    }

    /// Lag used when the caller gives none: the latest stored price, or the
    /// configured fallback on an empty store.
    pub fn default_lag(&self) -> AppResult<f64> {
        let lag = latest_record(&self.pool)?
            .map(|r| r.modal_price)
            .unwrap_or(self.settings.default_lag_price);
        Ok(lag)
    }

    pub fn predict(&mut self, month: u32, lag_price: Option<f64>) -> AppResult<Prediction> {
        let lag_price = match lag_price {
            Some(lag) => lag,
            None => self.default_lag()?,
        };

        let (model, source) = self.load_or_train()?;
        let value = predictor::predict(model, month, lag_price)?;
        debug!(month, lag_price, value, ?source, "prediction");

        ttlog_quiet(
            &self.pool.conn,
            "predict",
            &format!("month={}", month),
            &format!("lag={:.2} -> {:.2}", lag_price, value),
        );

        Ok(Prediction {
            month,
            lag_price,
            value,
            source,
        })
    }

    fn trainer(&self) -> ModelTrainer<'_> {
        ModelTrainer::new(
            &self.pool,
            self.settings.lag_order,
            self.settings.forest,
            &self.settings.model_path,
        )
    }
}
