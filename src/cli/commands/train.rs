use crate::cli::commands::require_login;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Retrain on every stored record, replacing the persisted model.
pub fn handle(cfg: &Config) -> AppResult<()> {
    require_login(cfg)?;

    let mut pipeline = Pipeline::open(cfg)?;
    info(format!(
        "Training random forest ({} trees) on stored records…",
        pipeline.settings().forest.n_trees
    ));

    let model = pipeline.train()?;
    let rows = model.trained_rows();
    let trained_at = model.trained_at().to_string();

    success(format!(
        "Model trained on {} rows ({}) and saved to {}",
        rows,
        trained_at,
        pipeline.cache().artifact_path().display()
    ));
    Ok(())
}
