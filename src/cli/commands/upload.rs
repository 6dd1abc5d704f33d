use crate::cli::commands::require_login;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::errors::AppResult;
use crate::ingest::read_csv_path;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Upload a CSV file into the price table.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Upload { file } = cmd {
        require_login(cfg)?;

        //
        // 1. Parse the whole file first: a rejected file writes nothing
        //
        let report = read_csv_path(Path::new(file))?;

        for row in &report.skipped {
            warning(format!("line {}: {} (skipped)", row.line, row.reason));
        }

        //
        // 2. Append
        //
        let mut pipeline = Pipeline::open(cfg)?;
        let written = pipeline.ingest(&report, file)?;

        success(format!(
            "Data uploaded to database successfully! {} of {} rows stored.",
            written,
            report.total_rows()
        ));

        if written > 0 && cfg.retrain_on_upload {
            info("The model will be retrained on the next prediction.");
        }
    }

    Ok(())
}
