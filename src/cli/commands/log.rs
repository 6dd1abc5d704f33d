use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::core::pipeline::Pipeline;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pipeline = Pipeline::open(cfg)?;
        LogLogic::print_log(pipeline.pool())?;
    }

    Ok(())
}
