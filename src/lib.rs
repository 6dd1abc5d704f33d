//! arecanut library root.
//! Exposes CLI parser, high-level run() function, and the price pipeline.

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Login { .. } => cli::commands::login::handle(&cli.command, cfg),
        Commands::Logout => cli::commands::logout::handle(cfg),
        Commands::Upload { .. } => cli::commands::upload::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Visualize { .. } => cli::commands::visualize::handle(&cli.command, cfg),
        Commands::Train => cli::commands::train::handle(cfg),
        Commands::Predict { .. } => cli::commands::predict::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::About => cli::commands::about::handle(cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    logging::init();

    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line overrides for the database / model paths
    cfg.apply_overrides(cli.db.as_deref(), cli.model.as_deref());
    tracing::debug!(database = %cfg.database, model = %cfg.model_path, "configuration resolved");

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
