use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::ensure_schema;
use crate::db::log;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with the `arecanut_prices` and `log` tables
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    cfg.init_all(cli.test)?;

    println!("⚙️  Initializing arecanut…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);
    println!("🌲 Model      : {}", &cfg.model_path);

    let conn = Connection::open(&cfg.database)?;
    ensure_schema(&conn)?;

    println!("✅ Database initialized at {}", &cfg.database);

    if let Err(e) = log::ttlog(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 arecanut initialization completed!");
    Ok(())
}
