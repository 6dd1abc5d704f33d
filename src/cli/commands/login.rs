use crate::auth::{Authenticator, SessionStore, StaticAuthenticator};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { user, password } = cmd {
        let auth = StaticAuthenticator::from_config(cfg);
        let session = auth.authenticate(user, password)?;

        let store = SessionStore::for_config(cfg);
        store.save(&session)?;
        tracing::debug!(path = %store.path().display(), "session saved");

        let pipeline = Pipeline::open(cfg)?;
        ttlog_quiet(&pipeline.pool().conn, "login", user, "Session opened");

        success(format!("Welcome, {} 👋", session.user));
    }

    Ok(())
}
