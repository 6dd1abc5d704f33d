use crate::auth::SessionStore;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = SessionStore::for_config(cfg);
    let user = store.current().map(|s| s.user);

    if store.clear()? {
        let pipeline = Pipeline::open(cfg)?;
        ttlog_quiet(
            &pipeline.pool().conn,
            "logout",
            user.as_deref().unwrap_or(""),
            "Session closed",
        );
        success("Logged out.");
    } else {
        info("No active session.");
    }

    Ok(())
}
