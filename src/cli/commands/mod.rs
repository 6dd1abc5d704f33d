pub mod about;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod login;
pub mod logout;
pub mod predict;
pub mod train;
pub mod upload;
pub mod visualize;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::session::Session;

/// Gate for the data commands: fails unless a session exists.
pub(crate) fn require_login(cfg: &Config) -> AppResult<Session> {
    SessionStore::for_config(cfg).require()
}
