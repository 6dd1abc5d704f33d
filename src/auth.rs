//! Login gate.
//!
//! Credentials are a static plaintext set taken from the configuration.
//! Everything else talks to the [`Authenticator`] trait, so the set can be
//! swapped for a real identity provider without touching the pipeline.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use chrono::Local;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

pub trait Authenticator {
    /// Check `user`/`secret` and issue a session on success.
    fn authenticate(&self, user: &str, secret: &str) -> AppResult<Session>;
}

pub struct StaticAuthenticator {
    users: BTreeMap<String, String>,
}

impl StaticAuthenticator {
    pub fn new(users: BTreeMap<String, String>) -> Self {
        Self { users }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.users.clone())
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, user: &str, secret: &str) -> AppResult<Session> {
        match self.users.get(user) {
            Some(expected) if expected == secret => {
                info!(user, "login accepted");
                Ok(Session {
                    user: user.to_string(),
                    token: Uuid::new_v4().to_string(),
                    created_at: Local::now().to_rfc3339(),
                })
            }
            _ => {
                warn!(user, "login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

/// Session persisted between CLI invocations.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_config(cfg: &Config) -> Self {
        Self::new(cfg.session_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(session)?)?;
        Ok(())
    }

    /// Current session, `None` when logged out or the file is unreadable.
    pub fn current(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_yaml::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                None
            }
        }
    }

    /// Remove the session; returns whether one existed.
    pub fn clear(&self) -> AppResult<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Session required by the data commands.
    pub fn require(&self) -> AppResult<Session> {
        self.current().ok_or(AppError::NotAuthenticated)
    }
}
