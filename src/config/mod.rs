use crate::core::features::LagOrder;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Static credential set used by the login gate (plaintext).
    #[serde(default = "default_users")]
    pub users: BTreeMap<String, String>,
    /// Lag value used by `predict` when the store is empty.
    #[serde(default = "default_lag_price")]
    pub default_lag_price: f64,
    #[serde(default)]
    pub lag_order: LagOrder,
    /// Drop the persisted model after every upload so the next prediction retrains.
    #[serde(default = "default_retrain_on_upload")]
    pub retrain_on_upload: bool,
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    #[serde(default)]
    pub max_depth: Option<u16>,
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_model_path() -> String {
    Config::model_file().to_string_lossy().to_string()
}
fn default_users() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("admin".to_string(), "admin123".to_string()),
        ("preethika".to_string(), "mca2025".to_string()),
    ])
}
fn default_lag_price() -> f64 {
    30000.0
}
fn default_retrain_on_upload() -> bool {
    true
}
fn default_n_trees() -> usize {
    100
}
fn default_min_samples_split() -> usize {
    2
}
fn default_seed() -> u64 {
    42
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            model_path: default_model_path(),
            users: default_users(),
            default_lag_price: default_lag_price(),
            lag_order: LagOrder::default(),
            retrain_on_upload: default_retrain_on_upload(),
            n_trees: default_n_trees(),
            max_depth: None,
            min_samples_split: default_min_samples_split(),
            seed: default_seed(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("arecanut")
        } else {
            let home = env::var("HOME")
                .map(PathBuf::from)
                .ok()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            home.join(".arecanut")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("arecanut.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("arecanut.db")
    }

    /// Return the full path of the persisted model artifact
    pub fn model_file() -> PathBuf {
        Self::config_dir().join("model.json")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let cfg = serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply `--db` / `--model` overrides.
    ///
    /// A custom database without an explicit model path keeps its model
    /// artifact beside it, so separate stores never share a model.
    pub fn apply_overrides(&mut self, db: Option<&str>, model: Option<&str>) {
        if let Some(db) = db {
            self.database = db.to_string();
            self.model_path = Path::new(db)
                .with_extension("model.json")
                .to_string_lossy()
                .to_string();
        }
        if let Some(model) = model {
            self.model_path = model.to_string();
        }
    }

    /// Session file of the login gate, kept beside the database.
    pub fn session_file(&self) -> PathBuf {
        Path::new(&self.database).with_extension("session")
    }

    /// Initialize configuration file and database directory
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(self)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = Path::new(&self.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(())
    }
}
