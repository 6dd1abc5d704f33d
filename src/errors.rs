//! Unified application error type.
//! All modules (db, ingest, core, auth, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Ingestion errors
    // ---------------------------
    #[error("CSV must contain 'date' and 'modal_price' columns (missing: {0})")]
    SchemaMismatch(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Model pipeline errors
    // ---------------------------
    #[error("Not enough data to train a model: {0}")]
    InsufficientData(String),

    #[error("Model artifact unusable: {0}")]
    ModelArtifact(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Prediction input rejected: {0}")]
    PredictionInput(String),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in: run `arecanut login --user <NAME> --password <SECRET>` first")]
    NotAuthenticated,

    // ---------------------------
    // Config / serialization
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
