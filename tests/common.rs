#![allow(dead_code)]
use arecanut::core::features::LagOrder;
use arecanut::core::model::ForestParams;
use arecanut::core::pipeline::{Pipeline, PipelineSettings};
use arecanut::db::pool::DbPool;
use arecanut::models::price_record::NewPriceRecord;
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// The binary with HOME (and APPDATA) pointed at an empty temp dir so a
/// developer's own `~/.arecanut/arecanut.conf` is never read
pub fn arc() -> Command {
    let home = env::temp_dir().join("arecanut_test_home");
    fs::create_dir_all(&home).expect("create test home");
    let mut cmd = cargo_bin_cmd!("arecanut");
    cmd.env("HOME", &home).env("APPDATA", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any
/// leftover database, model artifact and session from a previous run
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_arecanut.db", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(path.with_extension("model.json")).ok();
    fs::remove_file(path.with_extension("session")).ok();
    db_path
}

/// Temp path for a model artifact, removed if present
pub fn temp_model(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_arecanut_model.json", name));
    fs::remove_file(&path).ok();
    path
}

/// Write a CSV upload inside tempdir and return its path
pub fn write_csv(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_upload.csv", name));
    fs::write(&path, content).expect("write csv");
    path.to_string_lossy().to_string()
}

pub const SAMPLE_CSV: &str = "date,modal_price\n2024-01-01,28000\n2024-02-01,29500\n2024-03-01,27000\n";

pub fn sample_records() -> Vec<NewPriceRecord> {
    vec![
        NewPriceRecord::new(ymd(2024, 1, 1), 28000.0),
        NewPriceRecord::new(ymd(2024, 2, 1), 29500.0),
        NewPriceRecord::new(ymd(2024, 3, 1), 27000.0),
    ]
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Small, seeded forest so tests stay fast and reproducible
pub fn test_settings(model_path: &Path) -> PipelineSettings {
    PipelineSettings {
        model_path: model_path.to_path_buf(),
        lag_order: LagOrder::Stored,
        forest: ForestParams {
            n_trees: 10,
            max_depth: None,
            min_samples_split: 2,
            seed: 7,
        },
        retrain_on_upload: true,
        default_lag_price: 30000.0,
    }
}

/// In-memory pipeline whose artifact lives at `model_path`
pub fn memory_pipeline(model_path: &Path) -> Pipeline {
    let pool = DbPool::in_memory().expect("open in-memory db");
    Pipeline::new(pool, test_settings(model_path)).expect("pipeline")
}

/// `init` + `login` through the binary
pub fn init_and_login(db_path: &str) {
    arc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    arc()
        .args([
            "--db", db_path, "login", "--user", "admin", "--password", "admin123",
        ])
        .assert()
        .success();
}
