mod common;
use arecanut::core::features::LagOrder;
use arecanut::core::model::{ModelSetup, PriceModel};
use arecanut::core::pipeline::Pipeline;
use arecanut::core::predictor::predict;
use arecanut::core::trainer::{ModelCache, ModelSource};
use arecanut::db::pool::DbPool;
use arecanut::errors::AppError;
use arecanut::ingest::read_csv;
use common::{SAMPLE_CSV, memory_pipeline, temp_model, test_settings};
use std::env;
use std::fs;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_train_on_empty_store_fails() {
    let model_path = temp_model("train_empty");
    let mut pipeline = memory_pipeline(&model_path);

    let err = pipeline.train().err().expect("training must fail");
    assert!(matches!(err, AppError::InsufficientData(_)));
    assert!(!model_path.exists());
}

#[test]
fn test_load_or_train_on_empty_store_surfaces_error() {
    let model_path = temp_model("load_or_train_empty");
    let mut pipeline = memory_pipeline(&model_path);

    let err = pipeline.load_or_train().err().expect("must fail");
    assert!(matches!(err, AppError::InsufficientData(_)));
}

#[test]
fn test_end_to_end_scenario() {
    let model_path = temp_model("end_to_end");
    let mut pipeline = memory_pipeline(&model_path);

    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    assert_eq!(pipeline.ingest(&report, "sample.csv").expect("ingest"), 3);

    let stored = pipeline.records().expect("records");
    let prices: Vec<f64> = stored.iter().map(|r| r.modal_price).collect();
    assert_eq!(prices, vec![28000.0, 29500.0, 27000.0]);

    let model = pipeline.train().expect("training succeeds");
    assert_eq!(model.trained_rows(), 3);
    assert!(model_path.exists());

    let prediction = pipeline.predict(4, Some(27000.0)).expect("prediction");
    assert!(prediction.value.is_finite());
    assert_eq!(prediction.source, ModelSource::Memory);

    // a forest averages observed targets
    assert!(prediction.value >= 27000.0 && prediction.value <= 29500.0);
}

#[test]
fn test_prediction_is_finite_for_every_month() {
    let model_path = temp_model("every_month");
    let mut pipeline = memory_pipeline(&model_path);
    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    pipeline.ingest(&report, "sample.csv").expect("ingest");

    let (model, _) = pipeline.load_or_train().expect("model");
    for month in 1..=12 {
        for lag in [0.0, 15000.0, 27000.0, 1.0e6] {
            let value = predict(model, month, lag).expect("prediction");
            assert!(value.is_finite(), "month {month}, lag {lag}");
        }
    }
}

#[test]
fn test_load_or_train_without_artifact_matches_train() {
    let trained_path = temp_model("cache_aside_train");
    let cached_path = temp_model("cache_aside_cached");

    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");

    let mut direct = memory_pipeline(&trained_path);
    direct.ingest(&report, "sample.csv").expect("ingest");
    let direct_value = direct
        .train()
        .expect("train")
        .predict_one(4, 27000.0)
        .expect("predict");

    let mut cached = memory_pipeline(&cached_path);
    cached.ingest(&report, "sample.csv").expect("ingest");
    let (model, source) = cached.load_or_train().expect("load_or_train");
    assert_eq!(source, ModelSource::Trained);
    let cached_value = model.predict_one(4, 27000.0).expect("predict");

    assert!(close(direct_value, cached_value), "{direct_value} vs {cached_value}");
    assert!(cached_path.exists());
}

#[test]
fn test_valid_artifact_is_loaded_without_training() {
    let model_path = temp_model("artifact_reuse");

    let mut pipeline = memory_pipeline(&model_path);
    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    pipeline.ingest(&report, "sample.csv").expect("ingest");
    let expected = pipeline
        .train()
        .expect("train")
        .predict_one(7, 28000.0)
        .expect("predict");

    let mut cache = ModelCache::new(&model_path, pipeline.settings().model_setup());
    let mut trained = false;
    let (model, source) = cache
        .load_or_train(|| {
            trained = true;
            Err(AppError::Training("must not train".into()))
        })
        .expect("artifact loads");

    assert_eq!(source, ModelSource::Artifact);
    assert!(close(model.predict_one(7, 28000.0).expect("predict"), expected));
    assert!(!trained);
}

#[test]
fn test_cache_is_memoized_until_marked_dirty() {
    let model_path = temp_model("memoized");
    let mut pipeline = memory_pipeline(&model_path);
    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    pipeline.ingest(&report, "sample.csv").expect("ingest");

    let (_, first) = pipeline.load_or_train().expect("first");
    assert_eq!(first, ModelSource::Trained);

    let (_, second) = pipeline.load_or_train().expect("second");
    assert_eq!(second, ModelSource::Memory);

    pipeline.reset();
    let (_, after_reset) = pipeline.load_or_train().expect("after reset");
    assert_eq!(after_reset, ModelSource::Artifact);

    pipeline.mark_dirty().expect("mark dirty");
    assert!(!model_path.exists());
    assert!(!pipeline.cache().is_loaded());

    let (_, after_dirty) = pipeline.load_or_train().expect("after dirty");
    assert_eq!(after_dirty, ModelSource::Trained);
}

#[test]
fn test_upload_marks_model_dirty() {
    let model_path = temp_model("upload_dirty");
    let mut pipeline = memory_pipeline(&model_path);
    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    pipeline.ingest(&report, "sample.csv").expect("ingest");
    pipeline.load_or_train().expect("model");
    assert!(model_path.exists());

    let more = read_csv("date,modal_price\n2024-04-01,31000\n".as_bytes()).expect("csv");
    pipeline.ingest(&more, "more.csv").expect("ingest more");

    assert!(!model_path.exists());
    let (model, source) = pipeline.load_or_train().expect("retrain");
    assert_eq!(source, ModelSource::Trained);
    assert_eq!(model.trained_rows(), 4);
}

#[test]
fn test_corrupt_artifact_falls_back_to_training() {
    let model_path = temp_model("corrupt_artifact");
    let mut pipeline = memory_pipeline(&model_path);
    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    pipeline.ingest(&report, "sample.csv").expect("ingest");

    fs::write(&model_path, b"{ not a model").expect("write garbage");
    let setup = pipeline.settings().model_setup();
    let err = PriceModel::load(&model_path, &setup)
        .err()
        .expect("corrupt artifact");
    assert!(matches!(err, AppError::ModelArtifact(_)));

    let (model, source) = pipeline.load_or_train().expect("recovered");
    assert_eq!(source, ModelSource::Trained);
    assert!(model.predict_one(2, 28000.0).expect("predict").is_finite());

    // the rewritten artifact is valid again
    assert!(PriceModel::load(&model_path, &setup).is_ok());
}

#[test]
fn test_missing_artifact_is_reported_as_artifact_error() {
    let model_path = temp_model("missing_artifact");
    let err = PriceModel::load(&model_path, &ModelSetup::default())
        .err()
        .expect("no file");
    assert!(matches!(err, AppError::ModelArtifact(_)));
}

#[test]
fn test_fit_rejects_empty_rows() {
    let err = PriceModel::fit(&[], ModelSetup::default())
        .err()
        .expect("empty input");
    assert!(matches!(err, AppError::InsufficientData(_)));
}

#[test]
fn test_upload_keeps_model_when_retrain_disabled() {
    let model_path = temp_model("no_retrain");
    let mut settings = test_settings(&model_path);
    settings.retrain_on_upload = false;
    let pool = DbPool::in_memory().expect("open in-memory db");
    let mut pipeline = Pipeline::new(pool, settings).expect("pipeline");

    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    pipeline.ingest(&report, "sample.csv").expect("ingest");
    let (model, _) = pipeline.load_or_train().expect("model");
    let first_rows = model.trained_rows();

    let more = read_csv("date,modal_price\n2024-04-01,31000\n".as_bytes()).expect("csv");
    pipeline.ingest(&more, "more.csv").expect("ingest more");

    let (model, source) = pipeline.load_or_train().expect("cached model");
    assert_eq!(source, ModelSource::Memory);
    assert_eq!(model.trained_rows(), first_rows);
    assert!(model_path.exists());
    assert_eq!(pipeline.records().expect("records").len(), 4);
}

#[test]
fn test_artifact_from_other_setup_is_retrained() {
    let model_path = temp_model("setup_change");
    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");

    let mut pipeline = memory_pipeline(&model_path);
    pipeline.ingest(&report, "sample.csv").expect("ingest");
    pipeline.train().expect("train");

    let mut settings = test_settings(&model_path);
    settings.lag_order = LagOrder::Date;
    settings.forest.n_trees = 5;
    settings.retrain_on_upload = false;

    let err = PriceModel::load(&model_path, &settings.model_setup())
        .err()
        .expect("setup mismatch");
    assert!(matches!(err, AppError::ModelArtifact(_)));

    let expected = settings.model_setup();
    let pool = DbPool::in_memory().expect("open in-memory db");
    let mut reconfigured = Pipeline::new(pool, settings).expect("pipeline");
    reconfigured.ingest(&report, "sample.csv").expect("ingest");

    let (model, source) = reconfigured.load_or_train().expect("retrained");
    assert_eq!(source, ModelSource::Trained);
    assert_eq!(*model.setup(), expected);
    assert!(PriceModel::load(&model_path, &expected).is_ok());
}

#[test]
fn test_upload_succeeds_when_model_cannot_be_invalidated() {
    // a directory where the artifact should be makes the removal fail
    let model_path = env::temp_dir().join("arecanut_model_is_a_dir");
    fs::create_dir_all(&model_path).expect("create dir");
    let mut pipeline = memory_pipeline(&model_path);

    let report = read_csv(SAMPLE_CSV.as_bytes()).expect("csv");
    let written = pipeline.ingest(&report, "sample.csv").expect("upload");

    assert_eq!(written, 3);
    assert_eq!(pipeline.records().expect("records").len(), 3);
}
