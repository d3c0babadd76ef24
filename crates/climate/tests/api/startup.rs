use crate::helpers::{example_dataset, get, loader_for, spawn_app, MockDatasetLoader};
use axum::http::StatusCode;
use climate::{build_app_state, db};
use std::sync::Arc;

#[tokio::test]
async fn dataset_is_loaded_once_for_many_requests() {
    // loader_for expects exactly one load call
    let test_app = spawn_app(Arc::new(loader_for(example_dataset()))).await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2017-08-20",
        "/api/v1.0/precipitation",
    ] {
        let (status, _) = get(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn load_failure_stops_startup() {
    let mut loader = MockDatasetLoader::new();
    loader
        .expect_load()
        .times(1)
        .returning(|| Err(db::Error::NotFound("./Resources/hawaii.sqlite".to_string())));
    loader
        .expect_source()
        .returning(|| "sqlite:./Resources/hawaii.sqlite".to_string());

    let result = build_app_state("http://127.0.0.1:5000".to_string(), Arc::new(loader), 365).await;

    let err = result.err().expect("startup should fail");
    assert!(err.to_string().contains("hawaii.sqlite"));
}

#[tokio::test]
async fn recent_window_length_is_configurable() {
    let state = build_app_state(
        "http://127.0.0.1:5000".to_string(),
        Arc::new(loader_for(example_dataset())),
        0,
    )
    .await
    .unwrap();

    assert_eq!(state.climate.recent_days(), 0);
    let series = state.climate.recent_precipitation().unwrap();
    assert_eq!(series.len(), 1);
}
