use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate::{app, build_app_state, db, Dataset, DatasetLoader, Observation, StationId};
use hyper::{header, Method};
use mockall::mock;
use std::sync::Arc;
use time::macros::date;
use tower::ServiceExt;

mock! {
    pub DatasetLoader {}

    #[async_trait]
    impl DatasetLoader for DatasetLoader {
        async fn load(&self) -> Result<Dataset, db::Error>;
        fn source(&self) -> String;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(loader: Arc<dyn DatasetLoader>) -> TestApp {
    let app_state = build_app_state("http://127.0.0.1:5000".to_string(), loader, 365)
        .await
        .expect("Failed to build app state.");
    TestApp {
        app: app(app_state),
    }
}

/// Three readings from two stations ending 2017-08-21
pub fn example_dataset() -> Dataset {
    Dataset::new(
        vec![
            Observation::new("S1", date!(2017 - 08 - 20), Some(0.0), Some(79.0)),
            Observation::new("S1", date!(2017 - 08 - 21), None, Some(80.0)),
            Observation::new("S2", date!(2017 - 08 - 21), Some(0.1), Some(75.0)),
        ],
        [StationId::from("S1"), StationId::from("S2")],
    )
}

/// Loader that must be asked for `dataset` exactly once
pub fn loader_for(dataset: Dataset) -> MockDatasetLoader {
    let mut loader = MockDatasetLoader::new();
    loader
        .expect_load()
        .times(1)
        .returning(move || Ok(dataset.clone()));
    loader
        .expect_source()
        .returning(|| "mock:example".to_string());
    loader
}

pub async fn spawn_example_app() -> TestApp {
    spawn_app(Arc::new(loader_for(example_dataset()))).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, value)
}
