use crate::helpers::{get, get_json, loader_for, spawn_app, spawn_example_app};
use axum::http::StatusCode;
use climate::{Dataset, StationId};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn precipitation_is_keyed_by_iso_date() {
    let test_app = spawn_example_app().await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    // two readings on the 21st, the later record wins
    assert_eq!(body, json!({ "2017-08-20": 0.0, "2017-08-21": 0.1 }));
}

#[tokio::test]
async fn missing_precipitation_is_null() {
    let dataset = Dataset::new(
        vec![climate::Observation::new(
            "S1",
            time::macros::date!(2017 - 08 - 21),
            None,
            Some(80.0),
        )],
        [StationId::from("S1")],
    );
    let test_app = spawn_app(Arc::new(loader_for(dataset))).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "2017-08-21": null }));
}

#[tokio::test]
async fn stations_is_an_array_of_ids() {
    let test_app = spawn_example_app().await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["S1", "S2"]));
}

#[tokio::test]
async fn tobs_lists_the_most_active_station() {
    let test_app = spawn_example_app().await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "date": "2017-08-20", "tobs": 79.0 },
            { "date": "2017-08-21", "tobs": 80.0 }
        ])
    );
}

#[tokio::test]
async fn open_ended_stats_are_min_avg_max() {
    let test_app = spawn_example_app().await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/2017-08-21").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([75.0, 77.5, 80.0]));
}

#[tokio::test]
async fn bounded_stats_include_both_ends() {
    let test_app = spawn_example_app().await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/2017-08-20/2017-08-21").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([75.0, 78.0, 80.0]));
}

#[tokio::test]
async fn reversed_range_is_a_bad_request() {
    let test_app = spawn_example_app().await;

    let (status, body) = get(&test_app.app, "/api/v1.0/2017-08-21/2017-08-20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("precedes"));
}

#[tokio::test]
async fn unparseable_dates_are_bad_requests() {
    let test_app = spawn_example_app().await;

    for uri in [
        "/api/v1.0/yesterday",
        "/api/v1.0/2017-13-01",
        "/api/v1.0/2017-08-20/soon",
    ] {
        let (status, _) = get(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn range_without_data_is_not_found() {
    let test_app = spawn_example_app().await;

    let (status, _) = get(&test_app.app, "/api/v1.0/2018-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&test_app.app, "/api/v1.0/2010-01-01/2010-12-31").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_dataset_answers_without_crashing() {
    let dataset = Dataset::new(Vec::new(), [StationId::from("S1")]);
    let test_app = spawn_app(Arc::new(loader_for(dataset))).await;

    let (status, _) = get(&test_app.app, "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&test_app.app, "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&test_app.app, "/api/v1.0/2017-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_json(&test_app.app, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["S1"]));
}
