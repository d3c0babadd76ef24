use crate::helpers::{get, spawn_example_app};
use axum::http::StatusCode;

#[tokio::test]
async fn landing_page_lists_routes() {
    let test_app = spawn_example_app().await;

    let (status, body) = get(&test_app.app, "/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Climate App"));
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
    ] {
        assert!(html.contains(route), "missing {}", route);
    }
    assert!(html.contains("2017-08-21"));
    assert!(html.contains("mock:example"));
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_example_app().await;

    let (status, _) = get(&test_app.app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
}
