use crate::{
    db::DatasetLoader,
    engine::{ClimateQueryService, ObservationStore, StationId, TemperatureObservation},
    index_handler, precipitation, routes, stations, temperature_stats_between,
    temperature_stats_from, tobs,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub dataset_source: String,
    pub climate: ClimateQueryService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::climate_routes::temperature_stats_from,
        routes::climate::climate_routes::temperature_stats_between,
    ),
    components(schemas(StationId, TemperatureObservation)),
    tags(
        (name = "climate api", description = "a read-only api over historical daily precipitation and temperature observations")
    )
)]
struct ApiDoc;

/// Loads the dataset once and wraps it in the query service shared by every request.
pub async fn build_app_state(
    remote_url: String,
    loader: Arc<dyn DatasetLoader>,
    recent_days: u32,
) -> Result<AppState, anyhow::Error> {
    let dataset_source = loader.source();
    info!("Loading dataset from {}", dataset_source);

    let dataset = loader
        .load()
        .await
        .map_err(|e| anyhow!("error loading dataset from {}: {}", dataset_source, e))?;

    info!("  Observations: {}", dataset.len());
    info!("  Stations: {}", dataset.station_ids().len());
    match dataset.latest_observed_date() {
        Ok(latest) => info!("  Latest observation: {}", latest),
        Err(e) => warn!("  {}, date based queries will return 404", e),
    }

    let climate = ClimateQueryService::new(Arc::new(dataset)).with_recent_days(recent_days);

    Ok(AppState {
        remote_url,
        dataset_source,
        climate,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_stats_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_stats_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
