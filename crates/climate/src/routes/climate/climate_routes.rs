use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::{error, warn};
use std::{collections::BTreeMap, sync::Arc};
use time::Date;

use crate::{
    engine::{parse_date, AggregateResult, QueryError, StationId, TemperatureObservation, DATE_FORMAT},
    AppState,
};

type ApiError = (StatusCode, String);

fn query_error(err: QueryError) -> ApiError {
    let status = match err {
        QueryError::EmptyDataset | QueryError::NoMatchingData => StatusCode::NOT_FOUND,
        QueryError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
    };
    warn!("query rejected: {}", err);
    (status, err.to_string())
}

fn path_date(raw: &str) -> Result<Date, ApiError> {
    parse_date(raw).map_err(|e| {
        warn!("invalid date in path '{}': {}", raw, e);
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}', expected YYYY-MM-DD: {}", raw, e),
        )
    })
}

fn stats_body(stats: AggregateResult) -> Json<[f64; 3]> {
    Json(stats.as_array())
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for each date of the last 12 months of data, keyed by YYYY-MM-DD", body = BTreeMap<String, Option<f64>>),
        (status = NOT_FOUND, description = "The dataset holds no observations"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to format a date")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, ApiError> {
    let series = state.climate.recent_precipitation().map_err(query_error)?;

    let body = series
        .into_iter()
        .map(|(date, prcp)| Ok((date.format(DATE_FORMAT)?, prcp)))
        .collect::<Result<BTreeMap<_, _>, time::error::Format>>()
        .map_err(|e| {
            error!("error formatting precipitation dates: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to format dates: {}", e),
            )
        })?;

    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every known station id", body = Vec<StationId>)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Json<Vec<StationId>> {
    Json(state.climate.list_stations())
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station over the last 12 months of data", body = Vec<TemperatureObservation>),
        (status = NOT_FOUND, description = "The dataset holds no observations")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let series = state
        .climate
        .most_active_station_temperatures()
        .map_err(query_error)?;
    Ok(Json(series))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature from start through the last observation", body = [f64]),
        (status = BAD_REQUEST, description = "Start is not a YYYY-MM-DD date"),
        (status = NOT_FOUND, description = "No temperature readings on or after start")
    ))]
pub async fn temperature_stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<[f64; 3]>, ApiError> {
    let start = path_date(&start)?;
    state
        .climate
        .temperature_stats_in_range(start, None)
        .map(stats_body)
        .map_err(query_error)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature from start through end", body = [f64]),
        (status = BAD_REQUEST, description = "A bound is not a YYYY-MM-DD date, or end precedes start"),
        (status = NOT_FOUND, description = "No temperature readings between start and end")
    ))]
pub async fn temperature_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<[f64; 3]>, ApiError> {
    let start = path_date(&start)?;
    let end = path_date(&end)?;
    state
        .climate
        .temperature_stats_in_range(start, Some(end))
        .map(stats_body)
        .map_err(query_error)
}
