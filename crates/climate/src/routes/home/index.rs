use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{
    engine::DATE_FORMAT,
    templates::{home_page, HomeData},
    AppState,
};

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let latest_date = state
        .climate
        .latest_observed_date()
        .ok()
        .and_then(|date| date.format(DATE_FORMAT).ok());

    let data = HomeData {
        dataset_source: &state.dataset_source,
        latest_date: latest_date.as_deref(),
        station_count: state.climate.list_stations().len(),
    };
    Html(home_page(&state.remote_url, &data).into_string())
}
