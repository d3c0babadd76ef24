use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};
use time::Date;
use utoipa::ToSchema;

use super::{
    iso_date, most_active_station, recent_window, temperature_stats, AggregateResult, DateWindow,
    ObservationStore, QueryError, StationId, RECENT_WINDOW_DAYS,
};

/// Precipitation per date. A date seen more than once keeps the value of the
/// last observation visited.
pub type PrecipitationSeries = BTreeMap<Date, Option<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TemperatureObservation {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub date: Date,
    pub tobs: f64,
}

/// The four read-only climate queries, answered from a shared store.
#[derive(Clone)]
pub struct ClimateQueryService {
    store: Arc<dyn ObservationStore>,
    recent_days: u32,
}

impl ClimateQueryService {
    pub fn new(store: Arc<dyn ObservationStore>) -> Self {
        Self {
            store,
            recent_days: RECENT_WINDOW_DAYS,
        }
    }

    pub fn with_recent_days(mut self, recent_days: u32) -> Self {
        self.recent_days = recent_days;
        self
    }

    pub fn recent_days(&self) -> u32 {
        self.recent_days
    }

    pub fn latest_observed_date(&self) -> Result<Date, QueryError> {
        self.store.latest_observed_date()
    }

    fn recent_window(&self) -> Result<DateWindow, QueryError> {
        let anchor = self.store.latest_observed_date()?;
        Ok(recent_window(anchor, self.recent_days))
    }

    /// Precipitation for every date in the recent window.
    pub fn recent_precipitation(&self) -> Result<PrecipitationSeries, QueryError> {
        let window = self.recent_window()?;
        let mut series = PrecipitationSeries::new();
        for obs in self.store.observations().filter(|obs| window.contains(obs.date)) {
            series.insert(obs.date, obs.precipitation);
        }
        Ok(series)
    }

    pub fn list_stations(&self) -> Vec<StationId> {
        self.store.station_ids().to_vec()
    }

    /// Temperature readings of the busiest station inside the recent window,
    /// oldest first. The window ends at the latest date of the whole dataset.
    pub fn most_active_station_temperatures(
        &self,
    ) -> Result<Vec<TemperatureObservation>, QueryError> {
        let station = most_active_station(self.store.observations())?;
        let window = self.recent_window()?;

        let mut series: Vec<TemperatureObservation> = self
            .store
            .observations()
            .filter(|obs| obs.station == station && window.contains(obs.date))
            .filter_map(|obs| {
                obs.temperature.map(|tobs| TemperatureObservation {
                    date: obs.date,
                    tobs,
                })
            })
            .collect();
        series.sort_by_key(|entry| entry.date);

        Ok(series)
    }

    /// Temperature statistics from `start` through `end`, or through the end
    /// of the data when `end` is `None`. Both bounds are inclusive.
    pub fn temperature_stats_in_range(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<AggregateResult, QueryError> {
        if let Some(end) = end {
            if end < start {
                return Err(QueryError::InvalidRange { start, end });
            }
        }

        temperature_stats(
            self.store
                .observations()
                .filter(|obs| obs.date >= start && end.map_or(true, |end| obs.date <= end)),
        )
    }
}
