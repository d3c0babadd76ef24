//! Read-only query and aggregation engine over dated station observations.
//!
//! Everything here is synchronous and side-effect free: the engine borrows an
//! [`ObservationStore`] and builds fresh results on every call.

mod aggregation;
mod observation;
mod ranking;
mod service;
mod store;
mod window;

pub use aggregation::{temperature_stats, AggregateResult, TemperatureAccumulator};
pub use observation::{Observation, StationId};
pub use ranking::{most_active_station, station_counts};
pub use service::{ClimateQueryService, PrecipitationSeries, TemperatureObservation};
pub use store::ObservationStore;
pub use window::{iso_date, parse_date, recent_window, DateWindow, DATE_FORMAT, RECENT_WINDOW_DAYS};

use time::Date;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("the dataset holds no observations")]
    EmptyDataset,
    #[error("no observations matched the requested filter")]
    NoMatchingData,
    #[error("end date {end} precedes start date {start}")]
    InvalidRange { start: Date, end: Date },
}
