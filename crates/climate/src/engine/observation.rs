use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;
use utoipa::ToSchema;

/// Opaque identifier of a weather station, e.g. `USC00519281`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One daily reading from a station. Missing readings stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station: StationId,
    pub date: Date,
    /// Precipitation in inches
    pub precipitation: Option<f64>,
    /// Observed temperature in degrees Fahrenheit
    pub temperature: Option<f64>,
}

impl Observation {
    pub fn new(
        station: impl Into<StationId>,
        date: Date,
        precipitation: Option<f64>,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            station: station.into(),
            date,
            precipitation,
            temperature,
        }
    }
}
