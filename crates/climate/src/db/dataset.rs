use itertools::Itertools;
use time::Date;

use crate::engine::{Observation, ObservationStore, QueryError, StationId};

/// Fully loaded, immutable snapshot of observations and known stations.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
    stations: Vec<StationId>,
    latest: Option<Date>,
}

impl Dataset {
    /// Station ids are de-duplicated, keeping first-seen order.
    pub fn new<S>(observations: Vec<Observation>, stations: S) -> Self
    where
        S: IntoIterator<Item = StationId>,
    {
        let latest = observations.iter().map(|obs| obs.date).max();
        Self {
            stations: stations.into_iter().unique().collect(),
            observations,
            latest,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl ObservationStore for Dataset {
    fn observations(&self) -> Box<dyn Iterator<Item = &Observation> + '_> {
        Box::new(self.observations.iter())
    }

    fn station_ids(&self) -> &[StationId] {
        &self.stations
    }

    fn latest_observed_date(&self) -> Result<Date, QueryError> {
        self.latest.ok_or(QueryError::EmptyDataset)
    }
}
