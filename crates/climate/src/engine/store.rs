use time::Date;

use super::{Observation, QueryError, StationId};

/// Read access to a loaded dataset.
///
/// Implementations are plain accessors: filtering and aggregation belong to
/// the engine, never to the store.
pub trait ObservationStore: Send + Sync {
    /// Iterate every observation in store order. Each call starts a fresh pass.
    fn observations(&self) -> Box<dyn Iterator<Item = &Observation> + '_>;

    /// Known stations in store order, without duplicates.
    fn station_ids(&self) -> &[StationId];

    /// Latest date with at least one observation.
    fn latest_observed_date(&self) -> Result<Date, QueryError>;
}
