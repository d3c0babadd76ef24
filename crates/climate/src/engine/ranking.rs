use itertools::Itertools;
use std::collections::HashMap;

use super::{Observation, QueryError, StationId};

/// Number of observations recorded per station.
pub fn station_counts<'a, I>(observations: I) -> HashMap<&'a StationId, usize>
where
    I: IntoIterator<Item = &'a Observation>,
{
    observations.into_iter().map(|obs| &obs.station).counts()
}

/// Station with the most observations.
///
/// Ties go to the lexicographically smallest id so the answer never depends
/// on record order.
pub fn most_active_station<'a, I>(observations: I) -> Result<StationId, QueryError>
where
    I: IntoIterator<Item = &'a Observation>,
{
    station_counts(observations)
        .into_iter()
        .max_by(|(a_id, a_count), (b_id, b_count)| {
            a_count.cmp(b_count).then_with(|| b_id.cmp(a_id))
        })
        .map(|(id, _)| id.clone())
        .ok_or(QueryError::EmptyDataset)
}
