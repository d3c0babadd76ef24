use serde::Serialize;

use super::{Observation, QueryError};

/// Minimum, mean and maximum of a non-empty set of temperature readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    pub minimum: f64,
    pub average: f64,
    pub maximum: f64,
}

impl AggregateResult {
    /// `[min, avg, max]`, the order the API responds with.
    pub fn as_array(&self) -> [f64; 3] {
        [self.minimum, self.average, self.maximum]
    }
}

/// Running min/max/sum/count, so statistics come out of a single pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureAccumulator {
    minimum: f64,
    maximum: f64,
    sum: f64,
    count: usize,
}

impl TemperatureAccumulator {
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.minimum = value;
            self.maximum = value;
        } else {
            self.minimum = self.minimum.min(value);
            self.maximum = self.maximum.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    /// `None` when nothing was pushed.
    pub fn finish(self) -> Option<AggregateResult> {
        if self.count == 0 {
            return None;
        }
        Some(AggregateResult {
            minimum: self.minimum,
            average: self.sum / self.count as f64,
            maximum: self.maximum,
        })
    }
}

/// Temperature statistics over the observations that carry a temperature.
///
/// Observations without a reading are skipped. Fails with
/// [`QueryError::NoMatchingData`] when no reading is left.
pub fn temperature_stats<'a, I>(observations: I) -> Result<AggregateResult, QueryError>
where
    I: IntoIterator<Item = &'a Observation>,
{
    observations
        .into_iter()
        .filter_map(|obs| obs.temperature)
        .fold(TemperatureAccumulator::default(), |mut acc, tobs| {
            acc.push(tobs);
            acc
        })
        .finish()
        .ok_or(QueryError::NoMatchingData)
}
