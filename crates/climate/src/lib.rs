pub mod db;
pub mod engine;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use db::{CsvLoader, Dataset, DatasetLoader, SqliteLoader};
pub use engine::{
    AggregateResult, ClimateQueryService, DateWindow, Observation, ObservationStore, QueryError,
    StationId, TemperatureObservation,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
