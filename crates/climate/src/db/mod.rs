mod csv_files;
mod dataset;
mod sqlite;

pub use csv_files::{CsvLoader, MEASUREMENTS_CSV, STATIONS_CSV};
pub use dataset::Dataset;
pub use sqlite::SqliteLoader;

use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Sqlite(#[from] sqlx::Error),
    #[error("Failed to query duckdb: {0}")]
    Query(#[from] duckdb::Error),
    #[error("Invalid observation date '{value}': {source}")]
    DateParse {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Dataset not found: {0}")]
    NotFound(String),
    #[error("Unexpected dataset layout: {0}")]
    Schema(String),
}

/// Produces the dataset the service answers from. Called once at startup.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    async fn load(&self) -> Result<Dataset, Error>;
    /// Human readable origin, for logs and the landing page.
    fn source(&self) -> String;
}

pub(crate) fn parse_observation_date(value: &str) -> Result<time::Date, Error> {
    crate::engine::parse_date(value).map_err(|source| Error::DateParse {
        value: value.to_owned(),
        source,
    })
}
