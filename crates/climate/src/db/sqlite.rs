use async_trait::async_trait;
use climate_core::require_file;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};
use std::time::Duration;

use super::{parse_observation_date, Dataset, DatasetLoader, Error};
use crate::engine::{Observation, StationId};

/// Reads the `measurement` and `station` tables of a climate SQLite file
/// (the `hawaii.sqlite` layout).
pub struct SqliteLoader {
    path: String,
}

impl SqliteLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    async fn connect(&self) -> Result<SqlitePool, Error> {
        let path = require_file(&self.path).map_err(|e| Error::NotFound(e.to_string()))?;
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;
        Ok(pool)
    }

    async fn measurements(pool: &SqlitePool) -> Result<Vec<Observation>, Error> {
        let rows = sqlx::query("SELECT station, date, prcp, tobs FROM measurement ORDER BY id")
            .fetch_all(pool)
            .await?;
        debug!("read {} measurement rows", rows.len());

        rows.iter().map(row_to_observation).collect()
    }

    async fn stations(pool: &SqlitePool) -> Result<Vec<StationId>, Error> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT station FROM station ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(ids.into_iter().map(StationId::from).collect())
    }
}

fn row_to_observation(row: &SqliteRow) -> Result<Observation, Error> {
    let station: String = row.try_get("station")?;
    let date: String = row.try_get("date")?;
    Ok(Observation {
        station: station.into(),
        date: parse_observation_date(&date)?,
        precipitation: row.try_get("prcp")?,
        temperature: row.try_get("tobs")?,
    })
}

#[async_trait]
impl DatasetLoader for SqliteLoader {
    async fn load(&self) -> Result<Dataset, Error> {
        let pool = self.connect().await?;
        let loaded = async {
            let observations = Self::measurements(&pool).await?;
            let stations = Self::stations(&pool).await?;
            Ok::<_, Error>(Dataset::new(observations, stations))
        }
        .await;
        pool.close().await;

        let dataset = loaded?;
        info!("Loaded {} observations from {}", dataset.len(), self.path);
        Ok(dataset)
    }

    fn source(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}
